use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Ordered field name → value mapping.
///
/// Both the expectation file and API responses are open JSON objects.
/// Insertion order is preserved so differences come out in the order the
/// expectation file lists its fields.
pub type Fields = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Comparison output
// ---------------------------------------------------------------------------

/// One field-level mismatch between an expected and an actual record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difference {
    pub field: String,
    pub expected: Value,
    pub actual: Value,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Outcome class of a single verified invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Submission succeeded and every expected field matched.
    Success,
    /// Submission succeeded but one or more fields differed.
    Failure,
    /// Image missing, or the submission failed for a non-auth reason.
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::Failure => write!(f, "Failure"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// Outcome of verifying one invoice image. Built once per index during a
/// run, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceResult {
    pub file: String,
    pub status: Status,
    pub message: String,
    /// Field mismatches; empty unless status is `Failure`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<Difference>,
    /// The raw API response; attached only when a submission succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    /// The expected record; attached only when a submission succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Fields>,
}

impl InvoiceResult {
    /// An `Error`-status item: no differences, no payloads.
    pub fn error(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: Status::Error,
            message: message.into(),
            differences: Vec::new(),
            actual: None,
            expected: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A finished verification run: one result per processed index, in index
/// order. Serializes as a bare JSON array so report files and exported
/// subsets share one shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    pub items: Vec<InvoiceResult>,
}

impl Report {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
