use invproof_core::{Report, Status};

// ---------------------------------------------------------------------------
// Subsets
// ---------------------------------------------------------------------------

/// Which slice of a report an export carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subset {
    Successes,
    Failures,
    Errors,
    /// Failures followed by errors, concatenated in that order.
    FailuresErrors,
}

impl Subset {
    /// Filename prefix that replaces `result_` in the derived name.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Successes => "success_",
            Self::Failures => "failures_",
            Self::Errors => "errors_",
            Self::FailuresErrors => "failures_errors_",
        }
    }
}

impl std::fmt::Display for Subset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Successes => write!(f, "successes"),
            Self::Failures => write!(f, "failures"),
            Self::Errors => write!(f, "errors"),
            Self::FailuresErrors => write!(f, "failures+errors"),
        }
    }
}

// ---------------------------------------------------------------------------
// Partitioning
// ---------------------------------------------------------------------------

/// A report split by item classification.
#[derive(Debug, Default)]
pub struct Partitioned {
    pub successes: Report,
    pub failures: Report,
    pub errors: Report,
}

/// Split a report by item classification.
///
/// `failures` holds `Failure` items with a non-empty message; a `Failure`
/// with an empty message is error-like and lands in `errors` — nothing is
/// ever dropped. An empty report partitions to three empty sets.
pub fn partition(report: &Report) -> Partitioned {
    let mut out = Partitioned::default();

    for item in &report.items {
        let bucket = match item.status {
            Status::Success => &mut out.successes,
            Status::Failure if !item.message.is_empty() => &mut out.failures,
            _ => &mut out.errors,
        };
        bucket.items.push(item.clone());
    }

    out
}

impl Partitioned {
    /// The items an export of `subset` carries, in partition order.
    pub fn subset(&self, subset: Subset) -> Report {
        let items = match subset {
            Subset::Successes => self.successes.items.clone(),
            Subset::Failures => self.failures.items.clone(),
            Subset::Errors => self.errors.items.clone(),
            Subset::FailuresErrors => {
                let mut items = self.failures.items.clone();
                items.extend(self.errors.items.iter().cloned());
                items
            }
        };
        Report { items }
    }
}
