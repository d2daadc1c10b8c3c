use std::fmt;
use std::path::PathBuf;

use invproof_core::Report;

#[derive(Debug)]
pub enum VerifyError {
    /// TOML parse / deserialization error in the run config.
    ConfigParse(String),
    /// Token file missing or malformed.
    Token(String),
    /// Expectation file does not exist.
    ExpectedMissing(PathBuf),
    /// Expectation file is not a JSON array of records.
    ExpectedParse(String),
    /// Invoice inventory directory does not exist.
    InventoryMissing(PathBuf),
    /// Inventory directory could not be enumerated.
    InventoryRead(String),
    /// Image count does not match the expected record count.
    CountMismatch { images: usize, expected: usize },
    /// Requested range violates `0 <= start <= end < count`.
    InvalidRange { start: usize, end: usize, count: usize },
    /// Credential rejected mid-batch. Carries what was verified before the
    /// failing index; no report file is written for the run.
    AuthExpired { partial: Report, message: String },
    /// Report could not be written.
    Persist(String),
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::Token(msg) => write!(f, "{msg}"),
            Self::ExpectedMissing(path) => {
                write!(f, "expectation file not found: {}", path.display())
            }
            Self::ExpectedParse(msg) => write!(f, "cannot parse expectation file: {msg}"),
            Self::InventoryMissing(path) => {
                write!(f, "invoice directory not found: {}", path.display())
            }
            Self::InventoryRead(msg) => write!(f, "cannot read invoice directory: {msg}"),
            Self::CountMismatch { images, expected } => write!(
                f,
                "invoice count ({images}) does not match expected record count ({expected})"
            ),
            Self::InvalidRange { start, end, count } => {
                write!(f, "invalid range {start}..={end} for {count} invoice(s)")
            }
            Self::AuthExpired { partial, message } => write!(
                f,
                "authentication token invalid or expired after {} result(s): {message}",
                partial.len()
            ),
            Self::Persist(msg) => write!(f, "cannot write report: {msg}"),
        }
    }
}

impl std::error::Error for VerifyError {}
