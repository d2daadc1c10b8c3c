use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use invproof_core::Report;

use crate::partition::Subset;

/// Every persisted run report starts with this prefix.
pub const REPORT_PREFIX: &str = "result_";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StoreError {
    /// Directory or file could not be read or written.
    Io(String),
    /// File exists but is not a valid report document. Scoped to that file
    /// only — other listed reports stay loadable.
    Parse { file: String, message: String },
    /// Filename does not follow the report naming convention.
    NotAReport(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Parse { file, message } => {
                write!(f, "cannot parse report {}: {}", file, message)
            }
            Self::NotAReport(name) => {
                write!(f, "{:?} is not a report filename (expected {}*.json)", name, REPORT_PREFIX)
            }
        }
    }
}

impl std::error::Error for StoreError {}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Fresh report filename embedding the item count and a sortable timestamp.
///
/// The RFC 3339 stamp has `:` and `.` swapped for `-` so the name is
/// filesystem-safe everywhere and still sorts chronologically.
pub fn report_name(count: usize, at: DateTime<Utc>) -> String {
    let stamp: String = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("{}{}_invoices_{}.json", REPORT_PREFIX, count, stamp)
}

/// Whether `name` follows the report naming convention.
pub fn is_report_name(name: &str) -> bool {
    name.starts_with(REPORT_PREFIX) && name.ends_with(".json")
}

/// Derived filename for an exported subset: the subset prefix replaces
/// `result_`, the rest of the name is kept so the export stays traceable
/// to its source run.
pub fn derived_name(subset: Subset, source_name: &str) -> Result<String, StoreError> {
    let rest = source_name
        .strip_prefix(REPORT_PREFIX)
        .ok_or_else(|| StoreError::NotAReport(source_name.to_string()))?;
    Ok(format!("{}{}", subset.prefix(), rest))
}

// ---------------------------------------------------------------------------
// File operations
// ---------------------------------------------------------------------------

/// Report filenames in `dir`, name-sorted (chronological by construction).
/// A missing directory lists as empty, not as an error.
pub fn list(dir: &Path) -> Result<Vec<String>, StoreError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(StoreError::Io(e.to_string())),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StoreError::Io(e.to_string()))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if is_report_name(name) && entry.path().is_file() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Load one report file.
pub fn load(path: &Path) -> Result<Report, StoreError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| StoreError::Io(format!("cannot read {}: {}", path.display(), e)))?;

    serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
        file: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Persist a fresh run report under a new `result_` name. Returns the path.
pub fn write(dir: &Path, report: &Report) -> Result<PathBuf, StoreError> {
    let path = dir.join(report_name(report.len(), Utc::now()));
    write_report(&path, report)?;
    Ok(path)
}

/// Write a subset under its derived name, overwriting a previous export of
/// the same subset. Returns the path.
pub fn export(
    dir: &Path,
    source_name: &str,
    subset: Subset,
    items: &Report,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(derived_name(subset, source_name)?);
    write_report(&path, items)?;
    Ok(path)
}

fn write_report(path: &Path, report: &Report) -> Result<(), StoreError> {
    let file = File::create(path)
        .map_err(|e| StoreError::Io(format!("cannot create {}: {}", path.display(), e)))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report).map_err(|e| StoreError::Io(e.to_string()))
}
