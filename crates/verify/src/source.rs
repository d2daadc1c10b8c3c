//! Invoice inventory and expectation sequence.
//!
//! Images follow a fixed naming convention keyed by index; the expectation
//! file is a JSON array aligned with it. The count check runs once per
//! batch, at open — not per item.

use std::path::{Path, PathBuf};

use invproof_core::Fields;

use crate::error::VerifyError;

/// A resolved index: image path plus the expected record for it.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub file_name: String,
    pub image_path: PathBuf,
    pub expected: &'a Fields,
}

/// Index-aligned view over the invoice images and their expected records.
#[derive(Debug)]
pub struct InvoiceSource {
    invoice_dir: PathBuf,
    expected: Vec<Fields>,
}

impl InvoiceSource {
    /// Load the expectation sequence and validate the inventory against it.
    pub fn open(expected_file: &Path, invoice_dir: &Path) -> Result<Self, VerifyError> {
        let contents = match std::fs::read_to_string(expected_file) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VerifyError::ExpectedMissing(expected_file.to_path_buf()));
            }
            Err(e) => return Err(VerifyError::ExpectedParse(e.to_string())),
        };
        let expected: Vec<Fields> =
            serde_json::from_str(&contents).map_err(|e| VerifyError::ExpectedParse(e.to_string()))?;

        if !invoice_dir.is_dir() {
            return Err(VerifyError::InventoryMissing(invoice_dir.to_path_buf()));
        }
        let images = count_images(invoice_dir)?;
        if images != expected.len() {
            return Err(VerifyError::CountMismatch {
                images,
                expected: expected.len(),
            });
        }

        Ok(Self {
            invoice_dir: invoice_dir.to_path_buf(),
            expected,
        })
    }

    /// Number of invoices (= number of expected records).
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Canonical image file name for an index.
    pub fn file_name(index: usize) -> String {
        format!("invoice-{index}.jpg")
    }

    /// Resolve an index to its image path and expected record, or `None`
    /// when the image file is absent. One missing file never aborts a
    /// batch — the engine records an `Error` item and moves on.
    pub fn resolve(&self, index: usize) -> Option<Resolved<'_>> {
        let expected = self.expected.get(index)?;
        let file_name = Self::file_name(index);
        let image_path = self.invoice_dir.join(&file_name);
        if !image_path.is_file() {
            return None;
        }
        Some(Resolved {
            file_name,
            image_path,
            expected,
        })
    }
}

fn count_images(dir: &Path) -> Result<usize, VerifyError> {
    let entries = std::fs::read_dir(dir).map_err(|e| VerifyError::InventoryRead(e.to_string()))?;

    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|e| VerifyError::InventoryRead(e.to_string()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "jpg") {
            count += 1;
        }
    }
    Ok(count)
}
