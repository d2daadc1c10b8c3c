//! Run configuration.
//!
//! Explicit paths handed to the engine at construction — nothing is read
//! from ambient process state, so tests can point every path at a tempdir.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::VerifyError;

/// Sandbox receipt-extraction endpoint of the reference deployment.
pub const DEFAULT_API_URL: &str = "https://api-sandbox.oxpay.com.br/info/receipt";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Receipt-extraction endpoint.
    pub api_url: String,
    /// JSON file holding the bearer token (`{"token": "…"}`).
    pub token_file: PathBuf,
    /// JSON array of expected records, index-aligned with the inventory.
    pub expected_file: PathBuf,
    /// Directory of `invoice-{index}.jpg` images.
    pub invoice_dir: PathBuf,
    /// Where reports are written, listed, and exported.
    pub report_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token_file: "token.json".into(),
            expected_file: "expected.json".into(),
            invoice_dir: "invoices".into(),
            report_dir: ".".into(),
        }
    }
}

impl RunConfig {
    /// Parse a config from TOML. Every field is optional and falls back to
    /// its default.
    pub fn from_toml(contents: &str) -> Result<Self, VerifyError> {
        toml::from_str(contents).map_err(|e| VerifyError::ConfigParse(e.to_string()))
    }

    /// Resolve relative paths against `base` (the config file's directory).
    pub fn resolve_against(mut self, base: &Path) -> Self {
        for path in [
            &mut self.token_file,
            &mut self.expected_file,
            &mut self.invoice_dir,
            &mut self.report_dir,
        ] {
            if path.is_relative() {
                *path = base.join(path.as_path());
            }
        }
        self
    }
}
