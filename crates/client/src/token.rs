//! Token storage.
//!
//! The access token lives in a small JSON file (`{"token": "…"}`) issued
//! out of band. No refresh logic here — an expired token surfaces later as
//! the engine's fatal auth abort.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Shape of the token file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenFile {
    pub token: String,
}

/// Error type for token loading. Both variants are startup precondition
/// failures; a run never begins without a usable token.
#[derive(Debug)]
pub enum TokenError {
    /// Token file does not exist.
    Missing(PathBuf),
    /// File exists but is not `{"token": "…"}` JSON, or the token is empty.
    Invalid(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "token file not found: {}", path.display()),
            Self::Invalid(msg) => write!(f, "invalid token file: {}", msg),
        }
    }
}

impl std::error::Error for TokenError {}

/// Load the bearer token from `path`.
pub fn load_token(path: &Path) -> Result<String, TokenError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TokenError::Missing(path.to_path_buf()));
        }
        Err(e) => return Err(TokenError::Invalid(e.to_string())),
    };

    let parsed: TokenFile =
        serde_json::from_str(&contents).map_err(|e| TokenError::Invalid(e.to_string()))?;

    let token = parsed.token.trim();
    if token.is_empty() {
        return Err(TokenError::Invalid("token value is empty".into()));
    }

    Ok(token.to_string())
}
