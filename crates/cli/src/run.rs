//! `invproof run` / `invproof validate` — drive the verification engine.

use std::path::{Path, PathBuf};

use invproof_client::load_token;
use invproof_core::Status;
use invproof_verify::{InvoiceSource, RunConfig, VerifyEngine, VerifyError};

use crate::exit_codes::{self, verify_exit_code};
use crate::CliError;

const CONFIG_FILE: &str = "invproof.toml";

/// Load the run config: explicit flag > `./invproof.toml` > user config
/// dir > built-in defaults. Relative paths inside a config file resolve
/// against that file's directory.
pub(crate) fn load_config(flag: Option<PathBuf>) -> Result<RunConfig, CliError> {
    let path = match flag {
        Some(path) => Some(path),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            if local.is_file() {
                Some(local)
            } else {
                dirs::config_dir()
                    .map(|dir| dir.join("invproof").join(CONFIG_FILE))
                    .filter(|path| path.is_file())
            }
        }
    };

    let Some(path) = path else {
        return Ok(RunConfig::default());
    };

    let contents = std::fs::read_to_string(&path).map_err(|e| CliError {
        code: exit_codes::EXIT_VERIFY_PRECONDITION,
        message: format!("cannot read config {}: {}", path.display(), e),
        hint: None,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let config = RunConfig::from_toml(&contents).map_err(verify_err)?;
    Ok(config.resolve_against(base))
}

fn verify_err(err: VerifyError) -> CliError {
    let hint = match &err {
        VerifyError::AuthExpired { .. } => {
            Some("refresh the token and re-run; no report was written".to_string())
        }
        VerifyError::Token(_) => {
            Some("the token file is JSON of the form {\"token\": \"…\"}".to_string())
        }
        VerifyError::CountMismatch { .. } => {
            Some("every expected record needs a matching invoice-{index}.jpg".to_string())
        }
        _ => None,
    };
    CliError { code: verify_exit_code(&err), message: err.to_string(), hint }
}

pub(crate) fn cmd_run(
    start: Option<usize>,
    end: Option<usize>,
    config_flag: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let config = load_config(config_flag)?;
    let engine = VerifyEngine::from_config(&config).map_err(verify_err)?;

    let outcome = match (start, end) {
        (None, None) => engine.run_all(),
        (start, end) => {
            let count = engine.invoice_count();
            let start = start.unwrap_or(0);
            let end = end.unwrap_or_else(|| count.saturating_sub(1));
            engine.run(start, end)
        }
    }
    .map_err(verify_err)?;

    if json {
        let json_str = serde_json::to_string_pretty(&outcome.report).map_err(|e| CliError {
            code: exit_codes::EXIT_ERROR,
            message: format!("JSON serialization error: {}", e),
            hint: None,
        })?;
        println!("{json_str}");
    }

    let clean = outcome.report.items.iter().all(|item| item.status == Status::Success);
    if !clean {
        let name = outcome
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("<report>")
            .to_string();
        return Err(CliError {
            code: exit_codes::EXIT_VERIFY_FAILED,
            message: "verification found failures or errors".into(),
            hint: Some(format!("inspect with `invproof reports show {}`", name)),
        });
    }

    Ok(())
}

pub(crate) fn cmd_validate(config_flag: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_flag)?;

    load_token(&config.token_file)
        .map_err(|e| verify_err(VerifyError::Token(e.to_string())))?;

    let source =
        InvoiceSource::open(&config.expected_file, &config.invoice_dir).map_err(verify_err)?;

    eprintln!(
        "valid: {} invoice image(s) against {} expected record(s), token loaded",
        source.len(),
        source.len(),
    );
    Ok(())
}
