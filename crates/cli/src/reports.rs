//! `invproof reports` — list, inspect, and export past reports.

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use invproof_store::{self as store, StoreError, Subset};

use crate::exit_codes;
use crate::run::load_config;
use crate::CliError;

#[derive(Subcommand)]
pub(crate) enum ReportsCommands {
    /// List report files in the report directory
    List {
        /// Path to the run config (default: ./invproof.toml, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the partition summary for one report
    #[command(after_help = "\
Examples:
  invproof reports show result_12_invoices_2026-08-07T10-00-00-000Z.json
  invproof reports show failures_12_invoices_2026-08-07T10-00-00-000Z.json --json")]
    Show {
        /// Report filename (as printed by `reports list`) or a path
        file: String,

        /// Path to the run config (default: ./invproof.toml, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the loaded report JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Export a subset of one report under a derived filename
    #[command(after_help = "\
Examples:
  invproof reports export result_12_invoices_2026-08-07T10-00-00-000Z.json --subset failures
  invproof reports export result_12_invoices_2026-08-07T10-00-00-000Z.json --subset failures-errors")]
    Export {
        /// Report filename (as printed by `reports list`) or a path
        file: String,

        /// Which partition to export
        #[arg(long, value_enum)]
        subset: SubsetArg,

        /// Path to the run config (default: ./invproof.toml, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum SubsetArg {
    Successes,
    Failures,
    Errors,
    FailuresErrors,
}

impl From<SubsetArg> for Subset {
    fn from(arg: SubsetArg) -> Self {
        match arg {
            SubsetArg::Successes => Subset::Successes,
            SubsetArg::Failures => Subset::Failures,
            SubsetArg::Errors => Subset::Errors,
            SubsetArg::FailuresErrors => Subset::FailuresErrors,
        }
    }
}

pub(crate) fn cmd_reports(cmd: ReportsCommands) -> Result<(), CliError> {
    match cmd {
        ReportsCommands::List { config } => cmd_list(config),
        ReportsCommands::Show { file, config, json } => cmd_show(file, config, json),
        ReportsCommands::Export { file, subset, config } => cmd_export(file, subset, config),
    }
}

fn store_err(err: StoreError) -> CliError {
    let code = match &err {
        StoreError::Parse { .. } => exit_codes::EXIT_REPORT_PARSE,
        StoreError::NotAReport(_) => exit_codes::EXIT_USAGE,
        StoreError::Io(_) => exit_codes::EXIT_ERROR,
    };
    CliError { code, message: err.to_string(), hint: None }
}

/// A bare filename resolves inside the report directory; anything with a
/// path component is used as given.
fn resolve_report_path(report_dir: &Path, file: &str) -> PathBuf {
    let given = Path::new(file);
    if given.components().count() > 1 || given.is_absolute() {
        given.to_path_buf()
    } else {
        report_dir.join(given)
    }
}

fn cmd_list(config_flag: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_flag)?;
    for name in store::list(&config.report_dir).map_err(store_err)? {
        println!("{name}");
    }
    Ok(())
}

fn cmd_show(file: String, config_flag: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let config = load_config(config_flag)?;
    let path = resolve_report_path(&config.report_dir, &file);

    if !path.is_file() {
        return Err(CliError {
            code: exit_codes::EXIT_REPORT_NOT_FOUND,
            message: format!("report not found: {}", path.display()),
            hint: Some("`invproof reports list` shows the available reports".into()),
        });
    }

    let report = store::load(&path).map_err(store_err)?;
    let parts = store::partition(&report);

    eprintln!("total:     {}", report.len());
    eprintln!("successes: {}", parts.successes.len());
    eprintln!("failures:  {}", parts.failures.len());
    eprintln!("errors:    {}", parts.errors.len());

    if json {
        let json_str = serde_json::to_string_pretty(&report).map_err(|e| CliError {
            code: exit_codes::EXIT_ERROR,
            message: format!("JSON serialization error: {}", e),
            hint: None,
        })?;
        println!("{json_str}");
    }

    Ok(())
}

fn cmd_export(
    file: String,
    subset: SubsetArg,
    config_flag: Option<PathBuf>,
) -> Result<(), CliError> {
    let config = load_config(config_flag)?;
    let path = resolve_report_path(&config.report_dir, &file);

    if !path.is_file() {
        return Err(CliError {
            code: exit_codes::EXIT_REPORT_NOT_FOUND,
            message: format!("report not found: {}", path.display()),
            hint: Some("`invproof reports list` shows the available reports".into()),
        });
    }

    let source_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            CliError::usage(format!("not a report filename: {}", file))
                .with_hint("pass a filename as printed by `invproof reports list`")
        })?
        .to_string();

    let report = store::load(&path).map_err(store_err)?;
    let subset: Subset = subset.into();
    let items = store::partition(&report).subset(subset);

    let out = store::export(&config.report_dir, &source_name, subset, &items).map_err(store_err)?;
    eprintln!("exported {} {} item(s) to {}", items.len(), subset, out.display());

    Ok(())
}
