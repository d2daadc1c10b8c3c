// invproof CLI - headless invoice extraction verification

mod exit_codes;
mod reports;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "invproof")]
#[command(about = "Verify a document-extraction API against expected invoice fields")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit invoices and verify the extracted fields
    #[command(after_help = "\
Examples:
  invproof run
  invproof run --start 3 --end 7
  invproof run --json
  invproof run --config integration/invproof.toml")]
    Run {
        /// First index to verify (defaults to 0)
        #[arg(long)]
        start: Option<usize>,

        /// Last index to verify, inclusive (defaults to the last invoice)
        #[arg(long)]
        end: Option<usize>,

        /// Path to the run config (default: ./invproof.toml, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report JSON to stdout as well as writing the file
        #[arg(long)]
        json: bool,
    },

    /// Check every run precondition without submitting anything
    #[command(after_help = "\
Examples:
  invproof validate
  invproof validate --config integration/invproof.toml")]
    Validate {
        /// Path to the run config (default: ./invproof.toml, then built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Inspect and export past reports
    Reports {
        #[command(subcommand)]
        command: reports::ReportsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { start, end, config, json } => run::cmd_run(start, end, config, json),
        Commands::Validate { config } => run::cmd_validate(config),
        Commands::Reports { command } => reports::cmd_reports(command),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
            "\ncontract_version(report): 1",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
            "\ncontract_version(report): 1",
        )
    }
}
