//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — CI scripts key off them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, missing file) |
//! | 10-19   | verify    | Verification run codes                   |
//! | 20-29   | reports   | Report analysis codes                    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use invproof_verify::VerifyError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Verify (10-19)
// =============================================================================

/// A precondition failed (token, expectations, inventory, counts, range);
/// no submissions were made and no report was written.
pub const EXIT_VERIFY_PRECONDITION: u8 = 10;

/// The credential was rejected mid-batch; the run aborted and no report
/// was written. Refresh the token and re-run.
pub const EXIT_VERIFY_AUTH: u8 = 11;

/// The run completed and a report was written, but one or more items were
/// classified `Failure` or `Error`.
pub const EXIT_VERIFY_FAILED: u8 = 12;

// =============================================================================
// Reports (20-29)
// =============================================================================

/// Requested report file does not exist.
pub const EXIT_REPORT_NOT_FOUND: u8 = 20;

/// Report file exists but is not valid report JSON.
pub const EXIT_REPORT_PARSE: u8 = 21;

// =============================================================================
// Error mapping
// =============================================================================

/// Map a VerifyError to its exit code.
pub fn verify_exit_code(err: &VerifyError) -> u8 {
    match err {
        VerifyError::AuthExpired { .. } => EXIT_VERIFY_AUTH,
        VerifyError::Persist(_) => EXIT_ERROR,
        _ => EXIT_VERIFY_PRECONDITION,
    }
}
