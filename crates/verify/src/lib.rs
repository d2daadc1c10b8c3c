//! `invproof-verify` — the verification engine.
//!
//! Feeds invoice images through the extraction API one at a time, compares
//! each response against its expected record, and assembles a report.
//! No CLI concepts here; any front end drives [`VerifyEngine`] directly.

pub mod config;
pub mod engine;
pub mod error;
pub mod source;

pub use config::RunConfig;
pub use engine::{RunOutcome, VerifyEngine};
pub use error::VerifyError;
pub use source::{InvoiceSource, Resolved};
