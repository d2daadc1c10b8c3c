//! Extraction API client.
//!
//! Blocking reqwest client (no Tokio runtime required). One operation:
//! submit an invoice image, get the extracted fields back as JSON.
//!
//! No retries and no token refresh. A rejected credential is surfaced as
//! its own error variant so the engine can abort the batch.

mod client;
mod token;

pub use client::{ClientError, ExtractClient};
pub use token::{load_token, TokenError, TokenFile};
