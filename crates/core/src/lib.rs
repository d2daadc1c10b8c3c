//! `invproof-core` — record model and field comparator.
//!
//! Pure crate: no IO, no HTTP. The verification engine and the report
//! store both build on these types.

pub mod compare;
pub mod model;

pub use compare::compare;
pub use model::{Difference, Fields, InvoiceResult, Report, Status};
