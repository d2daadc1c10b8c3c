//! Report file store.
//!
//! Reports are bare JSON arrays of invoice results. Filenames encode the
//! item count and a sortable timestamp:
//! `result_{count}_invoices_{timestamp}.json`. Exported subsets swap the
//! `result_` prefix for the subset kind and are themselves valid report
//! files — loadable and re-partitionable.

mod files;
mod partition;

pub use files::{
    derived_name, export, is_report_name, list, load, report_name, write, StoreError,
    REPORT_PREFIX,
};
pub use partition::{partition, Partitioned, Subset};
