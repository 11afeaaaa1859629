// Service layer on top of the parsing pipeline: runs an import and prepares its
// output for operator review.
pub mod import_service;

pub use import_service::{ImportOutcome, ImportService};
