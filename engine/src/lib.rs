// Delivery spreadsheet import engine.
//
// Reads a workbook (or CSV export), normalizes every non-blank row into a
// `shared::models::ParsedRow`, and reports row-local problems as
// `ParsingError`s for operator review.

pub mod config;
pub mod data;
pub mod error;
pub mod normalize;
pub mod services;

pub use config::settings::ImportSettings;
pub use data::workbook::{SourceFormat, WorkbookParser};
pub use error::ImportError;
