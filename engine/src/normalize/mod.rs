// Normalization of headers and raw cell values into typed domain values.
pub mod fields;
pub mod header;

pub use fields::{
    excel_serial_to_date, normalize_boolean, normalize_date, normalize_number, normalize_status,
    normalize_text, TextCase,
};
pub use header::normalize_header;
