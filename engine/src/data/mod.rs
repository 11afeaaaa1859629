// Spreadsheet reading and row normalization.
pub mod aglutinated;
pub mod aliases;
pub mod assignees;
pub mod cell;
pub mod derived;
pub mod row_processor;
pub mod sheet_row;
pub mod workbook;

pub use cell::CellValue;
pub use sheet_row::SheetRow;
pub use workbook::{SourceFormat, WorkbookParser};
