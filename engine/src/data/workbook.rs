// Spreadsheet driver: reads the first worksheet (or a CSV file), detects the
// header layout, and runs every non-blank row through the row processor.
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use shared::models::ParseResult;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info};

use super::aglutinated::detect_aglutinated_column;
use super::cell::CellValue;
use super::row_processor::{process_row, RowContext};
use super::sheet_row::SheetRow;
use crate::config::settings::ImportSettings;
use crate::error::ImportError;

// Header cells are never read as serial dates.
const NO_SERIAL_WINDOW: Range<f64> = 0.0..0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    // Anything calamine opens: xlsx, xlsm, xlsb, xls, ods.
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "xla" | "xlam" | "ods" => Ok(SourceFormat::Workbook),
            "csv" | "txt" => Ok(SourceFormat::Csv),
            other => Err(ImportError::UnsupportedFormat(format!(
                "'{}' (extension '{}')",
                path.display(),
                other
            ))),
        }
    }
}

// Header texts plus data rows tagged with their 1-based source line.
struct SheetTable {
    headers: Vec<String>,
    rows: Vec<(usize, Vec<CellValue>)>,
}

pub struct WorkbookParser {
    settings: ImportSettings,
}

impl WorkbookParser {
    pub fn new(settings: ImportSettings) -> Self {
        WorkbookParser { settings }
    }

    /// Reads the file and parses it. The format is picked from the extension.
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseResult, ImportError> {
        let path = path.as_ref();
        let format = SourceFormat::from_path(path)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ImportError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), bytes = bytes.len(), ?format, "Spreadsheet file read");
        self.parse_bytes(&bytes, format)
    }

    pub fn parse_bytes(&self, bytes: &[u8], format: SourceFormat) -> Result<ParseResult, ImportError> {
        let table = match format {
            SourceFormat::Workbook => self.read_workbook(bytes)?,
            SourceFormat::Csv => self.read_csv(bytes)?,
        };
        Ok(self.process_table(table))
    }

    fn read_workbook(&self, bytes: &[u8]) -> Result<SheetTable, ImportError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::EmptyWorkbook("the workbook has no worksheets".to_string()))??;

        if range.height() < 2 {
            return Err(ImportError::EmptyWorkbook(
                "the first worksheet has no rows below the header".to_string(),
            ));
        }

        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let window = self.settings.serial_date_range();
        let mut rows = range.rows();

        let headers: Vec<String> = rows
            .next()
            .map(|cells| cells.iter().map(header_text).collect())
            .unwrap_or_default();

        let rows = rows
            .enumerate()
            .map(|(offset, cells)| {
                // +1 for the header row, +1 for 1-based numbering
                let line = first_row + offset + 2;
                let values: Vec<CellValue> = cells.iter().map(|cell| CellValue::from_data(cell, &window)).collect();
                (line, values)
            })
            .collect();

        Ok(SheetTable { headers, rows })
    }

    fn read_csv(&self, bytes: &[u8]) -> Result<SheetTable, ImportError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let delimiter = self
            .settings
            .csv_delimiter
            .map(|c| c as u8)
            .unwrap_or_else(|| sniff_delimiter(bytes));
        debug!(delimiter = %(delimiter as char), "Reading CSV input");

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(bytes);

        let mut headers: Option<Vec<String>> = None;
        let mut rows: Vec<(usize, Vec<CellValue>)> = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let record = record?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);
            if headers.is_none() {
                headers = Some(record.iter().map(|h| decode_field(h).trim().to_string()).collect());
                continue;
            }
            rows.push((line, record.iter().map(|f| CellValue::from(decode_field(f))).collect()));
        }

        let headers = headers.ok_or_else(|| ImportError::EmptyWorkbook("the CSV file is empty".to_string()))?;
        if rows.is_empty() {
            return Err(ImportError::EmptyWorkbook(
                "the CSV file has no rows below the header".to_string(),
            ));
        }
        Ok(SheetTable { headers, rows })
    }

    fn process_table(&self, table: SheetTable) -> ParseResult {
        let aglutinated = detect_aglutinated_column(&table.headers);
        if let Some(column) = &aglutinated {
            info!(column = %column.header, "First column holds merged PV/NF values");
        }
        let ctx = RowContext {
            aglutinated,
            max_assignee_columns: self.settings.max_assignee_columns,
        };

        let mut result = ParseResult::default();
        let mut blank_rows = 0usize;
        for (line, values) in table.rows {
            let mut row = SheetRow::new();
            for (col, value) in values.into_iter().enumerate() {
                let header = table.headers.get(col).cloned().unwrap_or_default();
                row.push(header, value);
            }
            if row.is_blank() {
                blank_rows += 1;
                continue;
            }
            let processed = process_row(&row, line, &ctx);
            result.errors.extend(processed.errors);
            result.rows.push(processed.row);
        }

        info!(
            rows = result.rows.len(),
            errors = result.errors.len(),
            blank_rows,
            "Spreadsheet parsed"
        );
        result
    }
}

fn header_text(cell: &Data) -> String {
    CellValue::from_data(cell, &NO_SERIAL_WINDOW)
        .as_text()
        .unwrap_or_default()
}

// Picks whichever of ';', ',' or tab shows up most in the first line. ',' on ties.
// UTF-8 when valid, otherwise Latin-1 (Windows spreadsheet exports).
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes.split(|b| *b == b'\n').next().unwrap_or_default();
    [b',', b';', b'\t']
        .into_iter()
        .map(|d| (d, first_line.iter().filter(|b| **b == d).count()))
        .fold((b',', 0), |best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .0
}
