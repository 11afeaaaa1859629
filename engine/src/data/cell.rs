// Typed cell values. Raw spreadsheet cells (calamine `Data` or CSV text) are
// converted into `CellValue` once, when the row is read; the field extractors
// only ever see this type.
use calamine::Data;
use chrono::NaiveDate;
use std::fmt;
use std::ops::Range;

use crate::normalize::fields::excel_serial_to_date;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    // Cell formatted as a date in the workbook.
    Date(NaiveDate),
    // Plain number that falls inside the serial-date window. The raw number is kept
    // so numeric fields still read it; date fields and display text see the date.
    SerialDate(f64),
}

impl CellValue {
    /// Converts a calamine cell. `serial_window` is the range of plain numbers
    /// treated as Excel serial dates.
    pub fn from_data(cell: &Data, serial_window: &Range<f64>) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(s) => CellValue::from(s.as_str()),
            Data::Int(i) => Self::classify_number(*i as f64, serial_window),
            Data::Float(f) => Self::classify_number(*f, serial_window),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    CellValue::Number(dt.as_f64())
                } else {
                    match excel_serial_to_date(dt.as_f64()) {
                        Some(date) => CellValue::Date(date),
                        None => CellValue::Number(dt.as_f64()),
                    }
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        }
    }

    fn classify_number(value: f64, serial_window: &Range<f64>) -> Self {
        if !value.is_finite() {
            CellValue::Empty
        } else if serial_window.contains(&value) {
            CellValue::SerialDate(value)
        } else {
            CellValue::Number(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display text of the cell, trimmed. `None` for empty cells.
    pub fn as_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::SerialDate(n) => match excel_serial_to_date(*n) {
                Some(d) => write!(f, "{}", d.format("%Y-%m-%d")),
                None => write!(f, "{}", format_number(*n)),
            },
        }
    }
}

// Whole numbers print without a fractional part ("1234", not "1234.0").
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::from(s.as_str())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Range<f64> = 10_000.0..100_000.0;

    #[test]
    fn test_from_data_plain_values() {
        assert_eq!(CellValue::from_data(&Data::Empty, &WINDOW), CellValue::Empty);
        assert_eq!(
            CellValue::from_data(&Data::String("  ".to_string()), &WINDOW),
            CellValue::Empty
        );
        assert_eq!(
            CellValue::from_data(&Data::String("SP".to_string()), &WINDOW),
            CellValue::Text("SP".to_string())
        );
        assert_eq!(CellValue::from_data(&Data::Float(1500.5), &WINDOW), CellValue::Number(1500.5));
        assert_eq!(CellValue::from_data(&Data::Int(7), &WINDOW), CellValue::Number(7.0));
        assert_eq!(CellValue::from_data(&Data::Bool(true), &WINDOW), CellValue::Bool(true));
    }

    #[test]
    fn test_from_data_serial_window() {
        assert_eq!(
            CellValue::from_data(&Data::Float(45000.0), &WINDOW),
            CellValue::SerialDate(45000.0)
        );
        // Upper bound is exclusive
        assert_eq!(
            CellValue::from_data(&Data::Float(100_000.0), &WINDOW),
            CellValue::Number(100_000.0)
        );
        assert_eq!(CellValue::from_data(&Data::Float(9_999.0), &WINDOW), CellValue::Number(9_999.0));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(CellValue::Number(1234.0).as_text().as_deref(), Some("1234"));
        assert_eq!(CellValue::Number(12.5).as_text().as_deref(), Some("12.5"));
        assert_eq!(CellValue::SerialDate(45000.0).as_text().as_deref(), Some("2023-03-15"));
        assert_eq!(CellValue::Text("  abc ".to_string()).as_text().as_deref(), Some("abc"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Empty);
        assert_eq!(CellValue::from(Some(2.5)), CellValue::Number(2.5));
    }
}
