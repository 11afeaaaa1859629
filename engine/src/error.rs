use std::path::PathBuf;
use thiserror::Error;

// Fatal import errors. Problems with individual cells are never reported through
// this type; they become `ParsingError` entries on the parse result instead.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to read spreadsheet file '{}': {source}", .path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook decoding error: {source}")]
    WorkbookError {
        #[from]
        source: calamine::Error,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("Spreadsheet has no data rows: {0}")]
    EmptyWorkbook(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl ImportError {
    /// Whether the error came from the input file itself rather than from the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ImportError::UnsupportedFormat(_)
                | ImportError::WorkbookError { .. }
                | ImportError::CsvSystemError { .. }
                | ImportError::EmptyWorkbook(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_read_error_message_includes_path() {
        let err = ImportError::FileReadError {
            path: PathBuf::from("/tmp/entregas.xlsx"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/entregas.xlsx"));
        assert!(message.contains("not found"));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_empty_workbook_is_input_error() {
        let err = ImportError::EmptyWorkbook("only a header row".to_string());
        assert!(err.is_input_error());
        assert_eq!(err.to_string(), "Spreadsheet has no data rows: only a header row");
    }
}
