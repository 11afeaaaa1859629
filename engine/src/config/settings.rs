// Import settings, loaded from an optional JSON file. Every field has a default so
// a partial file (or no file at all) is valid.
use serde::Deserialize;
use std::fs;
use std::ops::Range;
use std::path::Path;

use crate::error::ImportError;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ImportSettings {
    // Plain numeric cells inside [serial_date_min, serial_date_max) are treated as
    // Excel serial dates by the workbook reader.
    pub serial_date_min: f64,
    pub serial_date_max: f64,
    // Numbered assignee columns read per row (montador_1 ..= montador_N).
    pub max_assignee_columns: usize,
    // CSV input only. None means sniff between ';', ',' and tab.
    pub csv_delimiter: Option<char>,
    pub log_filter: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        ImportSettings {
            serial_date_min: 10_000.0,
            serial_date_max: 100_000.0,
            max_assignee_columns: 7,
            csv_delimiter: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ImportSettings {
    pub fn load_from_path(path: &Path) -> Result<Self, ImportError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ImportError::ConfigError(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let settings: ImportSettings = serde_json::from_str(&raw).map_err(|e| {
            ImportError::ConfigError(format!("Invalid config file '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads from `path` when given, otherwise falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ImportError> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ImportError> {
        if !(self.serial_date_min < self.serial_date_max) {
            return Err(ImportError::ConfigError(format!(
                "serial_date_min ({}) must be lower than serial_date_max ({})",
                self.serial_date_min, self.serial_date_max
            )));
        }
        if self.max_assignee_columns < 2 {
            return Err(ImportError::ConfigError(
                "max_assignee_columns must be at least 2".to_string(),
            ));
        }
        if let Some(delimiter) = self.csv_delimiter {
            if !delimiter.is_ascii() {
                return Err(ImportError::ConfigError(format!(
                    "csv_delimiter must be an ASCII character, got '{}'",
                    delimiter
                )));
            }
        }
        Ok(())
    }

    pub fn serial_date_range(&self) -> Range<f64> {
        self.serial_date_min..self.serial_date_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = ImportSettings::default();
        assert_eq!(settings.serial_date_range(), 10_000.0..100_000.0);
        assert_eq!(settings.max_assignee_columns, 7);
        assert_eq!(settings.csv_delimiter, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "csv_delimiter": ";", "log_filter": "debug" }}"#).unwrap();
        let settings = ImportSettings::load_from_path(file.path()).unwrap();
        assert_eq!(settings.csv_delimiter, Some(';'));
        assert_eq!(settings.log_filter, "debug");
        assert_eq!(settings.max_assignee_columns, 7);
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(ImportSettings::load(None).unwrap(), ImportSettings::default());
    }

    #[test]
    fn test_invalid_range_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "serial_date_min": 5000, "serial_date_max": 100 }}"#).unwrap();
        let err = ImportSettings::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("serial_date_min"));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        let err = ImportSettings::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::ConfigError(_)));
    }
}
