// services/import_service/mod.rs
// ImportService runs the workbook parser for one file and bundles the result with
// a review summary. The insert into the backend happens elsewhere, after review.
use std::path::Path;

use shared::models::ParseResult;

use crate::config::settings::ImportSettings;
use crate::data::workbook::WorkbookParser;
use crate::error::ImportError;

pub mod review_export;
pub mod summary;

pub use summary::ImportSummary;

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub result: ParseResult,
    pub summary: ImportSummary,
}

pub struct ImportService {
    parser: WorkbookParser,
}

impl ImportService {
    pub fn new(settings: ImportSettings) -> Self {
        ImportService {
            parser: WorkbookParser::new(settings),
        }
    }

    pub async fn import_file(&self, path: &Path) -> Result<ImportOutcome, ImportError> {
        tracing::info!(path = %path.display(), "Import requested");

        let result = match self.parser.parse_file(path).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    input_error = e.is_input_error(),
                    "Import aborted"
                );
                return Err(e);
            }
        };

        let summary = ImportSummary::from_result(&result);
        if summary.rows_needing_review > 0 {
            tracing::warn!(
                path = %path.display(),
                rows_needing_review = summary.rows_needing_review,
                "Some rows need review before they can be inserted"
            );
        }
        tracing::info!(
            path = %path.display(),
            rows = summary.total_rows,
            errors = summary.error_count,
            "Import finished"
        );
        Ok(ImportOutcome { result, summary })
    }
}
