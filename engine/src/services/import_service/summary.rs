// Review summary for a parsed import.
use serde::Serialize;
use shared::models::{DeliveryStatus, ParseResult, ParsedRow};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub error_count: usize,
    // Rows with parsing errors or without a document code.
    pub rows_needing_review: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub rows_without_status: usize,
    pub total_value: f64,
}

impl ImportSummary {
    pub fn from_result(result: &ParseResult) -> Self {
        let mut summary = ImportSummary {
            total_rows: result.rows.len(),
            error_count: result.errors.len(),
            ..Default::default()
        };
        for status in DeliveryStatus::ALL {
            summary.status_counts.insert(status.as_str().to_string(), 0);
        }

        for row in &result.rows {
            if needs_review(row) {
                summary.rows_needing_review += 1;
            }
            match row.status {
                Some(status) => *summary.status_counts.entry(status.as_str().to_string()).or_insert(0) += 1,
                None => summary.rows_without_status += 1,
            }
            summary.total_value += row.value.unwrap_or(0.0);
        }
        summary
    }
}

pub fn needs_review(row: &ParsedRow) -> bool {
    !row.parsing_errors.is_empty() || row.document.as_deref().map_or(true, str::is_empty)
}
