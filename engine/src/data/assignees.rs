// Numbered assignee ("montador") columns. Two fit the record; the rest are kept
// as a note in the error description.
use super::aliases::assignee_aliases;
use super::sheet_row::SheetRow;
use crate::normalize::{normalize_text, TextCase};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignees {
    pub first: Option<String>,
    pub second: Option<String>,
    pub overflow_note: Option<String>,
}

pub fn collect_assignees(row: &SheetRow, max_columns: usize) -> Assignees {
    let mut names: Vec<String> = (1..=max_columns)
        .filter_map(|n| row.find_value_by_variations(&assignee_aliases(n)))
        .filter_map(|value| normalize_text(value, TextCase::Title))
        .collect();

    let overflow = if names.len() > 2 { names.split_off(2) } else { Vec::new() };
    let mut names = names.into_iter();

    Assignees {
        first: names.next(),
        second: names.next(),
        overflow_note: (!overflow.is_empty())
            .then(|| format!("Additional assignees: {}", overflow.join(", "))),
    }
}

/// Appends `note` to an existing description, period-separated.
pub fn merge_note(description: Option<String>, note: Option<String>) -> Option<String> {
    match (description, note) {
        (Some(existing), Some(note)) => {
            let existing = existing.trim_end().trim_end_matches('.');
            Some(format!("{}. {}", existing, note))
        }
        (existing, None) => existing,
        (None, note) => note,
    }
}
