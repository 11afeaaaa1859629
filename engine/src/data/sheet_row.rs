// One spreadsheet row, addressed by normalized header keys.
use super::cell::CellValue;
use crate::normalize::normalize_header;

#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    // Header text as it appears in the sheet.
    pub header: String,
    // `normalize_header(header)`
    pub key: String,
    pub value: CellValue,
}

/// Substring heuristic over header keys: every `all` token must appear and no
/// `none` token may appear. Used when no alias matched exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderTokens {
    pub all: &'static [&'static str],
    pub none: &'static [&'static str],
}

impl HeaderTokens {
    pub fn matches(&self, key: &str) -> bool {
        !key.is_empty()
            && self.all.iter().all(|token| key.contains(token))
            && !self.none.iter().any(|token| key.contains(token))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    cells: Vec<SheetCell>,
}

impl SheetRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from `(header, value)` pairs in column order.
    pub fn from_pairs<H, V>(pairs: impl IntoIterator<Item = (H, V)>) -> Self
    where
        H: Into<String>,
        V: Into<CellValue>,
    {
        let mut row = SheetRow::new();
        for (header, value) in pairs {
            row.push(header, value);
        }
        row
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<CellValue>) {
        let header = header.into();
        let key = normalize_header(&header);
        self.cells.push(SheetCell {
            header,
            key,
            value: value.into(),
        });
    }

    pub fn cell_at(&self, index: usize) -> Option<&SheetCell> {
        self.cells.get(index)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_empty())
    }

    /// Returns the first non-empty value among the candidate keys.
    ///
    /// `variations` is in precedence order: every exact key match is tried first,
    /// then a case-insensitive scan against the raw header text.
    pub fn find_value_by_variations<S: AsRef<str>>(&self, variations: &[S]) -> Option<&CellValue> {
        for variation in variations {
            let wanted = variation.as_ref();
            if let Some(cell) = self
                .cells
                .iter()
                .find(|cell| cell.key == wanted && !cell.value.is_empty())
            {
                return Some(&cell.value);
            }
        }

        for variation in variations {
            let wanted = variation.as_ref().trim().to_lowercase();
            if wanted.is_empty() {
                continue;
            }
            if let Some(cell) = self.cells.iter().find(|cell| {
                !cell.value.is_empty()
                    && (cell.header.trim().to_lowercase() == wanted || cell.key == normalize_header(&wanted))
            }) {
                return Some(&cell.value);
            }
        }
        None
    }

    pub fn find_by_header_tokens(&self, tokens: &HeaderTokens) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|cell| !cell.value.is_empty() && tokens.matches(&cell.key))
            .map(|cell| &cell.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SheetRow {
        SheetRow::from_pairs(vec![
            ("Nota Fiscal", CellValue::from("123")),
            ("NF", CellValue::Empty),
            ("Valor Total", CellValue::Number(1500.0)),
            ("Data de Saída", CellValue::from("15/03/2024")),
            ("Data Montagem", CellValue::from("16/03/2024")),
        ])
    }

    #[test]
    fn test_exact_key_precedence() {
        let row = sample_row();
        // "nf" is present but empty, so the next variation wins
        assert_eq!(
            row.find_value_by_variations(&["nf", "nota_fiscal"]),
            Some(&CellValue::from("123"))
        );
        assert_eq!(
            row.find_value_by_variations(&["valor_total", "valor"]),
            Some(&CellValue::Number(1500.0))
        );
    }

    #[test]
    fn test_case_insensitive_fallback() {
        let row = sample_row();
        assert_eq!(
            row.find_value_by_variations(&["VALOR TOTAL"]),
            Some(&CellValue::Number(1500.0))
        );
        assert_eq!(
            row.find_value_by_variations(&["Data de Saída"]),
            Some(&CellValue::from("15/03/2024"))
        );
    }

    #[test]
    fn test_no_match() {
        let row = sample_row();
        assert_eq!(row.find_value_by_variations(&["cliente", "destinatario"]), None);
        assert_eq!(row.find_value_by_variations::<&str>(&[]), None);
    }

    #[test]
    fn test_header_token_heuristic() {
        let row = sample_row();
        let departure = HeaderTokens { all: &["data", "saida"], none: &[] };
        assert_eq!(row.find_by_header_tokens(&departure), Some(&CellValue::from("15/03/2024")));

        let assembly_flag = HeaderTokens { all: &["montagem"], none: &["data"] };
        assert_eq!(row.find_by_header_tokens(&assembly_flag), None);
    }

    #[test]
    fn test_blank_row() {
        let blank = SheetRow::from_pairs(vec![("A", CellValue::Empty), ("B", CellValue::from("  "))]);
        assert!(blank.is_blank());
        assert!(!sample_row().is_blank());
        assert!(SheetRow::new().is_blank());
    }
}
