// Merged "PV + NF" column support. Some exports put the purchase order and the
// invoice/document code into the first column, e.g. "1234 DECLARAÇÃO".
use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize_header;

static PV_NF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // An optional leading "PV" token is tolerated: "PV 1234 DECLARAÇÃO".
    Regex::new(r"(?i)^(?:pv\s*)?(\d+)\s+(.*)$").expect("PV/NF pattern is valid")
});

/// The detected merged column: always the sheet's first column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AglutinatedColumn {
    pub header: String,
}

/// Detects a merged PV+NF first column.
///
/// The first header must mention "pv" or "foco", and no other header may look
/// like a separate invoice column ("nf" or "nota").
pub fn detect_aglutinated_column(headers: &[String]) -> Option<AglutinatedColumn> {
    let (first, rest) = headers.split_first()?;
    let first_key = normalize_header(first);
    if !(first_key.contains("pv") || first_key.contains("foco")) {
        return None;
    }
    let has_invoice_column = rest.iter().any(|header| {
        let key = normalize_header(header);
        key.contains("nf") || key.contains("nota")
    });
    if has_invoice_column {
        return None;
    }
    Some(AglutinatedColumn {
        header: first.clone(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PvNf {
    pub purchase_order: String,
    pub document: String,
}

/// Splits a merged cell into purchase order and document code.
///
/// Returns the message for a row-local parsing error when the value has no
/// leading digits followed by whitespace.
pub fn split_pv_nf(raw: &str) -> Result<PvNf, String> {
    let value = raw.trim();
    let captures = PV_NF_PATTERN.captures(value).ok_or_else(|| {
        format!(
            "Could not split PV/NF value '{}': expected the order number followed by the document code",
            value
        )
    })?;
    Ok(PvNf {
        purchase_order: captures[1].to_string(),
        document: captures[2].trim().to_string(),
    })
}
