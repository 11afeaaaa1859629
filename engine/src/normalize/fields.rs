// Field extractors: raw cell values to typed domain values.
//
// None of these fail. Anything that can't be interpreted becomes `None` and the
// row carries on; an operator reviews the import before anything is inserted.
use chrono::{Datelike, Days, NaiveDate};
use shared::models::DeliveryStatus;

use super::header::normalize_header;
use crate::data::cell::CellValue;

// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Free-text boolean tokens, keyed by their header-normalized form.
pub static BOOLEAN_TOKENS: &[(&str, bool)] = &[
    ("sim", true),
    ("s", true),
    ("yes", true),
    ("y", true),
    ("true", true),
    ("verdadeiro", true),
    ("v", true),
    ("x", true),
    ("1", true),
    ("nao", false),
    ("n", false),
    ("no", false),
    ("false", false),
    ("falso", false),
    ("f", false),
    ("0", false),
];

/// Exact status tokens, keyed by their header-normalized form.
pub static STATUS_TOKENS: &[(&str, DeliveryStatus)] = &[
    ("pendente", DeliveryStatus::Pending),
    ("pendentes", DeliveryStatus::Pending),
    ("aguardando", DeliveryStatus::Pending),
    ("aguardando_saida", DeliveryStatus::Pending),
    ("a_entregar", DeliveryStatus::Pending),
    ("em_aberto", DeliveryStatus::Pending),
    ("aberto", DeliveryStatus::Pending),
    ("agendado", DeliveryStatus::Pending),
    ("programado", DeliveryStatus::Pending),
    ("pending", DeliveryStatus::Pending),
    ("em_rota", DeliveryStatus::InRoute),
    ("rota", DeliveryStatus::InRoute),
    ("em_transito", DeliveryStatus::InRoute),
    ("transito", DeliveryStatus::InRoute),
    ("em_entrega", DeliveryStatus::InRoute),
    ("saiu_para_entrega", DeliveryStatus::InRoute),
    ("a_caminho", DeliveryStatus::InRoute),
    ("em_andamento", DeliveryStatus::InRoute),
    ("in_route", DeliveryStatus::InRoute),
    ("entregue", DeliveryStatus::Done),
    ("entregues", DeliveryStatus::Done),
    ("concluido", DeliveryStatus::Done),
    ("concluida", DeliveryStatus::Done),
    ("finalizado", DeliveryStatus::Done),
    ("finalizada", DeliveryStatus::Done),
    ("realizado", DeliveryStatus::Done),
    ("realizada", DeliveryStatus::Done),
    ("ok", DeliveryStatus::Done),
    ("done", DeliveryStatus::Done),
    ("cancelado", DeliveryStatus::Cancelled),
    ("cancelada", DeliveryStatus::Cancelled),
    ("cancelled", DeliveryStatus::Cancelled),
    ("canceled", DeliveryStatus::Cancelled),
];

/// Substring fallbacks for statuses written as free sentences
/// ("entregue ao cliente", "cancelado pelo cliente"). First match wins.
pub static STATUS_KEYWORDS: &[(&str, DeliveryStatus)] = &[
    ("cancel", DeliveryStatus::Cancelled),
    ("entregue", DeliveryStatus::Done),
    ("conclu", DeliveryStatus::Done),
    ("finaliz", DeliveryStatus::Done),
    ("rota", DeliveryStatus::InRoute),
    ("transito", DeliveryStatus::InRoute),
    ("pendent", DeliveryStatus::Pending),
    ("aguard", DeliveryStatus::Pending),
];

/// Tokens that negate a status phrase ("nao_entregue", "not_delivered").
pub static NEGATION_TOKENS: &[&str] = &["nao", "not"];

// Day formats tried in order after the ISO prefix check. Brazilian day-first
// layouts come before the year-first fallback.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d", "%d/%m/%y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextCase {
    #[default]
    AsIs,
    // State codes, plates.
    Upper,
    // Person names.
    Title,
}

pub fn normalize_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) | CellValue::SerialDate(n) => n.is_finite().then_some(*n),
        CellValue::Text(s) => parse_localized_number(s),
        _ => None,
    }
}

// Accepts "222,4444", "1.234,56", "1,234.56", "R$ 1.500,00", "15%".
// The last of '.' / ',' is the decimal separator when both are present.
fn parse_localized_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    let text = text
        .strip_prefix("R$")
        .or_else(|| text.strip_prefix("r$"))
        .unwrap_or(text);
    let text = text.trim().trim_end_matches('%');
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = match (compact.rfind(','), compact.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => compact.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => compact.replace(',', ""),
        (Some(_), None) if compact.matches(',').count() > 1 => compact.replace(',', ""),
        (Some(_), None) => compact.replace(',', "."),
        (None, Some(_)) if compact.matches('.').count() > 1 => compact.replace('.', ""),
        _ => compact,
    };

    // Only plain decimal notation; f64's parser would also take "inf" or "NaN".
    let well_formed = normalized
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+')));
    if !well_formed {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Converts an Excel 1900-system serial day number into a date.
///
/// Uses the 1899-12-30 epoch and drops the time-of-day fraction.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial <= 0.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

pub fn normalize_date(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Number(n) | CellValue::SerialDate(n) => excel_serial_to_date(*n),
        CellValue::Text(s) => parse_date_text(s),
        _ => None,
    }
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    // "2024-03-15", "2024-03-15T10:00:00", "2024-03-15 10:00"
    if let Some(prefix) = text.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            // "%Y" also accepts two-digit years; leave those to "%y".
            if format.contains("%Y") && date.year() < 1000 {
                continue;
            }
            return Some(date);
        }
    }

    // Serial numbers that arrived as text (CSV exports).
    text.parse::<f64>().ok().and_then(excel_serial_to_date)
}

pub fn normalize_text(value: &CellValue, case: TextCase) -> Option<String> {
    let text = value.as_text()?;
    let text = match case {
        TextCase::AsIs => text,
        TextCase::Upper => text.to_uppercase(),
        TextCase::Title => to_title_case(&text),
    };
    Some(text)
}

fn to_title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn normalize_boolean(value: &CellValue) -> Option<bool> {
    match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(n) if *n == 1.0 => Some(true),
        CellValue::Number(n) if *n == 0.0 => Some(false),
        CellValue::Text(s) => lookup(BOOLEAN_TOKENS, &normalize_header(s)),
        _ => None,
    }
}

pub fn normalize_status(value: &CellValue) -> Option<DeliveryStatus> {
    let key = normalize_header(&value.as_text()?);
    if key.is_empty() {
        return None;
    }
    if let Some(status) = lookup(STATUS_TOKENS, &key) {
        return Some(status);
    }
    // "Não entregue", "nao finalizado": no keyword fallback.
    if is_negated(&key) {
        return None;
    }
    STATUS_KEYWORDS
        .iter()
        .find(|(keyword, _)| key.contains(keyword))
        .map(|(_, status)| *status)
}

fn is_negated(key: &str) -> bool {
    key.split('_').any(|word| NEGATION_TOKENS.contains(&word))
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(token, _)| *token == key).map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_normalize_number_decimal_separators() {
        assert_eq!(normalize_number(&text("222,4444")), Some(222.4444));
        assert_eq!(normalize_number(&text("222.4444")), Some(222.4444));
        assert_eq!(normalize_number(&text(" 15 ")), Some(15.0));
        assert_eq!(normalize_number(&CellValue::Number(42.5)), Some(42.5));
    }

    #[test]
    fn test_normalize_number_brazilian_format() {
        assert_eq!(normalize_number(&text("1.234,56")), Some(1234.56));
        assert_eq!(normalize_number(&text("R$ 1.500,00")), Some(1500.0));
        assert_eq!(normalize_number(&text("600.822.115,84")), Some(600822115.84));
        assert_eq!(normalize_number(&text("1,234.56")), Some(1234.56));
        assert_eq!(normalize_number(&text("12,5%")), Some(12.5));
        assert_eq!(normalize_number(&text("-3,5")), Some(-3.5));
    }

    #[test]
    fn test_normalize_number_never_nan() {
        assert_eq!(normalize_number(&text("abc")), None);
        assert_eq!(normalize_number(&text("NaN")), None);
        assert_eq!(normalize_number(&text("inf")), None);
        assert_eq!(normalize_number(&text("")), None);
        assert_eq!(normalize_number(&CellValue::Number(f64::NAN)), None);
        assert_eq!(normalize_number(&CellValue::Empty), None);
        assert_eq!(normalize_number(&CellValue::Bool(true)), None);
    }

    #[test]
    fn test_normalize_number_keeps_serial_window_values() {
        assert_eq!(normalize_number(&CellValue::SerialDate(15000.0)), Some(15000.0));
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45000.0), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(excel_serial_to_date(44197.75), NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(excel_serial_to_date(1.0), NaiveDate::from_ymd_opt(1899, 12, 31));
        assert_eq!(excel_serial_to_date(0.0), None);
        assert_eq!(excel_serial_to_date(-5.0), None);
        assert_eq!(excel_serial_to_date(f64::INFINITY), None);
    }

    #[test]
    fn test_normalize_date_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(normalize_date(&text("2024-03-15")), expected);
        assert_eq!(normalize_date(&text("2024-03-15T08:30:00")), expected);
        assert_eq!(normalize_date(&text("15/03/2024")), expected);
        assert_eq!(normalize_date(&text("15-03-2024")), expected);
        assert_eq!(normalize_date(&text("15.03.2024")), expected);
        assert_eq!(normalize_date(&text("2024/03/15")), expected);
        assert_eq!(normalize_date(&text("15/03/24")), expected);
    }

    #[test]
    fn test_normalize_date_serials_and_garbage() {
        assert_eq!(normalize_date(&CellValue::SerialDate(45000.0)), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(normalize_date(&text("45000")), NaiveDate::from_ymd_opt(2023, 3, 15));
        assert_eq!(normalize_date(&text("amanhã")), None);
        assert_eq!(normalize_date(&text("32/01/2024")), None);
        assert_eq!(normalize_date(&CellValue::Empty), None);
        assert_eq!(normalize_date(&CellValue::Bool(false)), None);
    }

    #[test]
    fn test_normalize_text_modes() {
        assert_eq!(normalize_text(&text("  sp "), TextCase::Upper).as_deref(), Some("SP"));
        assert_eq!(
            normalize_text(&text("joão  DA silva"), TextCase::Title).as_deref(),
            Some("João Da Silva")
        );
        assert_eq!(normalize_text(&text(" Loja Centro "), TextCase::AsIs).as_deref(), Some("Loja Centro"));
        assert_eq!(normalize_text(&text("   "), TextCase::AsIs), None);
        assert_eq!(normalize_text(&CellValue::Number(1234.0), TextCase::AsIs).as_deref(), Some("1234"));
    }

    #[test]
    fn test_normalize_boolean() {
        assert_eq!(normalize_boolean(&text("Sim")), Some(true));
        assert_eq!(normalize_boolean(&text("NÃO")), Some(false));
        assert_eq!(normalize_boolean(&text("yes")), Some(true));
        assert_eq!(normalize_boolean(&text("no")), Some(false));
        assert_eq!(normalize_boolean(&CellValue::Number(1.0)), Some(true));
        assert_eq!(normalize_boolean(&CellValue::Number(0.0)), Some(false));
        assert_eq!(normalize_boolean(&CellValue::Number(3.0)), None);
        assert_eq!(normalize_boolean(&CellValue::Bool(true)), Some(true));
        assert_eq!(normalize_boolean(&text("talvez")), None);
        assert_eq!(normalize_boolean(&CellValue::Empty), None);
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(&text("Pendente")), Some(DeliveryStatus::Pending));
        assert_eq!(normalize_status(&text("Em Rota")), Some(DeliveryStatus::InRoute));
        assert_eq!(normalize_status(&text("Em trânsito")), Some(DeliveryStatus::InRoute));
        assert_eq!(normalize_status(&text("ENTREGUE")), Some(DeliveryStatus::Done));
        assert_eq!(normalize_status(&text("Concluído")), Some(DeliveryStatus::Done));
        assert_eq!(normalize_status(&text("cancelada")), Some(DeliveryStatus::Cancelled));
        assert_eq!(
            normalize_status(&text("Cancelado pelo cliente")),
            Some(DeliveryStatus::Cancelled)
        );
        assert_eq!(normalize_status(&text("???")), None);
        assert_eq!(normalize_status(&text("Não entregue")), None);
        assert_eq!(normalize_status(&text("Não concluído")), None);
        assert_eq!(normalize_status(&text("Pedido não finalizado")), None);
        assert_eq!(normalize_status(&text("Entregue no prazo")), Some(DeliveryStatus::Done));
        assert_eq!(normalize_status(&text("desconhecido")), None);
        assert_eq!(normalize_status(&CellValue::Empty), None);
    }
}
