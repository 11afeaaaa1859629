use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Delivery status as stored by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    InRoute,
    Done,
    Cancelled,
}

impl DeliveryStatus {
    pub const ALL: [DeliveryStatus; 4] = [
        DeliveryStatus::Pending,
        DeliveryStatus::InRoute,
        DeliveryStatus::Done,
        DeliveryStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::InRoute => "IN_ROUTE",
            DeliveryStatus::Done => "DONE",
            DeliveryStatus::Cancelled => "CANCELLED",
        }
    }
}

/// One normalized delivery candidate read from a spreadsheet row.
///
/// Every field is optional: spreadsheets are incomplete, and strict validation
/// happens downstream when the record is submitted to the backend. Serialized
/// names match the backend's delivery table columns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParsedRow {
    #[serde(rename = "pv_foco")]
    pub purchase_order: Option<String>,
    #[serde(rename = "nf")]
    pub document: Option<String>,
    #[serde(rename = "valor")]
    pub value: Option<f64>,
    #[serde(rename = "cliente")]
    pub client: Option<String>,
    #[serde(rename = "uf")]
    pub state: Option<String>,
    #[serde(rename = "data_saida")]
    pub departure_date: Option<NaiveDate>,
    #[serde(rename = "motorista")]
    pub driver: Option<String>,
    #[serde(rename = "carro")]
    pub vehicle: Option<String>,
    #[serde(rename = "tipo_transporte")]
    pub transport_type: Option<String>,
    pub status: Option<DeliveryStatus>,
    #[serde(rename = "precisa_montagem")]
    pub assembly_required: Option<bool>,
    #[serde(rename = "data_montagem")]
    pub assembly_date: Option<NaiveDate>,
    #[serde(rename = "montador_1")]
    pub assignee_1: Option<String>,
    #[serde(rename = "montador_2")]
    pub assignee_2: Option<String>,
    #[serde(rename = "gastos_entrega")]
    pub delivery_expense: Option<f64>,
    #[serde(rename = "gastos_montagem")]
    pub assembly_expense: Option<f64>,
    #[serde(rename = "produtividade")]
    pub productivity: Option<f64>,
    #[serde(rename = "erros")]
    pub error_tag: Option<String>,
    #[serde(rename = "descricao_erros")]
    pub error_description: Option<String>,
    #[serde(rename = "percentual_gastos")]
    pub expense_percentage: Option<f64>,
    // Row-local parsing problems, kept with the row for the review screen.
    #[serde(default)]
    pub parsing_errors: Vec<String>,
}

/// A row-local diagnostic. Never stops the other rows from being processed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsingError {
    pub line: usize,
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ParseResult {
    pub rows: Vec<ParsedRow>,
    pub errors: Vec<ParsingError>,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&DeliveryStatus::InRoute).unwrap();
        assert_eq!(json, "\"IN_ROUTE\"");
        for status in DeliveryStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn test_parsed_row_uses_backend_column_names() {
        let row = ParsedRow {
            document: Some("12345".to_string()),
            departure_date: NaiveDate::from_ymd_opt(2024, 3, 15),
            status: Some(DeliveryStatus::Pending),
            ..Default::default()
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["nf"], "12345");
        assert_eq!(value["data_saida"], "2024-03-15");
        assert_eq!(value["status"], "PENDING");
        assert!(value["pv_foco"].is_null());
        assert_eq!(value["parsing_errors"], serde_json::json!([]));
    }

    #[test]
    fn test_parse_result_has_errors() {
        let mut result = ParseResult::default();
        assert!(!result.has_errors());
        result.errors.push(ParsingError {
            line: 2,
            field: None,
            message: "bad".to_string(),
        });
        assert!(result.has_errors());
    }
}
