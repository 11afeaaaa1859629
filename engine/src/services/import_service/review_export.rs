// Writes parsed rows to a CSV sheet an operator can review (and fix) before the
// rows are submitted to the backend.
use csv::WriterBuilder;
use serde::Serialize;
use shared::models::{ParseResult, ParsedRow};
use std::io::Write;
use std::path::Path;

use super::summary::needs_review;
use crate::error::ImportError;

#[derive(Debug, Serialize)]
struct ReviewRecord<'a> {
    needs_review: bool,
    pv_foco: Option<&'a str>,
    nf: Option<&'a str>,
    valor: Option<f64>,
    cliente: Option<&'a str>,
    uf: Option<&'a str>,
    data_saida: Option<String>,
    motorista: Option<&'a str>,
    carro: Option<&'a str>,
    tipo_transporte: Option<&'a str>,
    status: Option<&'static str>,
    precisa_montagem: Option<bool>,
    data_montagem: Option<String>,
    montador_1: Option<&'a str>,
    montador_2: Option<&'a str>,
    gastos_entrega: Option<f64>,
    gastos_montagem: Option<f64>,
    produtividade: Option<f64>,
    erros: Option<&'a str>,
    descricao_erros: Option<&'a str>,
    percentual_gastos: Option<f64>,
    parsing_errors: String,
}

impl<'a> From<&'a ParsedRow> for ReviewRecord<'a> {
    fn from(row: &'a ParsedRow) -> Self {
        ReviewRecord {
            needs_review: needs_review(row),
            pv_foco: row.purchase_order.as_deref(),
            nf: row.document.as_deref(),
            valor: row.value,
            cliente: row.client.as_deref(),
            uf: row.state.as_deref(),
            data_saida: row.departure_date.map(|d| d.format("%Y-%m-%d").to_string()),
            motorista: row.driver.as_deref(),
            carro: row.vehicle.as_deref(),
            tipo_transporte: row.transport_type.as_deref(),
            status: row.status.map(|s| s.as_str()),
            precisa_montagem: row.assembly_required,
            data_montagem: row.assembly_date.map(|d| d.format("%Y-%m-%d").to_string()),
            montador_1: row.assignee_1.as_deref(),
            montador_2: row.assignee_2.as_deref(),
            gastos_entrega: row.delivery_expense,
            gastos_montagem: row.assembly_expense,
            produtividade: row.productivity,
            erros: row.error_tag.as_deref(),
            descricao_erros: row.error_description.as_deref(),
            percentual_gastos: row.expense_percentage,
            parsing_errors: row.parsing_errors.join(" | "),
        }
    }
}

pub fn write_review<W: Write>(result: &ParseResult, writer: W) -> Result<(), ImportError> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
    for row in &result.rows {
        wtr.serialize(ReviewRecord::from(row))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_review_csv(result: &ParseResult, path: &Path) -> Result<(), ImportError> {
    let file = std::fs::File::create(path)?;
    write_review(result, file)?;
    tracing::info!(path = %path.display(), rows = result.rows.len(), "Review sheet written");
    Ok(())
}
