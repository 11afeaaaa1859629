// Turns one spreadsheet row into a `ParsedRow`.
//
// Missing or malformed values resolve to `None`. The only row-local error raised
// here is an unsplittable merged PV+NF cell.
use shared::models::{ParsedRow, ParsingError};

use super::aglutinated::{split_pv_nf, AglutinatedColumn};
use super::aliases::Field;
use super::assignees::{collect_assignees, merge_note};
use super::cell::CellValue;
use super::derived::calculate_percentual_gastos;
use super::sheet_row::SheetRow;
use crate::normalize::{
    normalize_boolean, normalize_date, normalize_number, normalize_status, normalize_text, TextCase,
};

/// Per-workbook context shared by every row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowContext {
    pub aglutinated: Option<AglutinatedColumn>,
    pub max_assignee_columns: usize,
}

impl Default for RowContext {
    fn default() -> Self {
        RowContext {
            aglutinated: None,
            max_assignee_columns: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRow {
    pub row: ParsedRow,
    pub errors: Vec<ParsingError>,
}

/// Looks a field up by its aliases, then by its header-token heuristic.
fn resolve<'a>(row: &'a SheetRow, field: Field) -> Option<&'a CellValue> {
    row.find_value_by_variations(field.aliases()).or_else(|| {
        field
            .header_tokens()
            .and_then(|tokens| row.find_by_header_tokens(&tokens))
    })
}

fn resolve_text(row: &SheetRow, field: Field, case: TextCase) -> Option<String> {
    resolve(row, field).and_then(|value| normalize_text(value, case))
}

fn resolve_number(row: &SheetRow, field: Field) -> Option<f64> {
    resolve(row, field).and_then(normalize_number)
}

/// `line` is the 1-based spreadsheet line the row came from.
pub fn process_row(row: &SheetRow, line: usize, ctx: &RowContext) -> ProcessedRow {
    let mut parsed = ParsedRow::default();
    let mut errors = Vec::new();

    // 1. Purchase order / document code
    match &ctx.aglutinated {
        Some(column) => {
            let merged = row.cell_at(0).and_then(|cell| cell.value.as_text());
            if let Some(merged) = merged {
                match split_pv_nf(&merged) {
                    Ok(split) => {
                        parsed.purchase_order = Some(split.purchase_order);
                        parsed.document = (!split.document.is_empty()).then_some(split.document);
                    }
                    Err(message) => {
                        tracing::debug!(line, column = %column.header, "Unsplittable PV/NF value");
                        errors.push(ParsingError {
                            line,
                            field: Some(column.header.clone()),
                            message,
                        });
                    }
                }
            }
        }
        None => {
            parsed.purchase_order = resolve_text(row, Field::PurchaseOrder, TextCase::AsIs);
            parsed.document = resolve_text(row, Field::Document, TextCase::AsIs);
        }
    }

    // 2. Scalar business fields
    parsed.value = resolve_number(row, Field::Value);
    parsed.client = resolve_text(row, Field::Client, TextCase::AsIs);
    parsed.state = resolve_text(row, Field::State, TextCase::Upper);
    parsed.departure_date = resolve(row, Field::DepartureDate).and_then(normalize_date);
    parsed.driver = resolve_text(row, Field::Driver, TextCase::Title);
    parsed.vehicle = resolve_text(row, Field::Vehicle, TextCase::AsIs);
    parsed.transport_type = resolve_text(row, Field::TransportType, TextCase::AsIs);
    parsed.status = resolve(row, Field::Status).and_then(normalize_status);
    parsed.assembly_required = resolve(row, Field::AssemblyRequired).and_then(normalize_boolean);
    parsed.assembly_date = resolve(row, Field::AssemblyDate).and_then(normalize_date);

    // 3. Assignees
    let assignees = collect_assignees(row, ctx.max_assignee_columns);
    parsed.assignee_1 = assignees.first;
    parsed.assignee_2 = assignees.second;

    // 4. Expenses and productivity
    parsed.delivery_expense = resolve_number(row, Field::DeliveryExpense);
    parsed.assembly_expense = resolve_number(row, Field::AssemblyExpense);
    parsed.productivity = resolve_number(row, Field::Productivity);

    // 5. Error tag / description. The generic notes column only fills in when
    // neither an error description nor an assignee overflow note exists.
    parsed.error_tag = resolve_text(row, Field::ErrorTag, TextCase::AsIs);
    let explicit = resolve_text(row, Field::ErrorDescription, TextCase::AsIs);
    parsed.error_description = merge_note(explicit, assignees.overflow_note)
        .or_else(|| resolve_text(row, Field::Description, TextCase::AsIs));

    // 6. Expense percentage
    parsed.expense_percentage = calculate_percentual_gastos(
        resolve_number(row, Field::ExpensePercentage),
        parsed.delivery_expense,
        parsed.assembly_expense,
        parsed.value,
    );

    parsed.parsing_errors = errors.iter().map(|e| e.message.clone()).collect();
    ProcessedRow { row: parsed, errors }
}
