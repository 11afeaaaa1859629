// Derived numeric fields.
use super::cell::CellValue;
use crate::normalize::normalize_number;

/// Expense percentage of the delivery value.
///
/// An explicit percentage from the sheet is passed through. Otherwise
/// `(delivery + assembly) / value * 100`, with absent expenses counted as zero,
/// and `None` when the value is missing or zero.
pub fn calculate_percentual_gastos(
    existing: Option<f64>,
    delivery_expense: Option<f64>,
    assembly_expense: Option<f64>,
    value: Option<f64>,
) -> Option<f64> {
    if existing.is_some() {
        return existing;
    }
    let value = value.filter(|v| *v != 0.0)?;
    let expenses = delivery_expense.unwrap_or(0.0) + assembly_expense.unwrap_or(0.0);
    let percentage = expenses * 100.0 / value;
    percentage.is_finite().then_some(percentage)
}

/// `unit_price * quantity` rounded to cents. Zero whenever either side is
/// missing, zero or unparsable.
pub fn compute_safe_valor_total(unit_price: &CellValue, quantity: &CellValue) -> f64 {
    let (Some(price), Some(quantity)) = (normalize_number(unit_price), normalize_number(quantity)) else {
        return 0.0;
    };
    let total = price * quantity;
    if !total.is_finite() {
        return 0.0;
    }
    (total * 100.0).round() / 100.0
}
