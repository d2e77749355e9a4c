//! Order export normalization.

use crate::coerce::{coerce_date, coerce_number};
use crate::resolve::FieldResolver;
use crate::types::{AdmissionStats, OrderRecord, RawRow};

use super::{fold_outcomes, SkipReason};

const ORDER_ID: &[&str] = &["Invoice Number", "Order ID"];
const ORDER_DATE: &[&str] = &["Creation Date", "Order Date"];
const ORDER_STATUS: &[&str] = &["Order Status", "Status"];
const PAID_AMOUNT: &[&str] = &["Paid Amount", "Paid Amount (BDT)"];
const DUE_AMOUNT: &[&str] = &["Due Amount", "Due Amount (BDT)"];
const CONVERSATION_ID: &[&str] = &["Conversation ID"];

/// Normalize an orders source, returning emitted records plus statistics.
pub fn normalize_orders_rows(rows: &[RawRow]) -> (Vec<OrderRecord>, AdmissionStats) {
    fold_outcomes(rows.iter().map(normalize_order_row))
}

/// Normalize one raw order-export row.
///
/// `order_id` and `order_date` are required — a row missing either is
/// dropped. Monetary columns default to 0 instead: missing money is
/// business-valid (unpaid orders).
pub fn normalize_order_row(row: &RawRow) -> Result<OrderRecord, SkipReason> {
    let fields = FieldResolver::new(row);

    let order_id = fields
        .resolve_text(ORDER_ID)
        .ok_or(SkipReason::MissingOrderId)?;
    let order_date = fields
        .resolve(ORDER_DATE)
        .and_then(coerce_date)
        .ok_or(SkipReason::UnparseableDate)?;

    Ok(OrderRecord {
        order_id,
        order_date,
        order_status: fields.resolve_text(ORDER_STATUS).unwrap_or_default(),
        paid_amount_bdt: monetary(&fields, PAID_AMOUNT),
        due_amount_bdt: monetary(&fields, DUE_AMOUNT),
        conversation_id: fields.resolve_text(CONVERSATION_ID),
    })
}

fn monetary(fields: &FieldResolver<'_>, candidates: &[&str]) -> f64 {
    fields
        .resolve(candidates)
        .and_then(coerce_number)
        .filter(|n| *n >= 0.0)
        .unwrap_or(0.0)
}
