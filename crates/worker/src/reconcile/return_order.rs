//! Building and submitting WMS return orders.

use chrono::NaiveDateTime;
use tracing::{debug, instrument};

use return_sync_core::{
    NewReturnOrder, NewReturnOrderLine, ReturnDetail, WarehouseOrder, WmsReturnOrderId,
};

use crate::config::WarehouseIntegration;
use crate::error::ReconcileError;
use crate::reconcile::{PlatformApi, WarehouseApi, causes};

/// Column headers of the comment table shown to warehouse staff.
const COMMENT_HEADERS: [&str; 4] = ["SKU", "Return Type", "Return Reason", "Customer Comment"];

/// Timestamp suffix appended to return-order and row numbers, which keeps
/// re-submissions of the same order distinguishable in the WMS UI.
const NUMBER_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A return order ready for submission, plus the retailer detail ids that
/// produced its lines (the ids the mapping record covers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltReturnOrder {
    pub order: NewReturnOrder,
    pub matched_detail_ids: Vec<String>,
}

/// Convert a return request into WMS return-order lines.
///
/// A line is emitted only for details present in both the WMS order and
/// the request, matched by the retailer's order detail id. Unmatched
/// return details produce no line and no error - a long-standing quirk the
/// retailer platform relies on, not something to fix here.
///
/// # Errors
///
/// Returns `ReconcileError::UnknownReturnCause` if any matched detail
/// carries a `return_type` outside the taxonomy.
pub fn build(
    order: &WarehouseOrder,
    return_details: &[ReturnDetail],
    submitted_at: NaiveDateTime,
) -> Result<BuiltReturnOrder, ReconcileError> {
    let stamp = submitted_at.format(NUMBER_STAMP_FORMAT);

    let mut lines = Vec::new();
    let mut comment_rows = Vec::new();
    let mut matched_detail_ids = Vec::new();

    for order_line in &order.lines {
        let Some(detail) = return_details
            .iter()
            .find(|detail| detail.ext_order_detail_id == order_line.external_detail_id)
        else {
            continue;
        };

        let cause = causes::cause_for_return_type(&detail.return_type)?;
        lines.push(NewReturnOrderLine {
            row_number: format!("{} - {stamp}", order_line.line_id),
            order_line_id: order_line.line_id,
            quantity: detail.amount,
            cause,
        });
        comment_rows.push([
            detail.sku_number.clone(),
            detail.return_type.clone(),
            detail.reason.clone(),
            detail.comment.clone(),
        ]);
        matched_detail_ids.push(detail.ext_order_detail_id.clone());
    }

    Ok(BuiltReturnOrder {
        order: NewReturnOrder {
            order_id: order.id,
            return_order_number: format!("{} - {stamp}", order.id),
            lines,
            comment: comment_table(&comment_rows),
        },
        matched_detail_ids,
    })
}

/// Build the return order, submit it to the WMS, and record the mapping.
///
/// Submission is one atomic WMS call. The mapping write happens
/// immediately after and must succeed: a WMS return order with no recorded
/// link can never be traced back when the inspection webhook fires, so a
/// failed write fails the whole item even though the WMS side succeeded.
///
/// # Errors
///
/// Returns `ReconcileError` on unknown cause, WMS failure, or mapping
/// write failure.
#[instrument(
    skip(warehouse, platform, integration, order, return_details),
    fields(retailer_id = %integration.retailer_id, order_id = %order.id)
)]
pub async fn build_and_submit<W, P>(
    warehouse: &W,
    platform: &P,
    integration: &WarehouseIntegration,
    order: &WarehouseOrder,
    return_details: &[ReturnDetail],
    submitted_at: NaiveDateTime,
) -> Result<WmsReturnOrderId, ReconcileError>
where
    W: WarehouseApi + ?Sized,
    P: PlatformApi + ?Sized,
{
    let built = build(order, return_details, submitted_at)?;
    // duplicate external_detail_ids on the WMS side can match one detail
    // more than once, so the matched count may exceed the request's
    debug!(
        lines = built.order.lines.len(),
        dropped = return_details.len().saturating_sub(built.matched_detail_ids.len()),
        "built return order"
    );

    let return_order_id = warehouse.create_return_order(integration, &built.order).await?;

    platform
        .record_return_order_mapping(
            integration.retailer_id,
            return_order_id,
            &order.external_order_id,
            &built.matched_detail_ids,
        )
        .await
        .map_err(ReconcileError::MappingRecord)?;

    Ok(return_order_id)
}

/// Render a fixed-width table summarizing the request for warehouse staff.
fn comment_table(rows: &[[String; 4]]) -> String {
    let mut widths = COMMENT_HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let rule: String = widths
        .iter()
        .map(|width| format!("+{}", "-".repeat(width + 2)))
        .chain(std::iter::once("+".to_string()))
        .collect();

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, &width)| format!("| {cell:<width$} "))
            .chain(std::iter::once("|".to_string()))
            .collect()
    };

    let header_cells: Vec<String> = COMMENT_HEADERS.iter().map(ToString::to_string).collect();
    let mut out = vec![rule.clone(), render_row(&header_cells), rule.clone()];
    for row in rows {
        out.push(render_row(row.as_slice()));
    }
    out.push(rule);
    out.join("\n")
}
