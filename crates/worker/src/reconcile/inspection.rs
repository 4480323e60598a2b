//! Webhook-driven inspection reconciliation.
//!
//! When warehouse staff register a return against an order line, the WMS
//! fires a pick/return webhook. The reconciler walks the recorded mapping
//! back to the originating retailer request, reads the inspection outcome
//! off the return order, and reports a verdict to the retailer platform.
//! Reporting is terminal; there is no further state transition for an
//! event.

use tracing::{debug, info, instrument};

use return_sync_core::{
    Inspection, InspectionDetail, InspectionResult, WmsOrderId, WmsOrderLineId,
};

use crate::error::ReconcileError;
use crate::ongoing::types::PickWebhookEvent;
use crate::reconcile::{IntegrationResolver, PlatformApi, WarehouseApi};

/// Classify a return-order line by its removed-from-inventory quantity.
///
/// Zero means warehouse staff put the item back into sellable stock -
/// inspection passed. Any nonzero removal means the item was pulled.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn classify(removed_from_inventory: f64) -> InspectionResult {
    if removed_from_inventory == 0.0 {
        InspectionResult::Ok
    } else {
        InspectionResult::NotOk
    }
}

/// Strip the leading token from a warehouse remark.
///
/// Remarks start with an internal code prefix (`220221 kan lagerforas`);
/// only the rest is shown to the retailer.
#[must_use]
pub fn strip_remark_prefix(remark: &str) -> String {
    remark
        .trim()
        .split_once(' ')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

/// Inbound flow: reconcile one WMS pick/return webhook event.
///
/// Every resolution miss - unconfigured goods owner, no recorded mapping,
/// unknown return order, no matching line - terminates the item silently:
/// there is nothing to reconcile yet, and redelivering would not help.
/// Only transport-level failures fail the message.
///
/// # Errors
///
/// Returns `ReconcileError` on WMS or platform call failure.
#[instrument(
    skip(warehouse, platform, integrations, event),
    fields(goods_owner_id = %event.goods_owner_id, order_number = %event.order.order_number)
)]
pub async fn handle_return_webhook<W, P>(
    warehouse: &W,
    platform: &P,
    integrations: &IntegrationResolver,
    event: &PickWebhookEvent,
) -> Result<(), ReconcileError>
where
    W: WarehouseApi + ?Sized,
    P: PlatformApi + ?Sized,
{
    if !event.is_returned {
        debug!("event is not a return, ignoring");
        return Ok(());
    }

    let Some(retailer_id) = integrations.resolve_retailer_by_goods_owner(event.goods_owner_id)
    else {
        info!("no integration configured for goods owner, skipping");
        return Ok(());
    };
    // resolve_retailer_by_goods_owner found this integration, so the
    // reverse lookup cannot miss
    let Some(integration) = integrations.resolve_by_retailer(retailer_id) else {
        return Ok(());
    };

    let order = warehouse
        .get_order(integration, WmsOrderId::new(event.order.order_id))
        .await?;

    let detail_id = &event.order.order_line.row_number;
    let Some(return_order_id) = platform
        .get_return_order_mapping(retailer_id, &order.external_order_id, detail_id)
        .await?
    else {
        info!(%detail_id, "no return-order mapping recorded, nothing to reconcile yet");
        return Ok(());
    };

    let Some(return_order) = warehouse.get_return_order(integration, return_order_id).await? else {
        info!(%return_order_id, "mapped return order not found in WMS, skipping");
        return Ok(());
    };

    let event_line_id = WmsOrderLineId::new(event.order.order_line.order_line_id);
    let Some(line) = return_order
        .lines
        .iter()
        .find(|line| line.customer_order_line_id == Some(event_line_id))
    else {
        info!(%return_order_id, "return order has no line for the event's order line, skipping");
        return Ok(());
    };

    let inspection = Inspection {
        ext_order_id: Some(order.order_number.clone()),
        ext_internal_order_id: order.external_order_id.clone(),
        inspected_order_details: vec![InspectionDetail {
            ext_internal_order_detail_id: detail_id.clone(),
            order_detail_id: None,
            inspection_result: classify(line.removed_from_inventory),
            comment: strip_remark_prefix(&order.warehouse_remark),
            last_changed: return_order.in_date.clone(),
        }],
    };

    platform.report_inspection(retailer_id, &inspection).await?;
    info!(%return_order_id, result = ?inspection.inspected_order_details[0].inspection_result,
        "reported inspection to retailer platform");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_removed_is_ok() {
        assert_eq!(classify(0.0), InspectionResult::Ok);
    }

    #[test]
    fn test_any_nonzero_removed_is_not_ok() {
        assert_eq!(classify(1.0), InspectionResult::NotOk);
        assert_eq!(classify(0.5), InspectionResult::NotOk);
        assert_eq!(classify(3.0), InspectionResult::NotOk);
    }

    #[test]
    fn test_remark_prefix_is_stripped() {
        assert_eq!(strip_remark_prefix("220221 kan lagerforas"), "kan lagerforas");
        assert_eq!(strip_remark_prefix("  220221  damaged box "), "damaged box");
    }

    #[test]
    fn test_remark_without_body_yields_empty_comment() {
        assert_eq!(strip_remark_prefix("220221"), "");
        assert_eq!(strip_remark_prefix(""), "");
    }
}
