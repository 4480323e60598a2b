//! Read-only projections of WMS outbound orders.

use serde::{Deserialize, Serialize};

use super::{WmsOrderId, WmsOrderLineId};

/// An outbound order as the WMS reports it.
///
/// Fetched per request, never persisted by the worker. `external_order_id`
/// is the WMS `goodsOwnerOrderId` field - the retailer's own internal order
/// id, which the WMS stores as an opaque string and does not index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseOrder {
    pub id: WmsOrderId,
    pub order_number: String,
    pub external_order_id: String,
    /// Free-text remark set by warehouse staff. The leading token is an
    /// internal code prefix and is stripped before the remark is shown to
    /// the retailer.
    pub warehouse_remark: String,
    pub shipped_on: Option<String>,
    pub lines: Vec<WarehouseOrderLine>,
}

/// One line of an outbound WMS order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseOrderLine {
    pub line_id: WmsOrderLineId,
    /// The retailer's order detail id (WMS `rowNumber`). The only key both
    /// systems agree on at line level.
    pub external_detail_id: String,
    pub article_id: i64,
    pub sku: String,
    pub product_name: String,
    pub product_code: Option<String>,
    pub return_date: Option<String>,
    pub return_reason: Option<String>,
}
