//! Wire types for the Ongoing WMS REST API.
//!
//! The API speaks camelCase JSON. These types mirror the payloads exactly
//! and convert into the domain projections from `return_sync_core`; nothing
//! outside this module should see a WMS field name.

use serde::{Deserialize, Serialize};

use return_sync_core::{
    GoodsOwnerId, NewReturnOrder, ReturnCause, WarehouseOrder, WarehouseOrderLine, WmsOrderId,
    WmsOrderLineId, WmsReturnOrder, WmsReturnOrderId, WmsReturnOrderLine,
};

/// One entry of a `GET /orders` response (also the shape of
/// `GET /orders/{id}`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderEnvelope {
    pub order_info: OrderInfo,
    #[serde(default)]
    pub order_lines: Vec<OrderLine>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    pub order_id: i64,
    pub order_number: String,
    /// The retailer's internal order id, stored by the WMS as an opaque,
    /// unindexed string.
    #[serde(default)]
    pub goods_owner_order_id: Option<String>,
    #[serde(default)]
    pub order_remark: Option<String>,
    #[serde(default)]
    pub shipped_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: i64,
    /// The retailer's order detail id.
    pub row_number: String,
    pub article: Article,
    #[serde(default)]
    pub picked_article_items: Vec<PickedArticleItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub article_system_id: i64,
    pub article_number: String,
    pub article_name: String,
    #[serde(default)]
    pub product_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickedArticleItem {
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub return_cause: Option<String>,
}

impl From<OrderEnvelope> for WarehouseOrder {
    fn from(envelope: OrderEnvelope) -> Self {
        let lines = envelope.order_lines.into_iter().map(Into::into).collect();
        let info = envelope.order_info;
        Self {
            id: WmsOrderId::new(info.order_id),
            order_number: info.order_number,
            external_order_id: info.goods_owner_order_id.unwrap_or_default(),
            warehouse_remark: info.order_remark.unwrap_or_default(),
            shipped_on: info.shipped_time,
            lines,
        }
    }
}

impl From<OrderLine> for WarehouseOrderLine {
    fn from(line: OrderLine) -> Self {
        let picked = line.picked_article_items.into_iter().next();
        let (return_date, return_reason) = picked
            .map(|item| (item.return_date, item.return_cause))
            .unwrap_or_default();
        Self {
            line_id: WmsOrderLineId::new(line.id),
            external_detail_id: line.row_number,
            article_id: line.article.article_system_id,
            sku: line.article.article_number,
            product_name: line.article.article_name,
            product_code: line.article.product_code,
            return_date,
            return_reason,
        }
    }
}

/// `PUT /returnOrders/returnCauses` payload: create-or-replace by `code`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCausePayload {
    pub goods_owner_id: GoodsOwnerId,
    pub code: String,
    pub name: String,
    pub is_remove_cause: bool,
    pub is_change_cause: bool,
    pub is_return_comment_mandatory: bool,
}

impl ReturnCausePayload {
    #[must_use]
    pub fn new(goods_owner_id: GoodsOwnerId, cause: &ReturnCause) -> Self {
        Self {
            goods_owner_id,
            code: cause.code.clone(),
            name: cause.display_name.clone(),
            is_remove_cause: cause.removes_stock,
            is_change_cause: cause.allows_change,
            is_return_comment_mandatory: cause.comment_required,
        }
    }
}

/// `PUT /returnOrders` payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnOrderRequest {
    pub goods_owner_id: GoodsOwnerId,
    pub return_order_number: String,
    pub customer_order: CustomerOrderRef,
    pub return_order_lines: Vec<CreateReturnOrderLine>,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderRef {
    pub order_id: WmsOrderId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnOrderLine {
    pub return_order_row_number: String,
    pub customer_order_line: CustomerOrderLineRef,
    pub to_be_returned_number_of_items: u32,
    pub return_cause: ReturnCauseRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderLineRef {
    pub order_line_id: WmsOrderLineId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCauseRef {
    pub code: String,
    pub name: String,
}

impl CreateReturnOrderRequest {
    #[must_use]
    pub fn new(goods_owner_id: GoodsOwnerId, order: &NewReturnOrder) -> Self {
        Self {
            goods_owner_id,
            return_order_number: order.return_order_number.clone(),
            customer_order: CustomerOrderRef { order_id: order.order_id },
            return_order_lines: order
                .lines
                .iter()
                .map(|line| CreateReturnOrderLine {
                    return_order_row_number: line.row_number.clone(),
                    customer_order_line: CustomerOrderLineRef {
                        order_line_id: line.order_line_id,
                    },
                    to_be_returned_number_of_items: line.quantity,
                    return_cause: ReturnCauseRef {
                        code: line.cause.code.clone(),
                        name: line.cause.display_name.clone(),
                    },
                })
                .collect(),
            comment: order.comment.clone(),
        }
    }
}

/// `PUT /returnOrders` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReturnOrderResponse {
    pub return_order_id: WmsReturnOrderId,
}

/// `GET /returnOrders/{id}` response (and entries of `GET /returnOrders`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOrderEnvelope {
    pub return_order_info: ReturnOrderInfo,
    #[serde(default)]
    pub return_order_lines: Vec<ReturnOrderLineWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOrderInfo {
    pub return_order_id: i64,
    pub return_order_number: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub in_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOrderLineWire {
    pub return_order_row_number: String,
    #[serde(default)]
    pub customer_order_line: Option<CustomerOrderLineRef>,
    /// Quantity warehouse staff pulled from sellable stock on inspection.
    #[serde(default)]
    pub returned_removed_by_inventory_number_of_items: f64,
}

impl From<ReturnOrderEnvelope> for WmsReturnOrder {
    fn from(envelope: ReturnOrderEnvelope) -> Self {
        let lines = envelope
            .return_order_lines
            .into_iter()
            .map(|line| WmsReturnOrderLine {
                row_number: line.return_order_row_number,
                customer_order_line_id: line.customer_order_line.map(|l| l.order_line_id),
                removed_from_inventory: line.returned_removed_by_inventory_number_of_items,
            })
            .collect();
        let info = envelope.return_order_info;
        Self {
            id: WmsReturnOrderId::new(info.return_order_id),
            return_order_number: info.return_order_number,
            comment: info.comment.unwrap_or_default(),
            in_date: info.in_date,
            lines,
        }
    }
}

/// The WMS pick/return webhook payload, as delivered through the queue.
///
/// Fields the reconciler never reads (article, location, user, flags other
/// than `isReturned`) are intentionally not modeled.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickWebhookEvent {
    pub goods_owner_id: GoodsOwnerId,
    pub order: WebhookOrder,
    #[serde(default)]
    pub is_returned: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOrder {
    pub order_id: i64,
    pub order_number: String,
    pub order_line: WebhookOrderLine,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOrderLine {
    pub order_line_id: i64,
    /// The retailer's order detail id.
    pub row_number: String,
}
