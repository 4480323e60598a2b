//! Inbound return requests from the retailer platform.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::RetailerId;

/// Serde helper for the retailer platform's `YYYY-MM-DD HH:MM:SS` stamps.
pub mod order_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Serialize a timestamp in the platform's wire format.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    /// Deserialize a timestamp from the platform's wire format.
    ///
    /// # Errors
    ///
    /// Fails on any string not matching `YYYY-MM-DD HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
    }
}

/// A customer's return request, delivered via the queue.
///
/// `ext_internal_order_id` is the retailer's internal order id - the value
/// the WMS stores (unindexed) as `goodsOwnerOrderId`. `order_date` anchors
/// the time-window search that recovers the WMS order from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub retailer_id: RetailerId,
    pub ext_internal_order_id: String,
    #[serde(with = "order_date_format")]
    pub order_date: NaiveDateTime,
    pub return_details: Vec<ReturnDetail>,
}

/// One item the customer wants to send back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDetail {
    pub ext_order_detail_id: String,
    pub amount: u32,
    pub reason: String,
    pub return_type: String,
    pub sku_number: String,
    #[serde(default)]
    pub comment: String,
}
