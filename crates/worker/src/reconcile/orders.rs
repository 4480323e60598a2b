//! Time-windowed resolution of WMS orders from retailer order ids.
//!
//! The WMS stores the retailer's internal order id as an opaque
//! `goodsOwnerOrderId` and cannot query by it. It can query by its own
//! order creation time, which tracks the retailer's order date closely, so
//! the resolver brackets the order date with a fixed window and scans the
//! result for an exact id match.

use chrono::{Duration, NaiveDateTime};
use tracing::debug;

use return_sync_core::WarehouseOrder;

use crate::config::WarehouseIntegration;
use crate::error::WarehouseError;
use crate::reconcile::WarehouseApi;

/// Half-width of the search window around the retailer's order date.
///
/// Chosen to absorb timezone skew and delay between the retailer's order
/// timestamp and the WMS's own creation time.
pub const SEARCH_WINDOW_HOURS: i64 = 12;

/// The inclusive `[from, to]` window searched around an order date.
#[must_use]
pub fn search_window(order_date: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let half = Duration::hours(SEARCH_WINDOW_HOURS);
    (order_date - half, order_date + half)
}

/// Locate the WMS order carrying the retailer's external order id.
///
/// `None` is a recoverable miss: the order may not have reached the WMS
/// yet, or may never (not every order ships through this warehouse). When
/// duplicate ids fall inside the window the first one seen wins.
///
/// # Errors
///
/// Returns `WarehouseError` if the window query itself fails.
pub async fn find_order<W>(
    warehouse: &W,
    integration: &WarehouseIntegration,
    ext_internal_order_id: &str,
    order_date: NaiveDateTime,
) -> Result<Option<WarehouseOrder>, WarehouseError>
where
    W: WarehouseApi + ?Sized,
{
    let (from, to) = search_window(order_date);
    debug!(%from, %to, ext_internal_order_id, "searching WMS orders in window");

    warehouse
        .get_order_by_external_id_window(integration, ext_internal_order_id, from, to)
        .await
}
