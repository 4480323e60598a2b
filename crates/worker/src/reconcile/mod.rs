//! Reconciliation flows and the trait seams they run on.
//!
//! The flows never talk to `reqwest` directly; they are generic over
//! [`WarehouseApi`] and [`PlatformApi`], implemented by the production
//! clients and by in-memory fakes in tests. One client object per process,
//! passed in explicitly - no module-level singletons shared across
//! concurrent message handlers.

pub mod causes;
pub mod inspection;
pub mod integrations;
pub mod orders;
pub mod return_order;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{info, instrument};

use return_sync_core::{
    Inspection, NewReturnOrder, RetailerId, ReturnCause, ReturnRequest, WarehouseOrder, WmsOrderId,
    WmsReturnOrder, WmsReturnOrderId,
};

use crate::config::WarehouseIntegration;
use crate::error::{PlatformError, ReconcileError, WarehouseError};
pub use integrations::IntegrationResolver;

/// The WMS operations the reconciliation flows depend on.
///
/// Implemented by [`crate::ongoing::OngoingClient`]; every method takes the
/// integration whose tenant and credentials the call runs under.
#[async_trait]
pub trait WarehouseApi: Send + Sync {
    async fn get_order(
        &self,
        integration: &WarehouseIntegration,
        order_id: WmsOrderId,
    ) -> Result<WarehouseOrder, WarehouseError>;

    async fn get_order_by_external_id_window(
        &self,
        integration: &WarehouseIntegration,
        external_order_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Option<WarehouseOrder>, WarehouseError>;

    async fn create_return_cause(
        &self,
        integration: &WarehouseIntegration,
        cause: &ReturnCause,
    ) -> Result<(), WarehouseError>;

    async fn create_return_order(
        &self,
        integration: &WarehouseIntegration,
        order: &NewReturnOrder,
    ) -> Result<WmsReturnOrderId, WarehouseError>;

    async fn get_return_order(
        &self,
        integration: &WarehouseIntegration,
        id: WmsReturnOrderId,
    ) -> Result<Option<WmsReturnOrder>, WarehouseError>;

    async fn get_return_orders_by_number(
        &self,
        integration: &WarehouseIntegration,
        numbers: &[String],
    ) -> Result<Vec<WmsReturnOrder>, WarehouseError>;
}

/// The retailer platform operations the reconciliation flows depend on.
///
/// Implemented by [`crate::platform::PlatformClient`].
#[async_trait]
pub trait PlatformApi: Send + Sync {
    async fn record_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        return_order_id: WmsReturnOrderId,
        ext_internal_order_id: &str,
        ext_order_detail_ids: &[String],
    ) -> Result<(), PlatformError>;

    async fn get_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        ext_internal_order_id: &str,
        ext_order_detail_id: &str,
    ) -> Result<Option<WmsReturnOrderId>, PlatformError>;

    async fn report_inspection(
        &self,
        retailer_id: RetailerId,
        inspection: &Inspection,
    ) -> Result<(), PlatformError>;
}

/// Outbound flow: push one return request into the WMS.
///
/// Steps are strictly sequential; each step's success gates the next:
/// resolve integration, provision causes, locate the WMS order, create the
/// return order, record the mapping. A missing integration or an order
/// miss within the search window is an expected outcome and ends the flow
/// silently.
///
/// # Errors
///
/// Returns `ReconcileError` for failures that should fail this queue
/// message (WMS/platform errors, unknown return cause, mapping write).
#[instrument(
    skip(warehouse, platform, integrations, request),
    fields(retailer_id = %request.retailer_id, order = %request.ext_internal_order_id)
)]
pub async fn push_return_request<W, P>(
    warehouse: &W,
    platform: &P,
    integrations: &IntegrationResolver,
    request: &ReturnRequest,
) -> Result<(), ReconcileError>
where
    W: WarehouseApi + ?Sized,
    P: PlatformApi + ?Sized,
{
    let Some(integration) = integrations.resolve_by_retailer(request.retailer_id) else {
        info!("no warehouse integration configured for retailer, skipping");
        return Ok(());
    };

    causes::ensure_causes(warehouse, integration).await;

    let Some(order) = orders::find_order(
        warehouse,
        integration,
        &request.ext_internal_order_id,
        request.order_date,
    )
    .await?
    else {
        info!("no WMS order matched the external id within the search window, skipping");
        return Ok(());
    };

    let return_order_id = return_order::build_and_submit(
        warehouse,
        platform,
        integration,
        &order,
        &request.return_details,
        chrono::Utc::now().naive_utc(),
    )
    .await?;

    info!(%return_order_id, "created WMS return order and recorded mapping");
    Ok(())
}
