//! Resolution of retailers to warehouse integrations and back.

use return_sync_core::{GoodsOwnerId, RetailerId};

use crate::config::WarehouseIntegration;

/// Maps retailer ids to their active warehouse integration and goods-owner
/// ids back to retailer ids.
///
/// Loaded once from configuration and immutable for the life of the
/// process. A miss in either direction is a normal outcome - not every
/// retailer uses this WMS - and must short-circuit the caller without
/// raising past the batch boundary.
#[derive(Debug, Clone)]
pub struct IntegrationResolver {
    integrations: Vec<WarehouseIntegration>,
}

impl IntegrationResolver {
    #[must_use]
    pub fn new(integrations: Vec<WarehouseIntegration>) -> Self {
        Self { integrations }
    }

    /// The integration configured for a retailer, if any.
    #[must_use]
    pub fn resolve_by_retailer(&self, retailer_id: RetailerId) -> Option<&WarehouseIntegration> {
        self.integrations
            .iter()
            .find(|integration| integration.retailer_id == retailer_id)
    }

    /// The retailer behind a WMS goods owner, if any.
    #[must_use]
    pub fn resolve_retailer_by_goods_owner(&self, goods_owner_id: GoodsOwnerId) -> Option<RetailerId> {
        self.integrations
            .iter()
            .find(|integration| integration.goods_owner_id == goods_owner_id)
            .map(|integration| integration.retailer_id)
    }
}
