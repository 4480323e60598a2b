//! Integration tests for the return-sync worker.
//!
//! The reconciliation flows are exercised end to end against in-memory
//! fakes of the two external APIs. The fakes record every call so a test
//! can assert both the outcome and the exact side effects - mappings
//! written, return orders created, inspections reported.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p return-sync-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use return_sync_core::{
    GoodsOwnerId, Inspection, NewReturnOrder, QueueEvent, QueueRecord, RetailerId, ReturnCause,
    WarehouseOrder, WmsOrderId, WmsReturnOrder, WmsReturnOrderId,
};
use return_sync_worker::config::WarehouseIntegration;
use return_sync_worker::error::{PlatformError, WarehouseError};
use return_sync_worker::reconcile::{IntegrationResolver, PlatformApi, WarehouseApi};

/// A recorded mapping write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMapping {
    pub retailer_id: RetailerId,
    pub return_order_id: WmsReturnOrderId,
    pub ext_internal_order_id: String,
    pub ext_order_detail_ids: Vec<String>,
}

/// In-memory WMS fake. Preloaded with orders and return orders; records
/// every cause upsert and return-order creation.
#[derive(Debug, Default)]
pub struct FakeWarehouse {
    orders: Vec<WarehouseOrder>,
    return_orders: Vec<WmsReturnOrder>,
    created: Mutex<Vec<NewReturnOrder>>,
    upserted_causes: Mutex<Vec<String>>,
    next_return_order_id: AtomicI64,
    /// External order ids whose window search fails with a 5xx.
    failing_searches: Vec<String>,
}

impl FakeWarehouse {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_return_order_id: AtomicI64::new(117),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_order(mut self, order: WarehouseOrder) -> Self {
        self.orders.push(order);
        self
    }

    #[must_use]
    pub fn with_return_order(mut self, return_order: WmsReturnOrder) -> Self {
        self.return_orders.push(return_order);
        self
    }

    #[must_use]
    pub fn with_failing_search(mut self, external_order_id: &str) -> Self {
        self.failing_searches.push(external_order_id.to_string());
        self
    }

    /// Return orders created through the fake, in call order.
    #[must_use]
    pub fn created(&self) -> Vec<NewReturnOrder> {
        self.created.lock().unwrap().clone()
    }

    /// Cause codes upserted through the fake, in call order.
    #[must_use]
    pub fn upserted_causes(&self) -> Vec<String> {
        self.upserted_causes.lock().unwrap().clone()
    }
}

#[async_trait]
impl WarehouseApi for FakeWarehouse {
    async fn get_order(
        &self,
        _integration: &WarehouseIntegration,
        order_id: WmsOrderId,
    ) -> Result<WarehouseOrder, WarehouseError> {
        self.orders
            .iter()
            .find(|order| order.id == order_id)
            .cloned()
            .ok_or(WarehouseError::Rejected {
                status: 404,
                message: "order not found".to_string(),
            })
    }

    async fn get_order_by_external_id_window(
        &self,
        _integration: &WarehouseIntegration,
        external_order_id: &str,
        _from: NaiveDateTime,
        _to: NaiveDateTime,
    ) -> Result<Option<WarehouseOrder>, WarehouseError> {
        if self.failing_searches.iter().any(|id| id == external_order_id) {
            return Err(WarehouseError::Unavailable("502: bad gateway".to_string()));
        }
        Ok(self
            .orders
            .iter()
            .find(|order| order.external_order_id == external_order_id)
            .cloned())
    }

    async fn create_return_cause(
        &self,
        _integration: &WarehouseIntegration,
        cause: &ReturnCause,
    ) -> Result<(), WarehouseError> {
        self.upserted_causes.lock().unwrap().push(cause.code.clone());
        Ok(())
    }

    async fn create_return_order(
        &self,
        _integration: &WarehouseIntegration,
        order: &NewReturnOrder,
    ) -> Result<WmsReturnOrderId, WarehouseError> {
        self.created.lock().unwrap().push(order.clone());
        Ok(WmsReturnOrderId::new(
            self.next_return_order_id.fetch_add(1, Ordering::SeqCst),
        ))
    }

    async fn get_return_order(
        &self,
        _integration: &WarehouseIntegration,
        id: WmsReturnOrderId,
    ) -> Result<Option<WmsReturnOrder>, WarehouseError> {
        Ok(self
            .return_orders
            .iter()
            .find(|return_order| return_order.id == id)
            .cloned())
    }

    async fn get_return_orders_by_number(
        &self,
        _integration: &WarehouseIntegration,
        numbers: &[String],
    ) -> Result<Vec<WmsReturnOrder>, WarehouseError> {
        Ok(self
            .return_orders
            .iter()
            .filter(|return_order| numbers.contains(&return_order.return_order_number))
            .cloned()
            .collect())
    }
}

/// In-memory retailer platform fake. Serves mapping lookups from its own
/// recorded writes and records every inspection report.
#[derive(Debug, Default)]
pub struct FakePlatform {
    mappings: Mutex<Vec<RecordedMapping>>,
    inspections: Mutex<Vec<(RetailerId, Inspection)>>,
    fail_mapping_writes: bool,
}

impl FakePlatform {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_failing_mapping_writes(mut self) -> Self {
        self.fail_mapping_writes = true;
        self
    }

    #[must_use]
    pub fn with_mapping(self, mapping: RecordedMapping) -> Self {
        self.mappings.lock().unwrap().push(mapping);
        self
    }

    #[must_use]
    pub fn mappings(&self) -> Vec<RecordedMapping> {
        self.mappings.lock().unwrap().clone()
    }

    #[must_use]
    pub fn inspections(&self) -> Vec<(RetailerId, Inspection)> {
        self.inspections.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformApi for FakePlatform {
    async fn record_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        return_order_id: WmsReturnOrderId,
        ext_internal_order_id: &str,
        ext_order_detail_ids: &[String],
    ) -> Result<(), PlatformError> {
        if self.fail_mapping_writes {
            return Err(PlatformError::Status {
                status: 500,
                message: "mapping store unavailable".to_string(),
            });
        }
        self.mappings.lock().unwrap().push(RecordedMapping {
            retailer_id,
            return_order_id,
            ext_internal_order_id: ext_internal_order_id.to_string(),
            ext_order_detail_ids: ext_order_detail_ids.to_vec(),
        });
        Ok(())
    }

    async fn get_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        ext_internal_order_id: &str,
        ext_order_detail_id: &str,
    ) -> Result<Option<WmsReturnOrderId>, PlatformError> {
        Ok(self
            .mappings
            .lock()
            .unwrap()
            .iter()
            .find(|mapping| {
                mapping.retailer_id == retailer_id
                    && mapping.ext_internal_order_id == ext_internal_order_id
                    && mapping
                        .ext_order_detail_ids
                        .iter()
                        .any(|id| id == ext_order_detail_id)
            })
            .map(|mapping| mapping.return_order_id))
    }

    async fn report_inspection(
        &self,
        retailer_id: RetailerId,
        inspection: &Inspection,
    ) -> Result<(), PlatformError> {
        self.inspections
            .lock()
            .unwrap()
            .push((retailer_id, inspection.clone()));
        Ok(())
    }
}

/// An integration for one retailer, with throwaway credentials.
#[must_use]
pub fn integration(retailer_id: i64, goods_owner_id: i64) -> WarehouseIntegration {
    WarehouseIntegration {
        retailer_id: RetailerId::new(retailer_id),
        goods_owner_id: GoodsOwnerId::new(goods_owner_id),
        warehouse_name: "fruolsson".to_string(),
        username: "api-user".to_string(),
        password: "api-pass".to_string().into(),
    }
}

/// A resolver holding the given integrations.
#[must_use]
pub fn resolver(integrations: Vec<WarehouseIntegration>) -> IntegrationResolver {
    IntegrationResolver::new(integrations)
}

/// A queue batch envelope wrapping one payload per `(message_id, payload)`
/// pair, encoded the way the transport delivers them.
#[must_use]
pub fn queue_event<T: serde::Serialize>(items: &[(&str, T)]) -> QueueEvent {
    QueueEvent {
        records: items
            .iter()
            .map(|(id, payload)| QueueRecord::wrap(id, payload))
            .collect(),
    }
}
