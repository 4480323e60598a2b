//! Ongoing WMS API client.
//!
//! Thin request/response adapter over the Ongoing REST API, one method per
//! WMS operation. Authentication is HTTP Basic with per-retailer
//! credentials; the tenant (`goodsOwnerId`) and base URL both come from the
//! [`WarehouseIntegration`] passed into every call, so a single client
//! instance serves all configured retailers.
//!
//! No retry logic lives here - a failed call fails the queue message it
//! belongs to, and the transport redelivers.
//!
//! # API Reference
//!
//! - Base URL: `https://api.ongoingsystems.se/{warehouse}/api/v1`
//! - Authentication: `Authorization: Basic <base64(user:pass)>`

pub mod types;

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::NaiveDateTime;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

use return_sync_core::{NewReturnOrder, ReturnCause, WarehouseOrder, WmsOrderId, WmsReturnOrder, WmsReturnOrderId};

use crate::config::WarehouseIntegration;
use crate::error::WarehouseError;
use types::{
    CreateReturnOrderRequest, CreateReturnOrderResponse, OrderEnvelope, ReturnCausePayload,
    ReturnOrderEnvelope,
};

/// Timestamp format the WMS expects on `orderCreatedTime` filters.
const WMS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Ongoing WMS API client.
#[derive(Debug, Clone)]
pub struct OngoingClient {
    http: reqwest::Client,
}

impl OngoingClient {
    /// Create a new client with the given outbound timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(timeout: Duration) -> Result<Self, WarehouseError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Fetch a single outbound order by its WMS id.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(skip(self, integration), fields(goods_owner_id = %integration.goods_owner_id))]
    pub async fn get_order(
        &self,
        integration: &WarehouseIntegration,
        order_id: WmsOrderId,
    ) -> Result<WarehouseOrder, WarehouseError> {
        let url = format!("{}/orders/{order_id}", base_url(integration));
        let envelope: OrderEnvelope = self.get_json(integration, &url, &[]).await?;
        Ok(envelope.into())
    }

    /// Search orders created in `[from, to]` for an exact match on the
    /// retailer's external order id (`goodsOwnerOrderId`).
    ///
    /// The WMS indexes orders by its own creation time, not by the
    /// retailer's id, so the caller brackets the retailer's order date and
    /// this method scans the window. First match wins; a duplicate match is
    /// logged because the WMS only guarantees uniqueness probabilistically
    /// within a window.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(skip(self, integration), fields(goods_owner_id = %integration.goods_owner_id))]
    pub async fn get_order_by_external_id_window(
        &self,
        integration: &WarehouseIntegration,
        external_order_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Option<WarehouseOrder>, WarehouseError> {
        let url = format!("{}/orders", base_url(integration));
        let query = [
            ("goodsOwnerId", integration.goods_owner_id.to_string()),
            ("orderCreatedTimeFrom", from.format(WMS_TIME_FORMAT).to_string()),
            ("orderCreatedTimeTo", to.format(WMS_TIME_FORMAT).to_string()),
        ];

        let envelopes: Vec<OrderEnvelope> = self.get_json(integration, &url, &query).await?;
        Ok(first_exact_match(envelopes, external_order_id).map(Into::into))
    }

    /// Upsert a return cause (create-or-replace by code).
    ///
    /// Safe to call on every run; re-creating an existing code replaces it
    /// in place and accumulates nothing.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(skip(self, integration, cause), fields(code = %cause.code))]
    pub async fn create_return_cause(
        &self,
        integration: &WarehouseIntegration,
        cause: &ReturnCause,
    ) -> Result<(), WarehouseError> {
        let url = format!("{}/returnOrders/returnCauses", base_url(integration));
        let payload = ReturnCausePayload::new(integration.goods_owner_id, cause);
        self.put_unit(integration, &url, &payload).await
    }

    /// Create a return order linked to an outbound order. Single atomic
    /// call; the WMS either creates the whole order or nothing.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(
        skip(self, integration, order),
        fields(goods_owner_id = %integration.goods_owner_id, order_id = %order.order_id)
    )]
    pub async fn create_return_order(
        &self,
        integration: &WarehouseIntegration,
        order: &NewReturnOrder,
    ) -> Result<WmsReturnOrderId, WarehouseError> {
        let url = format!("{}/returnOrders", base_url(integration));
        let payload = CreateReturnOrderRequest::new(integration.goods_owner_id, order);
        let response: CreateReturnOrderResponse = self.put_json(integration, &url, &payload).await?;
        Ok(response.return_order_id)
    }

    /// Fetch a return order by its WMS id. `None` if the WMS does not know
    /// the id.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(skip(self, integration))]
    pub async fn get_return_order(
        &self,
        integration: &WarehouseIntegration,
        id: WmsReturnOrderId,
    ) -> Result<Option<WmsReturnOrder>, WarehouseError> {
        let url = format!("{}/returnOrders/{id}", base_url(integration));

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth_header(integration))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: ReturnOrderEnvelope = decode_response(response).await?;
        Ok(Some(envelope.into()))
    }

    /// Fetch return orders by their return-order numbers.
    ///
    /// # Errors
    ///
    /// Returns `WarehouseError` on network failure, rejection, or timeout.
    #[instrument(skip(self, integration, numbers), fields(count = numbers.len()))]
    pub async fn get_return_orders_by_number(
        &self,
        integration: &WarehouseIntegration,
        numbers: &[String],
    ) -> Result<Vec<WmsReturnOrder>, WarehouseError> {
        let url = format!("{}/returnOrders", base_url(integration));
        let mut query = vec![("goodsOwnerId", integration.goods_owner_id.to_string())];
        for number in numbers {
            query.push(("returnOrderNumbers", number.clone()));
        }

        let envelopes: Vec<ReturnOrderEnvelope> = self.get_json(integration, &url, &query).await?;
        Ok(envelopes.into_iter().map(Into::into).collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        integration: &WarehouseIntegration,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, WarehouseError> {
        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, auth_header(integration))
            .query(query)
            .send()
            .await?;
        decode_response(response).await
    }

    async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        integration: &WarehouseIntegration,
        url: &str,
        body: &B,
    ) -> Result<T, WarehouseError> {
        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, auth_header(integration))
            .json(body)
            .send()
            .await?;
        decode_response(response).await
    }

    async fn put_unit<B: Serialize + Sync>(
        &self,
        integration: &WarehouseIntegration,
        url: &str,
        body: &B,
    ) -> Result<(), WarehouseError> {
        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, auth_header(integration))
            .json(body)
            .send()
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(response).await)
    }
}

#[async_trait::async_trait]
impl crate::reconcile::WarehouseApi for OngoingClient {
    async fn get_order(
        &self,
        integration: &WarehouseIntegration,
        order_id: WmsOrderId,
    ) -> Result<WarehouseOrder, WarehouseError> {
        Self::get_order(self, integration, order_id).await
    }

    async fn get_order_by_external_id_window(
        &self,
        integration: &WarehouseIntegration,
        external_order_id: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Option<WarehouseOrder>, WarehouseError> {
        Self::get_order_by_external_id_window(self, integration, external_order_id, from, to).await
    }

    async fn create_return_cause(
        &self,
        integration: &WarehouseIntegration,
        cause: &ReturnCause,
    ) -> Result<(), WarehouseError> {
        Self::create_return_cause(self, integration, cause).await
    }

    async fn create_return_order(
        &self,
        integration: &WarehouseIntegration,
        order: &NewReturnOrder,
    ) -> Result<WmsReturnOrderId, WarehouseError> {
        Self::create_return_order(self, integration, order).await
    }

    async fn get_return_order(
        &self,
        integration: &WarehouseIntegration,
        id: WmsReturnOrderId,
    ) -> Result<Option<WmsReturnOrder>, WarehouseError> {
        Self::get_return_order(self, integration, id).await
    }

    async fn get_return_orders_by_number(
        &self,
        integration: &WarehouseIntegration,
        numbers: &[String],
    ) -> Result<Vec<WmsReturnOrder>, WarehouseError> {
        Self::get_return_orders_by_number(self, integration, numbers).await
    }
}

fn base_url(integration: &WarehouseIntegration) -> String {
    format!(
        "https://api.ongoingsystems.se/{}/api/v1",
        integration.warehouse_name
    )
}

/// Scan a window's worth of orders for an exact `goodsOwnerOrderId` match.
///
/// First match wins; a duplicate match is logged because the WMS only
/// guarantees uniqueness probabilistically within a window. Orders without
/// a `goodsOwnerOrderId` never match.
fn first_exact_match(envelopes: Vec<OrderEnvelope>, external_order_id: &str) -> Option<OrderEnvelope> {
    let mut matches = envelopes
        .into_iter()
        .filter(|e| e.order_info.goods_owner_order_id.as_deref() == Some(external_order_id));
    let first = matches.next();
    if matches.next().is_some() {
        warn!(
            external_order_id,
            "multiple WMS orders match external id within window, using first"
        );
    }
    first
}

fn auth_header(integration: &WarehouseIntegration) -> String {
    let token = BASE64.encode(format!(
        "{}:{}",
        integration.username,
        integration.password.expose_secret()
    ));
    format!("Basic {token}")
}

/// Decode a successful response body, or map the status to the taxonomy.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, WarehouseError> {
    if response.status().is_success() {
        return response
            .json()
            .await
            .map_err(|e| WarehouseError::Parse(e.to_string()));
    }
    Err(error_from_response(response).await)
}

/// Map a non-success response: 5xx is `Unavailable`, 4xx is `Rejected`.
async fn error_from_response(response: reqwest::Response) -> WarehouseError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    if status.is_server_error() {
        WarehouseError::Unavailable(format!("{status}: {message}"))
    } else {
        WarehouseError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}
