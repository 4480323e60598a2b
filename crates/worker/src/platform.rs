//! Retailer platform API client.
//!
//! The retailer platform owns the only durable link between a retailer-side
//! return request and the WMS return order created for it: a mapping keyed
//! by `(retailer_id, ext_internal_order_id, ext_order_detail_id)`. This
//! client records that mapping right after creation, looks it up when a
//! webhook arrives, and pushes inspection verdicts.

use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use return_sync_core::{Inspection, RetailerId, WmsReturnOrderId};

use crate::error::PlatformError;

/// Retailer platform API client.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Serialize)]
struct RecordMappingRequest<'a> {
    retailer_id: RetailerId,
    return_order_id: WmsReturnOrderId,
    ext_internal_order_id: &'a str,
    ext_order_detail_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct MappingResponse {
    details: MappingDetails,
}

#[derive(Debug, Deserialize)]
struct MappingDetails {
    ongoing_return_id: WmsReturnOrderId,
}

impl PlatformClient {
    /// Create a new client against the given platform base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Record which WMS return order was created for a return request.
    ///
    /// Idempotent upsert keyed by the identifying tuple; must succeed
    /// before the outbound item counts as done.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on network failure or non-success status.
    #[instrument(skip(self, ext_order_detail_ids), fields(details = ext_order_detail_ids.len()))]
    pub async fn record_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        return_order_id: WmsReturnOrderId,
        ext_internal_order_id: &str,
        ext_order_detail_ids: &[String],
    ) -> Result<(), PlatformError> {
        let url = self.endpoint("ongoing/return/")?;
        let payload = RecordMappingRequest {
            retailer_id,
            return_order_id,
            ext_internal_order_id,
            ext_order_detail_ids,
        };

        let response = self.http.post(url).json(&payload).send().await?;
        check_status(response).await.map(|_| ())
    }

    /// Look up the WMS return order recorded for an identifying tuple.
    /// `None` when no mapping has been recorded (404).
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on network failure or non-success status.
    #[instrument(skip(self))]
    pub async fn get_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        ext_internal_order_id: &str,
        ext_order_detail_id: &str,
    ) -> Result<Option<WmsReturnOrderId>, PlatformError> {
        let url = self.endpoint("ongoing/return/")?;
        let query = [
            ("retailer_id", retailer_id.to_string()),
            ("ext_internal_order_id", ext_internal_order_id.to_string()),
            ("ext_order_detail_id", ext_order_detail_id.to_string()),
        ];

        let response = self.http.get(url).query(&query).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let mapping: MappingResponse = check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::Parse(e.to_string()))?;
        Ok(Some(mapping.details.ongoing_return_id))
    }

    /// Push a classified inspection to the retailer platform. Terminal
    /// step of the inbound flow.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError` on network failure or non-success status.
    #[instrument(skip(self, inspection), fields(order = %inspection.ext_internal_order_id))]
    pub async fn report_inspection(
        &self,
        retailer_id: RetailerId,
        inspection: &Inspection,
    ) -> Result<(), PlatformError> {
        let url = self.endpoint(&format!(
            "wms/retailer-id/{retailer_id}/order_details/inspected/"
        ))?;

        let response = self.http.post(url).json(inspection).send().await?;
        check_status(response).await.map(|_| ())
    }

    fn endpoint(&self, path: &str) -> Result<Url, PlatformError> {
        self.base_url
            .join(path)
            .map_err(|e| PlatformError::Http(format!("invalid endpoint {path}: {e}")))
    }
}

#[async_trait::async_trait]
impl crate::reconcile::PlatformApi for PlatformClient {
    async fn record_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        return_order_id: WmsReturnOrderId,
        ext_internal_order_id: &str,
        ext_order_detail_ids: &[String],
    ) -> Result<(), PlatformError> {
        Self::record_return_order_mapping(
            self,
            retailer_id,
            return_order_id,
            ext_internal_order_id,
            ext_order_detail_ids,
        )
        .await
    }

    async fn get_return_order_mapping(
        &self,
        retailer_id: RetailerId,
        ext_internal_order_id: &str,
        ext_order_detail_id: &str,
    ) -> Result<Option<WmsReturnOrderId>, PlatformError> {
        Self::get_return_order_mapping(self, retailer_id, ext_internal_order_id, ext_order_detail_id)
            .await
    }

    async fn report_inspection(
        &self,
        retailer_id: RetailerId,
        inspection: &Inspection,
    ) -> Result<(), PlatformError> {
        Self::report_inspection(self, retailer_id, inspection).await
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, PlatformError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(PlatformError::Status {
        status: status.as_u16(),
        message,
    })
}
