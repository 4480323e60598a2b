//! Error taxonomy for the reconciliation worker.
//!
//! Three layers:
//! - [`WarehouseError`] - failures talking to the WMS
//! - [`PlatformError`] - failures talking to the retailer platform
//! - [`ReconcileError`] - per-message failures surfaced to the batch
//!   processor, which converts them into batch-item failures
//!
//! Expected outcomes - a retailer without a configured integration, or an
//! order miss within the search window - are not errors. They are modeled
//! as `Option` returns and stop the flow silently, because they must never
//! surface as batch failures.

use return_sync_core::PayloadError;
use thiserror::Error;

/// Failure of a WMS request.
///
/// No retry logic lives at this level; a failed call fails the message and
/// the transport redelivers it later.
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// The request did not complete within the configured timeout.
    #[error("warehouse request timed out")]
    Timeout,

    /// Network failure or WMS 5xx.
    #[error("warehouse unavailable: {0}")]
    Unavailable(String),

    /// WMS 4xx - malformed payload or bad credentials.
    #[error("warehouse rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("warehouse response parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WarehouseError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Unavailable(error.to_string())
        }
    }
}

/// Failure of a retailer-platform request.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Network failure or timeout.
    #[error("platform request failed: {0}")]
    Http(String),

    /// Platform returned a non-success status.
    #[error("platform returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("platform response parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for PlatformError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Parse(error.to_string())
        } else {
            Self::Http(error.to_string())
        }
    }
}

/// A per-message failure.
///
/// Everything here fails exactly one queue message; the batch processor
/// catches it, logs it, and reports the message id for redelivery.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// WMS call failed.
    #[error(transparent)]
    Warehouse(#[from] WarehouseError),

    /// Retailer platform call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The WMS return order was created but the mapping write failed.
    ///
    /// Must fail the item: without the mapping the inbound flow can never
    /// trace the WMS return order back to the originating request.
    #[error("failed to record return-order mapping: {0}")]
    MappingRecord(#[source] PlatformError),

    /// The retailer platform sent a `return_type` outside the taxonomy.
    /// Guessing a default cause would misclassify the return, so the item
    /// fails instead.
    #[error("unknown return cause type: {0:?}")]
    UnknownReturnCause(String),

    /// The queue message body was not valid JSON for the expected payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_error_display() {
        let err = WarehouseError::Rejected {
            status: 401,
            message: "bad credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "warehouse rejected request (401): bad credentials"
        );
    }

    #[test]
    fn test_mapping_record_keeps_source() {
        let err = ReconcileError::MappingRecord(PlatformError::Status {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "failed to record return-order mapping: platform returned 500: boom"
        );
    }

    #[test]
    fn test_unknown_cause_display() {
        let err = ReconcileError::UnknownReturnCause("refund".to_string());
        assert_eq!(err.to_string(), r#"unknown return cause type: "refund""#);
    }
}
