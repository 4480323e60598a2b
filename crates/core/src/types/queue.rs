//! Queue envelope and batch-result contract.
//!
//! The transport delivers batches shaped like
//! `{Records: [{messageId, body: {detail: {body: "<JSON string>"}}}]}` and
//! expects `{batchItemFailures: [{itemIdentifier}]}` back. Items not listed
//! as failures are considered fully processed and will not be redelivered.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Failure to decode a record's inner payload.
#[derive(Debug, Error)]
#[error("malformed queue payload: {0}")]
pub struct PayloadError(#[from] serde_json::Error);

/// A batch of queue messages as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEvent {
    #[serde(rename = "Records")]
    pub records: Vec<QueueRecord>,
}

/// One message in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    #[serde(rename = "messageId")]
    pub message_id: String,
    pub body: RecordBody,
}

/// Outer body wrapper added by the event bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBody {
    pub detail: RecordDetail,
}

/// Innermost wrapper; `body` is a JSON string holding the domain payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDetail {
    pub body: String,
}

impl QueueRecord {
    /// Decode the double-encoded domain payload.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError` if the inner string is not valid JSON for `T`.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, PayloadError> {
        Ok(serde_json::from_str(&self.body.detail.body)?)
    }

    /// Build a record from a serializable payload (test and tooling helper).
    ///
    /// Serialization of the plain data types used in this workspace cannot
    /// fail; a failure would surface as an empty inner body.
    #[must_use]
    pub fn wrap<T: Serialize>(message_id: &str, payload: &T) -> Self {
        Self {
            message_id: message_id.to_string(),
            body: RecordBody {
                detail: RecordDetail {
                    body: serde_json::to_string(payload).unwrap_or_default(),
                },
            },
        }
    }
}

/// Report returned to the transport after a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(rename = "batchItemFailures")]
    pub batch_item_failures: Vec<BatchItemFailure>,
}

impl BatchResult {
    /// Whether every message in the batch was processed successfully.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.batch_item_failures.is_empty()
    }
}

/// One message that could not be processed and should be redelivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItemFailure {
    #[serde(rename = "itemIdentifier")]
    pub item_identifier: String,
}
