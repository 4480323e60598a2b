//! Batch message processing with per-item failure isolation.
//!
//! One message's failure must never abort its siblings: every record
//! yields either silent success or an entry in the batch-failure report.
//! The transport redelivers reported items later (at-least-once delivery;
//! every flow is safe to reprocess).

use std::future::Future;

use tracing::error;

use return_sync_core::{BatchItemFailure, BatchResult, QueueEvent, QueueRecord};

use crate::error::ReconcileError;

/// Drive a handler over a batch of queue messages.
///
/// Records are processed sequentially; the steps inside one message are
/// strictly ordered, but nothing orders two messages relative to each
/// other. Every per-record error - including a payload that fails to
/// decode - is caught here, logged with the message id, and converted to a
/// batch-item failure. No error escapes.
pub async fn process_batch<F, Fut>(event: QueueEvent, mut handler: F) -> BatchResult
where
    F: FnMut(QueueRecord) -> Fut,
    Fut: Future<Output = Result<(), ReconcileError>>,
{
    let mut batch_item_failures = Vec::new();

    for record in event.records {
        let message_id = record.message_id.clone();
        if let Err(err) = handler(record).await {
            error!(%message_id, error = %err, "queue message could not be processed");
            batch_item_failures.push(BatchItemFailure {
                item_identifier: message_id,
            });
        }
    }

    BatchResult { batch_item_failures }
}
