//! HTTP route handlers for the worker.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//!
//! # Queue event intake
//! POST /events/return-requests       - Batch of retailer return requests
//! POST /events/return-order-webhook  - Batch of WMS pick/return webhooks
//! ```
//!
//! Both event endpoints accept the queue batch envelope and always answer
//! `200 OK` with a batch-failure report; the transport redelivers the
//! reported items.

use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use tower_http::trace::TraceLayer;

use return_sync_core::{BatchResult, QueueEvent, ReturnRequest};

use crate::ongoing::types::PickWebhookEvent;
use crate::queue::process_batch;
use crate::reconcile;
use crate::state::AppState;

/// Build the worker router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events/return-requests", post(return_requests))
        .route("/events/return-order-webhook", post(return_order_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Process a batch of retailer return requests (outbound flow).
async fn return_requests(
    State(state): State<AppState>,
    Json(event): Json<QueueEvent>,
) -> Json<BatchResult> {
    let result = process_batch(event, |record| {
        let state = state.clone();
        async move {
            let request: ReturnRequest = record.payload()?;
            reconcile::push_return_request(
                state.warehouse(),
                state.platform(),
                state.integrations(),
                &request,
            )
            .await
        }
    })
    .await;

    Json(result)
}

/// Process a batch of WMS pick/return webhook events (inbound flow).
async fn return_order_webhook(
    State(state): State<AppState>,
    Json(event): Json<QueueEvent>,
) -> Json<BatchResult> {
    let result = process_batch(event, |record| {
        let state = state.clone();
        async move {
            let webhook: PickWebhookEvent = record.payload()?;
            reconcile::inspection::handle_return_webhook(
                state.warehouse(),
                state.platform(),
                state.integrations(),
                &webhook,
            )
            .await
        }
    })
    .await;

    Json(result)
}
