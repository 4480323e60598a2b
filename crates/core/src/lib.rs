//! Return Sync Core - Shared domain types.
//!
//! This crate provides the types exchanged between the reconciliation
//! worker and its collaborators:
//! - `worker` - Queue-driven reconciliation service
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Wire
//! formats for the WMS REST surface live next to the client that speaks
//! them; this crate holds the domain projections both flows share.
//!
//! # Modules
//!
//! - [`types`] - Orders, return causes, return requests, inspections, and
//!   the queue envelope / batch-result contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
