//! Return Sync Worker library.
//!
//! Reconciles return-order state between the retailer platform and the
//! Ongoing WMS. Two flows, both fed by queue message batches:
//!
//! - **Outbound**: a customer's return request arrives; the worker locates
//!   the matching WMS order through a time-windowed search, provisions the
//!   return-cause taxonomy, creates a WMS return order, and records the
//!   cross-system mapping on the retailer platform.
//! - **Inbound**: a WMS pick/return webhook fires; the worker resolves the
//!   originating return via the recorded mapping, classifies the warehouse
//!   inspection outcome, and reports it back to the retailer platform.
//!
//! Neither system shares a primary key with the other, so every linkage
//! goes through the explicit mapping store owned by the retailer platform.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod ongoing;
pub mod platform;
pub mod queue;
pub mod reconcile;
pub mod routes;
pub mod state;
