//! Return-cause taxonomy.
//!
//! The WMS tags every return-order line with a cause code. The taxonomy is
//! a small closed set owned by this integration; causes must exist on the
//! WMS side (per goods owner) before a return order references them, so
//! the outbound flow upserts them on every run.

use serde::{Deserialize, Serialize};

/// A WMS return cause: why goods came back.
///
/// Immutable value record looked up by string key. Creating a cause that
/// already exists replaces it by `code`, so provisioning is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnCause {
    /// Stable WMS-side code, e.g. `yayloh_return`.
    pub code: String,
    /// Name shown to warehouse staff, e.g. `Return`.
    pub display_name: String,
    /// Whether registering this cause removes the item from stock.
    pub removes_stock: bool,
    /// Whether this cause allows exchanging the item.
    pub allows_change: bool,
    /// Whether warehouse staff must enter a comment for this cause.
    pub comment_required: bool,
}

impl ReturnCause {
    fn fixed(code: &str, display_name: &str) -> Self {
        Self {
            code: code.to_string(),
            display_name: display_name.to_string(),
            removes_stock: false,
            allows_change: false,
            comment_required: false,
        }
    }

    /// The full fixed taxonomy provisioned for every goods owner.
    #[must_use]
    pub fn taxonomy() -> Vec<Self> {
        vec![
            Self::fixed("yayloh_return", "Return"),
            Self::fixed("yayloh_exchange", "Exchange"),
            Self::fixed("yayloh_claim", "Claim"),
        ]
    }

    /// Resolve the cause for a return request's `return_type` field.
    ///
    /// Matching is case-insensitive on the display name ("return",
    /// "EXCHANGE", ...). An unknown type returns `None`; callers must treat
    /// that as bad input rather than guessing a default cause.
    #[must_use]
    pub fn for_return_type(return_type: &str) -> Option<Self> {
        Self::taxonomy()
            .into_iter()
            .find(|cause| cause.display_name.eq_ignore_ascii_case(return_type.trim()))
    }
}
