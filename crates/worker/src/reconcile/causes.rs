//! Provisioning of the return-cause taxonomy.

use tracing::warn;

use return_sync_core::ReturnCause;

use crate::config::WarehouseIntegration;
use crate::error::ReconcileError;
use crate::reconcile::WarehouseApi;

/// Ensure the fixed taxonomy exists on the WMS side for this goods owner.
///
/// Upserts every cause on every outbound run; the WMS replaces by code, so
/// nothing accumulates. Best-effort: a failed upsert is logged and does
/// not block the remaining causes or the flow, since a missing cause only
/// affects lines that reference it.
pub async fn ensure_causes<W>(warehouse: &W, integration: &WarehouseIntegration)
where
    W: WarehouseApi + ?Sized,
{
    for cause in ReturnCause::taxonomy() {
        if let Err(error) = warehouse.create_return_cause(integration, &cause).await {
            warn!(code = %cause.code, %error, "return cause upsert failed");
        }
    }
}

/// Resolve the cause for a return request's `return_type`.
///
/// # Errors
///
/// Returns `ReconcileError::UnknownReturnCause` for a type outside the
/// taxonomy; defaulting would misclassify the return, so the item fails.
pub fn cause_for_return_type(return_type: &str) -> Result<ReturnCause, ReconcileError> {
    ReturnCause::for_return_type(return_type)
        .ok_or_else(|| ReconcileError::UnknownReturnCause(return_type.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_resolve() {
        assert_eq!(cause_for_return_type("return").unwrap().code, "yayloh_return");
        assert_eq!(cause_for_return_type("Exchange").unwrap().code, "yayloh_exchange");
    }

    #[test]
    fn test_unknown_type_is_hard_failure() {
        let err = cause_for_return_type("store-credit").unwrap_err();
        assert!(matches!(err, ReconcileError::UnknownReturnCause(t) if t == "store-credit"));
    }
}
