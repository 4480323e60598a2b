//! Newtype IDs for type-safe cross-system references.
//!
//! The reconciliation pipeline juggles identifiers from three systems
//! (retailer platform, WMS, and the retailer's upstream shop). Newtypes
//! keep a WMS order id from ever standing in for a retailer id.

/// Macro to define a type-safe ID wrapper around `i64`.
///
/// Creates a newtype with `Serialize`/`Deserialize` (`#[serde(transparent)]`),
/// the usual derives, `new()`/`as_i64()` accessors, `Display`, and `From`
/// conversions in both directions.
#[macro_export]
macro_rules! define_id {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Retailer identifier on the retailer platform side.
    RetailerId
);
define_id!(
    /// WMS-side tenant identifier corresponding to one retailer.
    GoodsOwnerId
);
define_id!(
    /// WMS-internal identifier of an outbound order.
    WmsOrderId
);
define_id!(
    /// WMS-internal identifier of an order line.
    WmsOrderLineId
);
define_id!(
    /// WMS-internal identifier of a return order.
    ///
    /// The WMS never exposes which retailer-side request a return order
    /// originated from; this id is recorded against the identifying tuple
    /// in the retailer platform's mapping store right after creation.
    WmsReturnOrderId
);
