//! Return orders created in and fetched from the WMS.

use serde::{Deserialize, Serialize};

use super::{ReturnCause, WmsOrderId, WmsOrderLineId, WmsReturnOrderId};

/// A return order to be created in the WMS.
///
/// Built by the return-order builder from a resolved [`super::WarehouseOrder`]
/// and the customer's return details; submitted in a single WMS call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReturnOrder {
    /// The outbound WMS order this return belongs to.
    pub order_id: WmsOrderId,
    pub return_order_number: String,
    pub lines: Vec<NewReturnOrderLine>,
    /// Human-readable summary attached for warehouse staff.
    pub comment: String,
}

/// One line of a return order being created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReturnOrderLine {
    pub row_number: String,
    pub order_line_id: WmsOrderLineId,
    pub quantity: u32,
    pub cause: ReturnCause,
}

/// A return order as the WMS reports it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsReturnOrder {
    pub id: WmsReturnOrderId,
    pub return_order_number: String,
    pub comment: String,
    /// When the returned goods arrived at the warehouse.
    pub in_date: Option<String>,
    pub lines: Vec<WmsReturnOrderLine>,
}

/// One line of a fetched return order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsReturnOrderLine {
    pub row_number: String,
    /// The outbound order line this return line points back to.
    pub customer_order_line_id: Option<WmsOrderLineId>,
    /// Quantity warehouse staff pulled from sellable stock during
    /// inspection. Zero means the item went back on the shelf.
    pub removed_from_inventory: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_return_order_round_trips() {
        let order = NewReturnOrder {
            order_id: WmsOrderId::new(70029),
            return_order_number: "70029 - 2022-04-29 05:40".to_string(),
            lines: vec![NewReturnOrderLine {
                row_number: "182129 - 2022-04-29 05:40".to_string(),
                order_line_id: WmsOrderLineId::new(182_129),
                quantity: 1,
                cause: ReturnCause::for_return_type("return").unwrap(),
            }],
            comment: String::new(),
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: NewReturnOrder = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);
    }
}
