//! Warehouse inspection verdicts relayed to the retailer platform.

use serde::{Deserialize, Serialize};

/// Outcome of the warehouse's inspection of a returned item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InspectionResult {
    /// Item can go back into sellable stock.
    #[serde(rename = "OK")]
    Ok,
    /// Item was pulled from inventory (damaged, wrong item, ...).
    #[serde(rename = "Not OK")]
    NotOk,
}

/// Verdict for a single returned order detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionDetail {
    pub ext_internal_order_detail_id: String,
    /// Retailer-side detail id, filled in by the platform on receipt.
    pub order_detail_id: Option<i64>,
    pub inspection_result: InspectionResult,
    pub comment: String,
    pub last_changed: Option<String>,
}

/// The outward-facing inspection report for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    pub ext_order_id: Option<String>,
    pub ext_internal_order_id: String,
    pub inspected_order_details: Vec<InspectionDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_result_wire_strings() {
        assert_eq!(serde_json::to_string(&InspectionResult::Ok).unwrap(), r#""OK""#);
        assert_eq!(
            serde_json::to_string(&InspectionResult::NotOk).unwrap(),
            r#""Not OK""#
        );
    }

    #[test]
    fn test_inspection_serializes_for_platform() {
        let inspection = Inspection {
            ext_order_id: None,
            ext_internal_order_id: "4294950453313".to_string(),
            inspected_order_details: vec![InspectionDetail {
                ext_internal_order_detail_id: "10972741500993".to_string(),
                order_detail_id: None,
                inspection_result: InspectionResult::Ok,
                comment: "kan lagerforas".to_string(),
                last_changed: Some("2022-03-24".to_string()),
            }],
        };

        let json = serde_json::to_value(&inspection).unwrap();
        assert_eq!(
            json["inspected_order_details"][0]["inspection_result"],
            "OK"
        );
        assert_eq!(json["ext_internal_order_id"], "4294950453313");
    }
}
