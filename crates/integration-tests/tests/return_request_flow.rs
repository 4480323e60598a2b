//! End-to-end tests for the outbound flow: a retailer return request
//! becomes a WMS return order plus a recorded cross-system mapping.

use return_sync_core::{
    RetailerId, ReturnRequest, WarehouseOrder, WarehouseOrderLine, WmsOrderId, WmsOrderLineId,
    WmsReturnOrderId,
};
use return_sync_worker::error::ReconcileError;
use return_sync_worker::reconcile::push_return_request;

use return_sync_integration_tests::{FakePlatform, FakeWarehouse, integration, resolver};

fn shipped_order() -> WarehouseOrder {
    WarehouseOrder {
        id: WmsOrderId::new(70029),
        order_number: "3990".to_string(),
        external_order_id: "4294950453313".to_string(),
        warehouse_remark: String::new(),
        shipped_on: Some("2022-04-30T09:12:00".to_string()),
        lines: vec![
            WarehouseOrderLine {
                line_id: WmsOrderLineId::new(182_129),
                external_detail_id: "10972741500993".to_string(),
                article_id: 21305,
                sku: "105 01 23 5".to_string(),
                product_name: "Linen shirt".to_string(),
                product_code: None,
                return_date: None,
                return_reason: None,
            },
            WarehouseOrderLine {
                line_id: WmsOrderLineId::new(182_130),
                external_detail_id: "10972741533761".to_string(),
                article_id: 21306,
                sku: "105 01 23 4".to_string(),
                product_name: "Linen shirt".to_string(),
                product_code: None,
                return_date: None,
                return_reason: None,
            },
        ],
    }
}

fn request(return_type: &str) -> ReturnRequest {
    serde_json::from_str(&format!(
        r#"{{
            "retailer_id": 71,
            "ext_internal_order_id": "4294950453313",
            "order_date": "2022-04-29 05:40:08",
            "return_details": [
                {{
                    "ext_order_detail_id": "10972741500993",
                    "amount": 1,
                    "reason": "Wrong size",
                    "return_type": "{return_type}",
                    "sku_number": "105 01 23 5"
                }}
            ]
        }}"#
    ))
    .unwrap()
}

#[tokio::test]
async fn test_return_request_creates_wms_return_order_and_mapping() {
    let warehouse = FakeWarehouse::new().with_order(shipped_order());
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap();

    let created = warehouse.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].order_id, WmsOrderId::new(70029));
    assert_eq!(created[0].lines.len(), 1);
    assert_eq!(created[0].lines[0].order_line_id, WmsOrderLineId::new(182_129));
    assert_eq!(created[0].lines[0].quantity, 1);
    assert_eq!(created[0].lines[0].cause.code, "yayloh_return");
    assert!(created[0].comment.contains("105 01 23 5"));

    let mappings = platform.mappings();
    assert_eq!(mappings.len(), 1);
    assert_eq!(mappings[0].retailer_id, RetailerId::new(71));
    assert_eq!(mappings[0].return_order_id, WmsReturnOrderId::new(117));
    assert_eq!(mappings[0].ext_internal_order_id, "4294950453313");
    assert_eq!(mappings[0].ext_order_detail_ids, ["10972741500993"]);
}

#[tokio::test]
async fn test_cause_taxonomy_is_provisioned_before_submission() {
    let warehouse = FakeWarehouse::new().with_order(shipped_order());
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap();

    assert_eq!(
        warehouse.upserted_causes(),
        ["yayloh_return", "yayloh_exchange", "yayloh_claim"]
    );
}

#[tokio::test]
async fn test_unconfigured_retailer_is_a_silent_skip() {
    let warehouse = FakeWarehouse::new().with_order(shipped_order());
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(84, 103)]);

    push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap();

    assert!(warehouse.created().is_empty());
    assert!(warehouse.upserted_causes().is_empty());
    assert!(platform.mappings().is_empty());
}

#[tokio::test]
async fn test_order_miss_in_window_is_a_silent_skip() {
    // no order preloaded, so the window search finds nothing
    let warehouse = FakeWarehouse::new();
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap();

    assert!(warehouse.created().is_empty());
    assert!(platform.mappings().is_empty());
}

#[tokio::test]
async fn test_duplicate_wms_detail_ids_still_submit() {
    // two WMS lines carrying the same retailer detail id both match the
    // single requested detail
    let mut order = shipped_order();
    order.lines[1].external_detail_id = "10972741500993".to_string();
    let warehouse = FakeWarehouse::new().with_order(order);
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap();

    let created = warehouse.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].lines.len(), 2);
    assert_eq!(
        platform.mappings()[0].ext_order_detail_ids,
        ["10972741500993", "10972741500993"]
    );
}

#[tokio::test]
async fn test_mapping_write_failure_fails_the_item() {
    let warehouse = FakeWarehouse::new().with_order(shipped_order());
    let platform = FakePlatform::new().with_failing_mapping_writes();
    let integrations = resolver(vec![integration(71, 96)]);

    let err = push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::MappingRecord(_)));
    // the WMS call already went through; redelivery will retry the mapping
    assert_eq!(warehouse.created().len(), 1);
}

#[tokio::test]
async fn test_unknown_return_type_fails_before_any_wms_write() {
    let warehouse = FakeWarehouse::new().with_order(shipped_order());
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    let err = push_return_request(&warehouse, &platform, &integrations, &request("store-credit"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::UnknownReturnCause(t) if t == "store-credit"));
    assert!(warehouse.created().is_empty());
    assert!(platform.mappings().is_empty());
}

#[tokio::test]
async fn test_wms_search_failure_propagates() {
    let warehouse = FakeWarehouse::new().with_failing_search("4294950453313");
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    let err = push_return_request(&warehouse, &platform, &integrations, &request("return"))
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::Warehouse(_)));
}
