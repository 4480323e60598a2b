//! End-to-end tests for the inbound flow: a WMS pick/return webhook is
//! walked back to the originating return and reported as an inspection.

use return_sync_core::{
    InspectionResult, RetailerId, WarehouseOrder, WarehouseOrderLine, WmsOrderId, WmsOrderLineId,
    WmsReturnOrder, WmsReturnOrderId, WmsReturnOrderLine,
};
use return_sync_worker::ongoing::types::PickWebhookEvent;
use return_sync_worker::reconcile::inspection::handle_return_webhook;

use return_sync_integration_tests::{
    FakePlatform, FakeWarehouse, RecordedMapping, integration, resolver,
};

fn wms_order() -> WarehouseOrder {
    WarehouseOrder {
        id: WmsOrderId::new(70029),
        order_number: "3990".to_string(),
        external_order_id: "4294950453313".to_string(),
        warehouse_remark: "220221 kan lagerforas".to_string(),
        shipped_on: Some("2022-04-30T09:12:00".to_string()),
        lines: vec![WarehouseOrderLine {
            line_id: WmsOrderLineId::new(182_129),
            external_detail_id: "10972741500993".to_string(),
            article_id: 21305,
            sku: "105 01 23 5".to_string(),
            product_name: "Linen shirt".to_string(),
            product_code: None,
            return_date: None,
            return_reason: None,
        }],
    }
}

fn wms_return_order(removed_from_inventory: f64) -> WmsReturnOrder {
    WmsReturnOrder {
        id: WmsReturnOrderId::new(117),
        return_order_number: "70029 - 2022-04-29 05:40".to_string(),
        comment: String::new(),
        in_date: Some("2022-05-02T14:03:11".to_string()),
        lines: vec![WmsReturnOrderLine {
            row_number: "182129 - 2022-04-29 05:40".to_string(),
            customer_order_line_id: Some(WmsOrderLineId::new(182_129)),
            removed_from_inventory,
        }],
    }
}

fn mapping() -> RecordedMapping {
    RecordedMapping {
        retailer_id: RetailerId::new(71),
        return_order_id: WmsReturnOrderId::new(117),
        ext_internal_order_id: "4294950453313".to_string(),
        ext_order_detail_ids: vec!["10972741500993".to_string()],
    }
}

fn webhook(is_returned: bool) -> PickWebhookEvent {
    serde_json::from_str(&format!(
        r#"{{
            "goodsOwnerId": 96,
            "isReturned": {is_returned},
            "order": {{
                "orderId": 70029,
                "orderNumber": "3990",
                "orderLine": {{
                    "orderLineId": 182129,
                    "rowNumber": "10972741500993"
                }}
            }}
        }}"#
    ))
    .unwrap()
}

#[tokio::test]
async fn test_restocked_return_is_reported_ok() {
    let warehouse = FakeWarehouse::new()
        .with_order(wms_order())
        .with_return_order(wms_return_order(0.0));
    let platform = FakePlatform::new().with_mapping(mapping());
    let integrations = resolver(vec![integration(71, 96)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(true))
        .await
        .unwrap();

    let inspections = platform.inspections();
    assert_eq!(inspections.len(), 1);
    let (retailer_id, inspection) = &inspections[0];
    assert_eq!(*retailer_id, RetailerId::new(71));
    assert_eq!(inspection.ext_internal_order_id, "4294950453313");
    assert_eq!(inspection.ext_order_id.as_deref(), Some("3990"));

    let detail = &inspection.inspected_order_details[0];
    assert_eq!(detail.ext_internal_order_detail_id, "10972741500993");
    assert_eq!(detail.inspection_result, InspectionResult::Ok);
    assert_eq!(detail.comment, "kan lagerforas");
    assert_eq!(detail.last_changed.as_deref(), Some("2022-05-02T14:03:11"));
}

#[tokio::test]
async fn test_removed_stock_is_reported_not_ok() {
    let warehouse = FakeWarehouse::new()
        .with_order(wms_order())
        .with_return_order(wms_return_order(1.0));
    let platform = FakePlatform::new().with_mapping(mapping());
    let integrations = resolver(vec![integration(71, 96)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(true))
        .await
        .unwrap();

    let inspections = platform.inspections();
    assert_eq!(inspections.len(), 1);
    assert_eq!(
        inspections[0].1.inspected_order_details[0].inspection_result,
        InspectionResult::NotOk
    );
}

#[tokio::test]
async fn test_non_return_event_is_ignored() {
    let warehouse = FakeWarehouse::new()
        .with_order(wms_order())
        .with_return_order(wms_return_order(0.0));
    let platform = FakePlatform::new().with_mapping(mapping());
    let integrations = resolver(vec![integration(71, 96)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(false))
        .await
        .unwrap();

    assert!(platform.inspections().is_empty());
}

#[tokio::test]
async fn test_unknown_goods_owner_is_a_silent_skip() {
    let warehouse = FakeWarehouse::new()
        .with_order(wms_order())
        .with_return_order(wms_return_order(0.0));
    let platform = FakePlatform::new().with_mapping(mapping());
    let integrations = resolver(vec![integration(84, 103)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(true))
        .await
        .unwrap();

    assert!(platform.inspections().is_empty());
}

#[tokio::test]
async fn test_missing_mapping_is_a_silent_skip() {
    // no return order was ever pushed for this detail
    let warehouse = FakeWarehouse::new()
        .with_order(wms_order())
        .with_return_order(wms_return_order(0.0));
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(true))
        .await
        .unwrap();

    assert!(platform.inspections().is_empty());
}

#[tokio::test]
async fn test_mapped_return_order_missing_from_wms_is_a_silent_skip() {
    let warehouse = FakeWarehouse::new().with_order(wms_order());
    let platform = FakePlatform::new().with_mapping(mapping());
    let integrations = resolver(vec![integration(71, 96)]);

    handle_return_webhook(&warehouse, &platform, &integrations, &webhook(true))
        .await
        .unwrap();

    assert!(platform.inspections().is_empty());
}
