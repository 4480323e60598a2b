//! Batch intake tests: one poisoned message never takes its siblings down,
//! and exactly the failing message ids come back in the failure report.

use return_sync_core::{ReturnRequest, WarehouseOrder, WarehouseOrderLine, WmsOrderId, WmsOrderLineId};
use return_sync_worker::queue::process_batch;
use return_sync_worker::reconcile::push_return_request;

use return_sync_integration_tests::{FakePlatform, FakeWarehouse, integration, queue_event, resolver};

fn order(id: i64, external_order_id: &str, detail_id: &str) -> WarehouseOrder {
    WarehouseOrder {
        id: WmsOrderId::new(id),
        order_number: id.to_string(),
        external_order_id: external_order_id.to_string(),
        warehouse_remark: String::new(),
        shipped_on: None,
        lines: vec![WarehouseOrderLine {
            line_id: WmsOrderLineId::new(id * 10),
            external_detail_id: detail_id.to_string(),
            article_id: 21305,
            sku: "105 01 23 5".to_string(),
            product_name: "Linen shirt".to_string(),
            product_code: None,
            return_date: None,
            return_reason: None,
        }],
    }
}

fn request(external_order_id: &str, detail_id: &str) -> serde_json::Value {
    serde_json::json!({
        "retailer_id": 71,
        "ext_internal_order_id": external_order_id,
        "order_date": "2022-04-29 05:40:08",
        "return_details": [{
            "ext_order_detail_id": detail_id,
            "amount": 1,
            "reason": "Wrong size",
            "return_type": "return",
            "sku_number": "105 01 23 5"
        }]
    })
}

#[tokio::test]
async fn test_only_the_failing_messages_are_reported() {
    // order B's window search hits a WMS outage; A and C go through
    let warehouse = FakeWarehouse::new()
        .with_order(order(70029, "order-a", "detail-a"))
        .with_order(order(70031, "order-c", "detail-c"))
        .with_failing_search("order-b");
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    let event = queue_event(&[
        ("msg-a", request("order-a", "detail-a")),
        ("msg-b", request("order-b", "detail-b")),
        ("msg-c", request("order-c", "detail-c")),
    ]);

    let result = process_batch(event, |record| {
        let (warehouse, platform, integrations) = (&warehouse, &platform, &integrations);
        async move {
            let request: ReturnRequest = record.payload()?;
            push_return_request(warehouse, platform, integrations, &request).await
        }
    })
    .await;

    let failed: Vec<&str> = result
        .batch_item_failures
        .iter()
        .map(|f| f.item_identifier.as_str())
        .collect();
    assert_eq!(failed, ["msg-b"]);

    // the siblings completed despite the failure in between
    assert_eq!(warehouse.created().len(), 2);
    assert_eq!(platform.mappings().len(), 2);
}

#[tokio::test]
async fn test_undecodable_payload_fails_only_its_own_message() {
    let warehouse = FakeWarehouse::new().with_order(order(70029, "order-a", "detail-a"));
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    let event = queue_event(&[
        ("msg-garbage", serde_json::json!({"not": "a return request"})),
        ("msg-a", request("order-a", "detail-a")),
    ]);

    let result = process_batch(event, |record| {
        let (warehouse, platform, integrations) = (&warehouse, &platform, &integrations);
        async move {
            let request: ReturnRequest = record.payload()?;
            push_return_request(warehouse, platform, integrations, &request).await
        }
    })
    .await;

    let failed: Vec<&str> = result
        .batch_item_failures
        .iter()
        .map(|f| f.item_identifier.as_str())
        .collect();
    assert_eq!(failed, ["msg-garbage"]);
    assert_eq!(warehouse.created().len(), 1);
}

#[tokio::test]
async fn test_clean_batch_reports_nothing() {
    let warehouse = FakeWarehouse::new().with_order(order(70029, "order-a", "detail-a"));
    let platform = FakePlatform::new();
    let integrations = resolver(vec![integration(71, 96)]);

    let event = queue_event(&[("msg-a", request("order-a", "detail-a"))]);

    let result = process_batch(event, |record| {
        let (warehouse, platform, integrations) = (&warehouse, &platform, &integrations);
        async move {
            let request: ReturnRequest = record.payload()?;
            push_return_request(warehouse, platform, integrations, &request).await
        }
    })
    .await;

    assert!(result.is_clean());
    assert!(result.batch_item_failures.is_empty());
}
