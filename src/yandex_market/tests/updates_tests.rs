//! Tests for Yandex Market stock and price updates.

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::SyncError;
use crate::reconcile::{PriceUpdate, StockUpdate};
use crate::yandex_market::{PRICE_BATCH_SIZE, STOCK_BATCH_SIZE};

use super::api_with_mock;

const CAMPAIGN: &str = "21000001";

fn stocks(count: usize) -> Vec<StockUpdate> {
    (0..count)
        .map(|i| StockUpdate {
            offer_id: format!("SKU-{i}"),
            quantity: 1,
            warehouse_id: Some("555".to_string()),
            timestamp: Utc::now(),
        })
        .collect()
}

fn prices(count: usize) -> Vec<PriceUpdate> {
    (0..count)
        .map(|i| PriceUpdate {
            offer_id: format!("SKU-{i}"),
            price: "990".to_string(),
            currency: "RUR".to_string(),
        })
        .collect()
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" }))
}

#[tokio::test]
async fn upload_stocks_puts_batches_of_two_thousand() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("PUT"))
        .and(path("/campaigns/21000001/offers/stocks"))
        .and(header("Authorization", "Bearer test_token"))
        .respond_with(ok())
        .expect(2)
        .mount(&mock_server)
        .await;

    let calls = api
        .upload_stocks(CAMPAIGN, &stocks(STOCK_BATCH_SIZE + 10))
        .await
        .unwrap();
    assert_eq!(calls, 2);

    let requests = mock_server.received_requests().await.unwrap();
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(first["skus"].as_array().unwrap().len(), STOCK_BATCH_SIZE);
    assert_eq!(second["skus"].as_array().unwrap().len(), 10);
    assert_eq!(first["skus"][0]["warehouseId"], "555");
    assert_eq!(first["skus"][0]["items"][0]["type"], "FIT");
}

#[tokio::test]
async fn upload_prices_posts_batches_of_five_hundred() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/campaigns/21000001/offer-prices/updates"))
        .and(header("Authorization", "Bearer test_token"))
        .respond_with(ok())
        .expect(3)
        .mount(&mock_server)
        .await;

    let calls = api
        .upload_prices(CAMPAIGN, &prices(PRICE_BATCH_SIZE * 3))
        .await
        .unwrap();
    assert_eq!(calls, 3);

    let requests = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[2].body).unwrap();
    assert_eq!(body["offers"].as_array().unwrap().len(), PRICE_BATCH_SIZE);
    assert_eq!(
        body["offers"][0],
        json!({ "id": "SKU-1000", "price": { "value": 990, "currencyId": "RUR" } })
    );
}

#[tokio::test]
async fn non_ok_status_is_not_fatal() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "PARTIAL" })))
        .mount(&mock_server)
        .await;

    assert_eq!(api.upload_stocks(CAMPAIGN, &stocks(1)).await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_price_fails_before_any_call() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .respond_with(ok())
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut updates = prices(2);
    updates[1].price = "abc".to_string();

    match api.upload_prices(CAMPAIGN, &updates).await.unwrap_err() {
        SyncError::InvalidPrice { code, .. } => assert_eq!(code, "SKU-1"),
        other => panic!("Expected SyncError::InvalidPrice, got: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_stops_upload() {
    let mock_server = MockServer::start().await;
    let api = api_with_mock(&mock_server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&mock_server)
        .await;

    match api
        .upload_stocks(CAMPAIGN, &stocks(STOCK_BATCH_SIZE * 2))
        .await
        .unwrap_err()
    {
        SyncError::Api { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "internal");
        }
        other => panic!("Expected SyncError::Api, got: {other:?}"),
    }
}
