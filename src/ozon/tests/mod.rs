//! Unit tests for the Ozon Seller API module.


use super::OzonApi;

fn api_with_mock(mock_uri: &str) -> OzonApi {
    OzonApi::new(
        reqwest::Client::new(),
        "client_42".to_string(),
        "test_key".to_string(),
    )
    .with_base_url(mock_uri)
}
