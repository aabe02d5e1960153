//! Unit tests for the Yandex Market Partner API module.

mod updates_tests;

use super::YandexMarketApi;

fn api_with_mock(mock_uri: &str) -> YandexMarketApi {
    YandexMarketApi::new(reqwest::Client::new(), "test_token".to_string()).with_base_url(mock_uri)
}
