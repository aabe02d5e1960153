//! Unit tests for stock and price reconciliation.

use chrono::TimeZone;

use super::*;

fn ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap()
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn feed() -> Vec<FeedRecord> {
    vec![
        FeedRecord::new("66890", ">10", "5'990.00 руб."),
        FeedRecord::new("11021", "1", "1200 руб."),
        FeedRecord::new("78134", "4", "12'490.00 руб."),
        FeedRecord::new("99999", "7", "100 руб."),
    ]
}

mod reconcile_stocks_tests {
    use super::*;

    #[test]
    fn feed_offers_then_zero_filled_offers() {
        let known = ids(&["A-1", "78134", "66890", "11021", "B-2"]);

        let stocks = reconcile_stocks(&feed(), &known, None, ts()).unwrap();

        let summary: Vec<(&str, u32)> = stocks
            .iter()
            .map(|s| (s.offer_id.as_str(), s.quantity))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("66890", 100),
                ("11021", 0),
                ("78134", 4),
                ("A-1", 0),
                ("B-2", 0),
            ]
        );
    }

    #[test]
    fn feed_codes_unknown_to_marketplace_are_ignored() {
        let known = ids(&["66890"]);
        let stocks = reconcile_stocks(&feed(), &known, None, ts()).unwrap();

        assert_eq!(stocks.len(), 1);
        assert!(stocks.iter().all(|s| s.offer_id != "99999"));
    }

    #[test]
    fn carries_warehouse_and_timestamp() {
        let known = ids(&["66890", "X"]);
        let stocks = reconcile_stocks(&feed(), &known, Some("12345"), ts()).unwrap();

        for stock in &stocks {
            assert_eq!(stock.warehouse_id.as_deref(), Some("12345"));
            assert_eq!(stock.updated_at(), "2024-10-01T09:30:00Z");
        }
    }

    #[test]
    fn repeated_feed_code_counts_once() {
        let records = vec![
            FeedRecord::new("A", "3", "1"),
            FeedRecord::new("A", ">10", "1"),
        ];
        let stocks = reconcile_stocks(&records, &ids(&["A"]), None, ts()).unwrap();

        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].quantity, 3);
    }

    #[test]
    fn duplicate_known_ids_are_zero_filled_once() {
        let stocks = reconcile_stocks(&[], &ids(&["A", "A", "B"]), None, ts()).unwrap();
        assert_eq!(stocks.len(), 2);
    }

    #[test]
    fn does_not_consume_callers_list() {
        let known = ids(&["66890", "11021"]);
        reconcile_stocks(&feed(), &known, None, ts()).unwrap();

        assert_eq!(known, ids(&["66890", "11021"]));
        let prices = reconcile_prices(&feed(), &known, "RUB").unwrap();
        assert_eq!(prices.len(), 2);
    }

    #[test]
    fn invalid_quantity_fails_for_matched_offer() {
        let records = vec![FeedRecord::new("A", "под заказ", "1")];
        match reconcile_stocks(&records, &ids(&["A"]), None, ts()).unwrap_err() {
            SyncError::InvalidQuantity { code, .. } => assert_eq!(code, "A"),
            other => panic!("Expected SyncError::InvalidQuantity, got: {other:?}"),
        }
    }

    #[test]
    fn invalid_quantity_is_ignored_for_unknown_offer() {
        let records = vec![FeedRecord::new("A", "под заказ", "1")];
        let stocks = reconcile_stocks(&records, &ids(&["B"]), None, ts()).unwrap();
        assert_eq!(stocks.len(), 1);
        assert_eq!(stocks[0].quantity, 0);
    }
}

mod reconcile_prices_tests {
    use super::*;

    #[test]
    fn prices_only_for_offers_in_feed() {
        let known = ids(&["66890", "11021", "A-1"]);
        let prices = reconcile_prices(&feed(), &known, "RUR").unwrap();

        assert_eq!(
            prices,
            vec![
                PriceUpdate {
                    offer_id: "66890".to_string(),
                    price: "5990".to_string(),
                    currency: "RUR".to_string(),
                },
                PriceUpdate {
                    offer_id: "11021".to_string(),
                    price: "1200".to_string(),
                    currency: "RUR".to_string(),
                },
            ]
        );
    }

    #[test]
    fn empty_price_is_rejected() {
        let records = vec![FeedRecord::new("A", "2", "руб.")];
        match reconcile_prices(&records, &ids(&["A"]), "RUB").unwrap_err() {
            SyncError::InvalidPrice { code, value } => {
                assert_eq!(code, "A");
                assert_eq!(value, "руб.");
            }
            other => panic!("Expected SyncError::InvalidPrice, got: {other:?}"),
        }
    }

    #[test]
    fn repeated_feed_code_priced_once() {
        let records = vec![FeedRecord::new("A", "2", "100"), FeedRecord::new("A", "2", "200")];
        let prices = reconcile_prices(&records, &ids(&["A"]), "RUB").unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].price, "100");
    }
}

#[test]
fn in_stock_filters_zero_quantities() {
    let known = ids(&["66890", "11021", "78134", "A-1"]);
    let stocks = reconcile_stocks(&feed(), &known, None, ts()).unwrap();

    let available: Vec<&str> = in_stock(&stocks)
        .into_iter()
        .map(|s| s.offer_id.as_str())
        .collect();
    assert_eq!(available, vec!["66890", "78134"]);
}

#[test]
fn update_timestamp_has_no_subseconds() {
    assert_eq!(update_timestamp().timestamp_subsec_nanos(), 0);
}
