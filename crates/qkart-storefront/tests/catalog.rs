mod common;

use common::*;
use qkart_commerce::prelude::*;
use qkart_data::mock::{ApiCall, Endpoint, MockStorefront};
use qkart_data::ApiError;
use qkart_storefront::{CatalogPage, NoticeLevel, SEARCH_DEBOUNCE};
use std::time::Duration;
use tokio::time::{sleep, Instant};

fn names(products: &[Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

#[tokio::test(start_paused = true)]
async fn test_burst_of_input_fires_one_search_after_pause() {
    let h = Harness::with_catalog();
    let page = CatalogPage::new(h.api(), h.notifier());
    let mut search = page.search_box();

    search.input("t");
    sleep(Duration::from_millis(100)).await;
    search.input("ta");
    sleep(Duration::from_millis(100)).await;
    search.input("tan");
    let last_input = Instant::now();

    sleep(Duration::from_millis(499)).await;
    assert_eq!(h.api.call_count(Endpoint::Search), 0);
    assert!(search.is_pending());

    sleep(Duration::from_millis(11)).await;
    let searches: Vec<(ApiCall, Instant)> = h
        .api
        .timed_calls()
        .into_iter()
        .filter(|(call, _)| call.endpoint() == Endpoint::Search)
        .collect();
    assert_eq!(searches.len(), 1);

    let (call, at) = &searches[0];
    assert_eq!(call, &ApiCall::SearchProducts("tan".to_string()));
    let waited = *at - last_input;
    assert!(
        waited >= SEARCH_DEBOUNCE && waited < SEARCH_DEBOUNCE + Duration::from_millis(5),
        "search fired after {waited:?}"
    );

    assert_eq!(
        names(&page.products()),
        vec!["Tan Leatherette Weekender Duffle"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_empty_search_reloads_all_products() {
    let h = Harness::with_catalog();
    let page = CatalogPage::new(h.api(), h.notifier());
    page.search("watch").await;
    assert_eq!(page.feed().len(), 1);

    let mut search = page.search_box();
    search.input("");
    sleep(SEARCH_DEBOUNCE + Duration::from_millis(10)).await;

    assert_eq!(page.feed().len(), 3);
    assert_eq!(h.api.call_count(Endpoint::Search), 1);
    assert_eq!(h.api.call_count(Endpoint::Products), 1);
}

#[tokio::test]
async fn test_search_not_found_is_empty_without_notice() {
    let h = Harness::with_catalog();
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(None).await;
    assert_eq!(page.feed().len(), 3);

    h.api.fail(
        Endpoint::Search,
        ApiError::Http {
            status: 404,
            message: None,
        },
    );
    page.search("kettle").await;

    assert!(page.products().is_empty());
    assert!(h.messages().is_empty());
}

#[tokio::test]
async fn test_search_failure_keeps_list_and_notifies() {
    let h = Harness::with_catalog();
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(None).await;

    h.api.fail(
        Endpoint::Search,
        ApiError::Http {
            status: 500,
            message: None,
        },
    );
    page.search("duffle").await;

    assert_eq!(page.feed().len(), 3);
    assert_eq!(h.messages(), vec!["Could not fetch products"]);
}

#[tokio::test]
async fn test_search_results_reach_subscribers() {
    let h = Harness::with_catalog();
    let page = CatalogPage::new(h.api(), h.notifier());
    let mut rx = page.feed().subscribe();

    page.search("racquet").await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(
        names(&rx.borrow_and_update()),
        vec!["YONEX Smash Badminton Racquet"]
    );
}

#[tokio::test]
async fn test_open_reports_network_and_server_failures_differently() {
    let h = Harness::new(MockStorefront::new());
    h.api
        .fail(Endpoint::Products, ApiError::Network("connection refused".into()));
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(None).await;

    h.api.fail(
        Endpoint::Products,
        ApiError::Http {
            status: 500,
            message: None,
        },
    );
    page.open(None).await;

    assert_eq!(
        h.messages(),
        vec![
            "Network error. Please check your connection.",
            "Could not fetch products. Please try again."
        ]
    );
    assert!(h
        .notices
        .notices()
        .iter()
        .all(|n| n.level == NoticeLevel::Error));
}

#[tokio::test]
async fn test_open_loads_cart_only_with_session() {
    let h = Harness::new(
        MockStorefront::new()
            .with_products(catalog())
            .with_cart(vec![CartRecord::new("p2", 2).unwrap()]),
    );
    let mut page = CatalogPage::new(h.api(), h.notifier());

    page.open(None).await;
    assert_eq!(h.api.call_count(Endpoint::Cart), 0);
    assert!(page.cart().is_empty());

    page.open(Some(&session(5000.0))).await;
    assert_eq!(h.api.call_count(Endpoint::Cart), 1);
    let items = page.cart_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].subtotal(), usd(120.0));
}

#[tokio::test]
async fn test_open_reports_cart_failure() {
    let h = Harness::with_catalog();
    h.api.fail(
        Endpoint::Cart,
        ApiError::Http {
            status: 401,
            message: None,
        },
    );
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(Some(&session(5000.0))).await;

    assert_eq!(page.feed().len(), 3);
    assert_eq!(h.messages(), vec!["Could not fetch cart items"]);
}
