mod common;

use common::*;
use qkart_commerce::prelude::*;
use qkart_data::mock::{ApiCall, Endpoint, MockStorefront};
use qkart_data::ApiError;
use qkart_storefront::{AddOutcome, CatalogPage, NoticeLevel};

async fn page_with_cart(cart: Vec<CartRecord>) -> (Harness, CatalogPage) {
    let h = Harness::new(MockStorefront::new().with_products(catalog()).with_cart(cart));
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(Some(&session(5000.0))).await;
    (h, page)
}

#[tokio::test]
async fn test_add_requires_login_and_sends_nothing() {
    let h = Harness::with_catalog();
    let mut page = CatalogPage::new(h.api(), h.notifier());
    page.open(None).await;

    let outcome = page.add_to_cart(None, &ProductId::new("p1")).await;

    assert_eq!(outcome, AddOutcome::LoginRequired);
    assert_eq!(h.api.call_count(Endpoint::CartUpsert), 0);
    let notice = h.notices.last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Warning);
    assert_eq!(notice.message, "Please login to add items to cart");
}

#[tokio::test]
async fn test_duplicate_add_warns_but_sidebar_update_is_sent() {
    let (h, mut page) = page_with_cart(vec![CartRecord::new("p1", 1).unwrap()]).await;
    let session = session(5000.0);
    let p1 = ProductId::new("p1");

    let outcome = page.add_to_cart(Some(&session), &p1).await;
    assert_eq!(outcome, AddOutcome::AlreadyInCart);
    assert_eq!(h.api.call_count(Endpoint::CartUpsert), 0);
    assert_eq!(h.messages(), vec!["Item already in cart"]);

    page.cart_mut().set_quantity(&session, &p1, 2).await.unwrap();
    assert_eq!(
        h.api.calls().last(),
        Some(&ApiCall::UpsertCartItem {
            product_id: p1.clone(),
            qty: 2
        })
    );
    assert_eq!(page.cart().records()[0].qty, 2);
}

#[tokio::test]
async fn test_add_new_product_uses_quantity_one() {
    let (h, mut page) = page_with_cart(vec![CartRecord::new("p1", 1).unwrap()]).await;
    let session = session(5000.0);

    let outcome = page.add_to_cart(Some(&session), &ProductId::new("p3")).await;

    assert_eq!(outcome, AddOutcome::Added);
    assert_eq!(
        h.api.calls().last(),
        Some(&ApiCall::UpsertCartItem {
            product_id: ProductId::new("p3"),
            qty: 1
        })
    );
    let ids: Vec<String> = page
        .cart_items()
        .iter()
        .map(|i| i.product_id.to_string())
        .collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert!(h.messages().is_empty());
}

#[tokio::test]
async fn test_zero_quantity_removes_line() {
    let (h, mut page) = page_with_cart(vec![
        CartRecord::new("p1", 1).unwrap(),
        CartRecord::new("p2", 3).unwrap(),
    ])
    .await;

    page.cart_mut()
        .set_quantity(&session(5000.0), &ProductId::new("p1"), 0)
        .await
        .unwrap();

    assert_eq!(page.cart().records(), &[CartRecord::new("p2", 3).unwrap()][..]);
    assert_eq!(h.api.cart(), page.cart().records());
}

#[tokio::test]
async fn test_failed_update_keeps_records() {
    let (h, mut page) = page_with_cart(vec![CartRecord::new("p1", 1).unwrap()]).await;
    h.api.fail(
        Endpoint::CartUpsert,
        ApiError::Http {
            status: 400,
            message: Some("Product doesn't exist".to_string()),
        },
    );

    let result = page
        .cart_mut()
        .set_quantity(&session(5000.0), &ProductId::new("p1"), 5)
        .await;

    assert!(result.is_err());
    assert_eq!(page.cart().records()[0].qty, 1);
    assert_eq!(h.messages(), vec!["Failed to update cart"]);
}

#[tokio::test]
async fn test_totals_follow_cart() {
    let (_h, page) = page_with_cart(vec![
        CartRecord::new("p1", 2).unwrap(),
        CartRecord::new("p2", 1).unwrap(),
    ])
    .await;

    let totals = page.cart().totals(&page.products());
    assert_eq!(totals.count, 3);
    assert_eq!(totals.value, usd(360.0));
}
