//! Reconciliation of cart records against a catalog snapshot.

use crate::cart::CartRecord;
use crate::catalog::{Product, Rating};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cart record enriched with catalog details, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Product in the cart.
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Product category.
    pub category: String,
    /// Unit cost.
    #[serde(with = "crate::money::non_negative")]
    pub cost: Money,
    /// Product rating.
    pub rating: Rating,
    /// Image URL.
    pub image: String,
    /// Quantity in the cart.
    pub qty: u32,
}

impl CartLineItem {
    /// Join one record with its product.
    pub fn from_parts(record: &CartRecord, product: &Product) -> Self {
        Self {
            product_id: record.product_id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            rating: product.rating,
            image: product.image.clone(),
            qty: record.qty,
        }
    }

    /// Unit cost times quantity.
    pub fn subtotal(&self) -> Money {
        self.cost.saturating_mul(i64::from(self.qty))
    }
}

/// Join cart records with the catalog, preserving cart order.
///
/// Records whose product is absent from `catalog` are skipped with a
/// warning. An empty cart or an empty catalog yields an empty list.
pub fn reconcile(cart: &[CartRecord], catalog: &[Product]) -> Vec<CartLineItem> {
    if cart.is_empty() || catalog.is_empty() {
        return Vec::new();
    }

    let index = index_catalog(catalog);
    cart.iter()
        .filter_map(|record| match index.get(&record.product_id) {
            Some(product) => Some(CartLineItem::from_parts(record, product)),
            None => {
                tracing::warn!(
                    product_id = %record.product_id,
                    "cart references a product missing from the catalog; skipping"
                );
                None
            }
        })
        .collect()
}

/// Like [`reconcile`], but fails on the first unresolved record.
///
/// Only an empty cart yields an empty list. Against an empty catalog every
/// record is unresolved, so a non-empty cart fails.
pub fn reconcile_strict(
    cart: &[CartRecord],
    catalog: &[Product],
) -> Result<Vec<CartLineItem>, CommerceError> {
    if cart.is_empty() {
        return Ok(Vec::new());
    }

    let index = index_catalog(catalog);
    cart.iter()
        .map(|record| {
            index
                .get(&record.product_id)
                .map(|product| CartLineItem::from_parts(record, product))
                .ok_or_else(|| CommerceError::ProductNotFound(record.product_id.to_string()))
        })
        .collect()
}

fn index_catalog(catalog: &[Product]) -> HashMap<&ProductId, &Product> {
    // First occurrence wins, matching a linear find.
    let mut index = HashMap::with_capacity(catalog.len());
    for product in catalog {
        index.entry(&product.id).or_insert(product);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Duffle", "Fashion", Money::new(15_000, Currency::USD), 4)
                .with_image("duffle.png"),
            Product::new("p2", "Headphones", "Electronics", Money::new(9_900, Currency::USD), 5),
            Product::new("p3", "Basketball", "Sports", Money::new(4_800, Currency::USD), 3),
        ]
    }

    fn record(id: &str, qty: u32) -> CartRecord {
        CartRecord::new(id, qty).unwrap()
    }

    #[test]
    fn test_reconcile_preserves_cart_order() {
        let cart = vec![record("p3", 1), record("p1", 2), record("p2", 5)];
        let items = reconcile(&cart, &catalog());

        let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p1", "p2"]);
        assert_eq!(items.len(), cart.len());
    }

    #[test]
    fn test_reconcile_copies_product_fields() {
        let items = reconcile(&[record("p1", 2)], &catalog());
        let item = &items[0];
        assert_eq!(item.name, "Duffle");
        assert_eq!(item.category, "Fashion");
        assert_eq!(item.cost.amount_cents, 15_000);
        assert_eq!(item.rating.stars(), 4);
        assert_eq!(item.image, "duffle.png");
        assert_eq!(item.qty, 2);
    }

    #[test]
    fn test_reconcile_empty_inputs() {
        assert!(reconcile(&[], &catalog()).is_empty());
        assert!(reconcile(&[record("p1", 1)], &[]).is_empty());
        assert_eq!(reconcile_strict(&[], &[]), Ok(Vec::new()));
    }

    #[test]
    fn test_reconcile_strict_fails_against_empty_catalog() {
        assert_eq!(
            reconcile_strict(&[record("p1", 1)], &[]),
            Err(CommerceError::ProductNotFound("p1".to_string()))
        );
    }

    #[test]
    fn test_reconcile_skips_unknown_products() {
        let cart = vec![record("p1", 1), record("gone", 2), record("p2", 1)];
        let items = reconcile(&cart, &catalog());
        let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_reconcile_strict_reports_unknown_product() {
        let cart = vec![record("p1", 1), record("gone", 2)];
        assert_eq!(
            reconcile_strict(&cart, &catalog()),
            Err(CommerceError::ProductNotFound("gone".to_string()))
        );
    }

    #[test]
    fn test_line_item_subtotal() {
        let items = reconcile(&[record("p2", 3)], &catalog());
        assert_eq!(items[0].subtotal().amount_cents, 29_700);
    }
}
