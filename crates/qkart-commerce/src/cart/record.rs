//! Minimal cart records as stored server-side.

use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// One cart entry: a product reference and a positive quantity.
///
/// Only the server creates these; the client receives the full list back
/// from every cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    /// Product in the cart.
    pub product_id: ProductId,
    /// Quantity, always at least one.
    pub qty: u32,
}

impl CartRecord {
    /// Create a record, rejecting a zero quantity.
    pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Result<Self, CommerceError> {
        if qty == 0 {
            return Err(CommerceError::InvalidQuantity(qty));
        }
        Ok(Self {
            product_id: product_id.into(),
            qty,
        })
    }

    /// Find the record for a product.
    pub fn find<'a>(records: &'a [CartRecord], product_id: &ProductId) -> Option<&'a CartRecord> {
        records.iter().find(|r| &r.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_api_json() {
        let records: Vec<CartRecord> =
            serde_json::from_str(r#"[{"productId":"KCRwjF7lN97HnEaY","qty":3}]"#).unwrap();
        assert_eq!(records[0].product_id.as_str(), "KCRwjF7lN97HnEaY");
        assert_eq!(records[0].qty, 3);
    }

    #[test]
    fn test_record_rejects_zero_quantity() {
        assert_eq!(
            CartRecord::new("p1", 0),
            Err(CommerceError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_find_record() {
        let records = vec![
            CartRecord::new("p1", 1).unwrap(),
            CartRecord::new("p2", 4).unwrap(),
        ];
        assert_eq!(CartRecord::find(&records, &ProductId::new("p2")).map(|r| r.qty), Some(4));
        assert!(CartRecord::find(&records, &ProductId::new("p3")).is_none());
    }
}
