//! Cart totals.

use crate::cart::CartLineItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sum of quantities across line items.
pub fn total_count(items: &[CartLineItem]) -> u64 {
    items.iter().map(|i| u64::from(i.qty)).sum()
}

/// Sum of unit cost times quantity across line items.
///
/// An empty list totals zero in the default currency.
pub fn total_value(items: &[CartLineItem]) -> Money {
    let currency = items
        .first()
        .map(|i| i.cost.currency)
        .unwrap_or_default();
    items
        .iter()
        .fold(Money::zero(currency), |acc, item| acc.saturating_add(&item.subtotal()))
}

/// Both totals for a snapshot of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Number of units.
    pub count: u64,
    /// Monetary total.
    pub value: Money,
}

impl CartTotals {
    /// Compute both folds.
    pub fn of(items: &[CartLineItem]) -> Self {
        Self {
            count: total_count(items),
            value: total_value(items),
        }
    }

    /// Totals of an empty cart.
    pub fn empty() -> Self {
        Self {
            count: 0,
            value: Money::zero(Currency::default()),
        }
    }
}
