//! Shopping cart module.
//!
//! The server keeps only `{productId, qty}` pairs. This module joins those
//! against a catalog snapshot and folds the result into totals.

mod record;
mod reconcile;
mod totals;

pub use record::CartRecord;
pub use reconcile::{reconcile, reconcile_strict, CartLineItem};
pub use totals::{total_count, total_value, CartTotals};
