//! Storefront domain types and logic for QKart.
//!
//! This crate holds everything the storefront computes locally, with no I/O:
//!
//! - **Catalog**: Products as served by the remote API
//! - **Cart**: Minimal cart records, reconciliation into line items, totals
//! - **Checkout**: Addresses, address text rules, pre-order validation
//!
//! # Example
//!
//! ```rust
//! use qkart_commerce::prelude::*;
//!
//! let catalog = vec![Product::new(
//!     "p1",
//!     "Tan Leatherette Weekender Duffle",
//!     "Fashion",
//!     Money::from_decimal(150.0, Currency::USD),
//!     4,
//! )];
//! let cart = vec![CartRecord::new("p1", 2).unwrap()];
//!
//! let items = reconcile(&cart, &catalog);
//! assert_eq!(total_count(&items), 2);
//! assert_eq!(total_value(&items).display(), "$300.00");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, Rating};

    // Cart
    pub use crate::cart::{
        reconcile, reconcile_strict, total_count, total_value, CartLineItem, CartRecord,
        CartTotals,
    };

    // Checkout
    pub use crate::checkout::{
        validate_checkout, Address, AddressBook, AddressText, AddressTextError,
        CheckoutRejection,
    };
}
