//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// A cart record references a product missing from the catalog snapshot.
    #[error("Product not found in catalog: {0}")]
    ProductNotFound(String),

    /// Cart records carry strictly positive quantities.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Ratings run from 0 to 5 stars.
    #[error("Invalid rating: {0} (expected 0-5)")]
    InvalidRating(u8),
}
