//! Product catalog module.
//!
//! Contains the product type served by `GET /products`.

mod product;

pub use product::{Product, Rating};
