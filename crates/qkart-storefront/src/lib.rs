//! Page controllers for the QKart storefront.
//!
//! Each controller owns the state one page shows and talks to the backend
//! through [`StorefrontApi`](qkart_data::StorefrontApi). Failures never
//! propagate as errors: they are reported through a [`Notifier`] and the
//! affected collection is left as it was.
//!
//! - [`CatalogPage`] / [`SearchBox`]: product listing and debounced search
//! - [`CartPanel`]: the cart sidebar
//! - [`CheckoutPage`]: addresses, validation, order placement
//! - [`AuthPage`]: login, registration, logout

mod auth;
mod cart;
mod catalog;
mod checkout;
mod debounce;
mod notice;

pub use auth::AuthPage;
pub use cart::{AddOutcome, CartPanel};
pub use catalog::{CatalogPage, ProductFeed, SearchBox, SEARCH_DEBOUNCE};
pub use checkout::{CheckoutPage, OrderOutcome};
pub use debounce::Debouncer;
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier, TracingNotifier};
