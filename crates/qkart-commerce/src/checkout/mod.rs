//! Checkout module.
//!
//! Contains saved addresses, the address text rules, and the checks that
//! gate order placement.

mod address;
mod validate;

pub use address::{Address, AddressBook, AddressText, AddressTextError, MAX_ADDRESS_LEN, MIN_ADDRESS_LEN};
pub use validate::{validate_checkout, CheckoutRejection};
