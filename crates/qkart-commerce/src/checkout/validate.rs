//! Pre-order validation.

use crate::checkout::{Address, AddressBook};
use crate::money::Money;
use thiserror::Error;

/// The first precondition that failed before placing an order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRejection {
    /// A cart record has no product to price it against.
    #[error("Some items in your cart could not be loaded. Please refresh and try again.")]
    UnresolvedItems,

    #[error("You do not have enough balance in your wallet for this purchase")]
    InsufficientBalance { balance: Money, total: Money },

    #[error("Please add a new address before proceeding.")]
    NoAddressOnFile,

    #[error("Please select one shipping address to proceed.")]
    NoAddressSelected,
}

/// Check, in order: balance covers total, an address exists, one is selected.
///
/// Stops at the first failure. On success returns the selected address.
pub fn validate_checkout<'a>(
    balance: Money,
    total: Money,
    addresses: &'a AddressBook,
) -> Result<&'a Address, CheckoutRejection> {
    if !balance.covers(&total) {
        return Err(CheckoutRejection::InsufficientBalance { balance, total });
    }
    if addresses.is_empty() {
        return Err(CheckoutRejection::NoAddressOnFile);
    }
    addresses.selected().ok_or(CheckoutRejection::NoAddressSelected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::AddressId;
    use crate::money::Currency;

    fn usd(amount: i64) -> Money {
        Money::from_decimal(amount as f64, Currency::USD)
    }

    #[test]
    fn test_balance_checked_before_addresses() {
        let empty = AddressBook::default();
        assert!(matches!(
            validate_checkout(usd(50), usd(100), &empty),
            Err(CheckoutRejection::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_no_address_on_file() {
        let empty = AddressBook::default();
        assert_eq!(
            validate_checkout(usd(100), usd(50), &empty),
            Err(CheckoutRejection::NoAddressOnFile)
        );
    }

    #[test]
    fn test_address_present_but_unselected() {
        let book = AddressBook::new(vec![Address::new("a1", "12 Long Street, Springfield, 560001")]);
        assert_eq!(
            validate_checkout(usd(100), usd(50), &book),
            Err(CheckoutRejection::NoAddressSelected)
        );
    }

    #[test]
    fn test_exact_balance_passes() {
        let mut book = AddressBook::new(vec![Address::new("a1", "12 Long Street, Springfield, 560001")]);
        book.select(&AddressId::new("a1"));

        let selected = validate_checkout(usd(100), usd(100), &book).unwrap();
        assert_eq!(selected.id.as_str(), "a1");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            CheckoutRejection::NoAddressOnFile.to_string(),
            "Please add a new address before proceeding."
        );
        assert_eq!(
            CheckoutRejection::InsufficientBalance {
                balance: usd(1),
                total: usd(2)
            }
            .to_string(),
            "You do not have enough balance in your wallet for this purchase"
        );
    }
}
