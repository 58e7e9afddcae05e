//! Money type for representing monetary values.
//!
//! Uses an integer minor-unit representation to avoid floating-point
//! precision issues. The storefront API speaks plain decimal numbers, so
//! [`decimal`] converts at the serde boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use qkart_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Whether this amount is at least `other`, i.e. can pay for it.
    pub fn covers(&self, other: &Money) -> bool {
        self.amount_cents >= other.amount_cents
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        self.display_in(self.currency)
    }

    /// Format with another currency's symbol. No conversion happens and
    /// the amount keeps its own decimal places.
    pub fn display_in(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.display_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Add, clamping at the numeric bounds. Keeps this value's currency.
    pub fn saturating_add(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_add(other.amount_cents),
            self.currency,
        )
    }

    /// Subtract, clamping at the numeric bounds. Keeps this value's currency.
    pub fn saturating_sub(&self, other: &Money) -> Money {
        Money::new(
            self.amount_cents.saturating_sub(other.amount_cents),
            self.currency,
        )
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_mul(&self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor), self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter for amounts the API sends as bare decimal numbers.
///
/// Use with `#[serde(with = "qkart_commerce::money::decimal")]`. Incoming
/// values are labelled with the default currency.
pub mod decimal {
    use super::{Currency, Money};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount, Currency::default()))
    }
}

/// Like [`decimal`], but rejects negative amounts. Used for prices.
pub mod non_negative {
    use super::Money;
    use serde::de::Error as _;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        super::decimal::serialize(money, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let money = super::decimal::deserialize(deserializer)?;
        if money.is_negative() {
            return Err(D::Error::custom(format!(
                "amount must not be negative: {}",
                money.display_amount()
            )));
        }
        Ok(money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_cents, 4999);

        let m = Money::from_decimal(100.0, Currency::JPY);
        assert_eq!(m.amount_cents, 100);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::new(5000, Currency::USD).display_amount(), "50.00");
    }

    #[test]
    fn test_display_in_keeps_minor_units() {
        let price = Money::new(15_050, Currency::USD);
        assert_eq!(price.display_in(Currency::JPY), "\u{00a5}150.50");
        assert_eq!(price.display_in(Currency::INR), "\u{20b9}150.50");
    }

    #[test]
    fn test_money_covers() {
        let balance = Money::new(5000, Currency::USD);
        assert!(balance.covers(&Money::new(5000, Currency::USD)));
        assert!(!balance.covers(&Money::new(5001, Currency::USD)));
    }

    #[test]
    fn test_money_try_add_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
        assert_eq!(usd.try_add(&usd).unwrap().amount_cents, 2000);
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::USD);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(m.saturating_mul(2).amount_cents, i64::MAX);
    }

    #[test]
    fn test_money_saturating_sub() {
        let balance = Money::new(5000, Currency::USD);
        let spent = Money::new(1250, Currency::USD);
        assert_eq!(balance.saturating_sub(&spent).amount_cents, 3750);
    }

    #[test]
    fn test_decimal_serde_adapter() {
        #[derive(Serialize, Deserialize)]
        struct Wallet {
            #[serde(with = "decimal")]
            balance: Money,
        }

        let wallet: Wallet = serde_json::from_str(r#"{"balance": 5000}"#).unwrap();
        assert_eq!(wallet.balance, Money::new(500_000, Currency::USD));

        let json = serde_json::to_string(&Wallet {
            balance: Money::new(1999, Currency::USD),
        })
        .unwrap();
        assert_eq!(json, r#"{"balance":19.99}"#);
    }

    #[test]
    fn test_non_negative_adapter_rejects_negative_amounts() {
        #[derive(Debug, Deserialize)]
        struct Price {
            #[serde(with = "non_negative")]
            cost: Money,
        }

        let price: Price = serde_json::from_str(r#"{"cost": 0}"#).unwrap();
        assert!(price.cost.is_zero());
        let err = serde_json::from_str::<Price>(r#"{"cost": -1.5}"#).unwrap_err();
        assert!(err.to_string().contains("must not be negative"));
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("inr"), Some(Currency::INR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
