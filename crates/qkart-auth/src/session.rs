//! The logged-in session.

use crate::{AuthError, KeyValueStore, StoreError};
use qkart_commerce::{Currency, Money};
use serde_json::Value;

const TOKEN_KEY: &str = "token";
const USERNAME_KEY: &str = "username";
const BALANCE_KEY: &str = "balance";

/// Credentials and wallet balance from a successful login.
///
/// The balance is the server's figure at login time, reduced locally after
/// each placed order. Nothing refreshes it from the server, so it goes
/// stale if the wallet changes elsewhere; the server remains authoritative
/// at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    username: String,
    balance: Money,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>, balance: Money) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            balance,
        }
    }

    /// Bearer token for authenticated calls.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Subtract `amount` from the wallet, clamping at zero. Returns the new balance.
    pub fn debit(&mut self, amount: &Money) -> Money {
        let remaining = self.balance.saturating_sub(amount);
        self.balance = if remaining.is_negative() {
            Money::zero(self.balance.currency)
        } else {
            remaining
        };
        self.balance
    }

    /// Rebuild the session from `store`. `None` when no token is stored.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>, AuthError> {
        let token = match store.get(TOKEN_KEY)? {
            Some(Value::String(token)) if !token.is_empty() => token,
            Some(Value::String(_)) | None => return Ok(None),
            Some(other) => return Err(invalid(TOKEN_KEY, &other)),
        };
        let username = match store.get(USERNAME_KEY)? {
            Some(Value::String(username)) => username,
            None => String::new(),
            Some(other) => return Err(invalid(USERNAME_KEY, &other)),
        };
        let balance = match store.get(BALANCE_KEY)? {
            Some(value) => parse_balance(&value).ok_or_else(|| invalid(BALANCE_KEY, &value))?,
            None => Money::zero(Currency::default()),
        };
        Ok(Some(Self {
            token,
            username,
            balance,
        }))
    }

    /// Persist all three keys.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.set(TOKEN_KEY, Value::from(self.token.as_str()))?;
        store.set(USERNAME_KEY, Value::from(self.username.as_str()))?;
        store.set(BALANCE_KEY, Value::from(self.balance.to_decimal()))?;
        tracing::debug!(username = %self.username, "session saved");
        Ok(())
    }

    /// Log out: remove every key from `store`.
    pub fn clear(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.clear()?;
        tracing::debug!("session cleared");
        Ok(())
    }
}

fn invalid(key: &str, value: &Value) -> AuthError {
    AuthError::InvalidSession(format!("unexpected value for {key}: {value}"))
}

/// Balances may be stored as numbers or as numeric strings.
fn parse_balance(value: &Value) -> Option<Money> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(Money::from_decimal(amount, Currency::default()))
}
