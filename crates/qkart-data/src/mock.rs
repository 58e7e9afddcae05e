//! In-memory [`StorefrontApi`] for tests.
//!
//! Mirrors the backend's observable behavior closely enough for controller
//! tests: cart upserts return the whole cart, a zero quantity removes the
//! line, checkout empties the cart and debits the wallet. Every call is
//! recorded with the (tokio) instant it arrived, so paused-clock tests can
//! assert on timing.

use crate::{ApiError, LoginResponse, StorefrontApi};
use async_trait::async_trait;
use qkart_commerce::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;
use tokio::time::Instant;

/// Which operation a call or injected failure targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Products,
    Search,
    Cart,
    CartUpsert,
    Addresses,
    AddAddress,
    DeleteAddress,
    Checkout,
    Login,
    Register,
}

/// A recorded call, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    FetchProducts,
    SearchProducts(String),
    FetchCart,
    UpsertCartItem { product_id: ProductId, qty: u32 },
    FetchAddresses,
    AddAddress(String),
    DeleteAddress(AddressId),
    Checkout(AddressId),
    Login(String),
    Register(String),
}

impl ApiCall {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            ApiCall::FetchProducts => Endpoint::Products,
            ApiCall::SearchProducts(_) => Endpoint::Search,
            ApiCall::FetchCart => Endpoint::Cart,
            ApiCall::UpsertCartItem { .. } => Endpoint::CartUpsert,
            ApiCall::FetchAddresses => Endpoint::Addresses,
            ApiCall::AddAddress(_) => Endpoint::AddAddress,
            ApiCall::DeleteAddress(_) => Endpoint::DeleteAddress,
            ApiCall::Checkout(_) => Endpoint::Checkout,
            ApiCall::Login(_) => Endpoint::Login,
            ApiCall::Register(_) => Endpoint::Register,
        }
    }
}

struct User {
    password: String,
    balance: Money,
}

#[derive(Default)]
struct State {
    products: Vec<Product>,
    cart: Vec<CartRecord>,
    addresses: Vec<Address>,
    users: HashMap<String, User>,
    calls: Vec<(ApiCall, Instant)>,
    failures: HashMap<Endpoint, ApiError>,
    next_address: u64,
    checkout_gate: Option<Arc<Notify>>,
}

/// In-memory storefront backend.
#[derive(Default)]
pub struct MockStorefront {
    state: Mutex<State>,
}

fn bad_request(message: &str) -> ApiError {
    ApiError::Http {
        status: 400,
        message: Some(message.to_string()),
    }
}

fn token_for(username: &str) -> String {
    format!("token-{username}")
}

impl MockStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state().products = products;
        self
    }

    pub fn with_cart(self, cart: Vec<CartRecord>) -> Self {
        self.state().cart = cart;
        self
    }

    pub fn with_addresses(self, addresses: Vec<Address>) -> Self {
        self.state().addresses = addresses;
        self
    }

    /// Register an account that can log in.
    pub fn with_user(self, username: &str, password: &str, balance: Money) -> Self {
        self.state().users.insert(
            username.to_string(),
            User {
                password: password.to_string(),
                balance,
            },
        );
        self
    }

    /// Make every later call to `endpoint` fail with `error`.
    pub fn fail(&self, endpoint: Endpoint, error: ApiError) {
        self.state().failures.insert(endpoint, error);
    }

    pub fn clear_failure(&self, endpoint: Endpoint) {
        self.state().failures.remove(&endpoint);
    }

    /// Hold checkout calls until the returned handle is notified.
    pub fn gate_checkout(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state().checkout_gate = Some(gate.clone());
        gate
    }

    /// The token `login` issues for `username`.
    pub fn token_for(username: &str) -> String {
        token_for(username)
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state().calls.iter().map(|(c, _)| c.clone()).collect()
    }

    /// Calls with the instant each one arrived.
    pub fn timed_calls(&self) -> Vec<(ApiCall, Instant)> {
        self.state().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|(c, _)| c.endpoint() == endpoint)
            .count()
    }

    pub fn cart(&self) -> Vec<CartRecord> {
        self.state().cart.clone()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.state().addresses.clone()
    }

    pub fn balance_of(&self, username: &str) -> Option<Money> {
        self.state().users.get(username).map(|u| u.balance)
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: ApiCall) -> Result<MutexGuard<'_, State>, ApiError> {
        let mut state = self.state();
        let endpoint = call.endpoint();
        state.calls.push((call, Instant::now()));
        if let Some(error) = state.failures.get(&endpoint) {
            return Err(error.clone());
        }
        Ok(state)
    }

    fn authorize(token: &str) -> Result<(), ApiError> {
        if token.is_empty() {
            return Err(ApiError::Http {
                status: 401,
                message: Some("Protected route, Oauth2 Bearer token not found".to_string()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl StorefrontApi for MockStorefront {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let state = self.record(ApiCall::FetchProducts)?;
        Ok(state.products.clone())
    }

    async fn search_products(&self, text: &str) -> Result<Vec<Product>, ApiError> {
        let state = self.record(ApiCall::SearchProducts(text.to_string()))?;
        let needle = text.to_lowercase();
        Ok(state
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn fetch_cart(&self, token: &str) -> Result<Vec<CartRecord>, ApiError> {
        let state = self.record(ApiCall::FetchCart)?;
        Self::authorize(token)?;
        Ok(state.cart.clone())
    }

    async fn upsert_cart_item(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartRecord>, ApiError> {
        let mut state = self.record(ApiCall::UpsertCartItem {
            product_id: product_id.clone(),
            qty,
        })?;
        Self::authorize(token)?;
        if !state.products.iter().any(|p| &p.id == product_id) {
            return Err(bad_request("Product doesn't exist"));
        }

        let existing = state.cart.iter().position(|r| &r.product_id == product_id);
        match (existing, qty) {
            (Some(index), 0) => {
                state.cart.remove(index);
            }
            (Some(index), qty) => state.cart[index].qty = qty,
            (None, 0) => return Err(bad_request("Product not in cart")),
            (None, qty) => state.cart.push(CartRecord {
                product_id: product_id.clone(),
                qty,
            }),
        }
        Ok(state.cart.clone())
    }

    async fn fetch_addresses(&self, token: &str) -> Result<Vec<Address>, ApiError> {
        let state = self.record(ApiCall::FetchAddresses)?;
        Self::authorize(token)?;
        Ok(state.addresses.clone())
    }

    async fn add_address(
        &self,
        token: &str,
        text: &AddressText,
    ) -> Result<Vec<Address>, ApiError> {
        let mut state = self.record(ApiCall::AddAddress(text.as_str().to_string()))?;
        Self::authorize(token)?;
        state.next_address += 1;
        let id = format!("addr-{}", state.next_address);
        state.addresses.push(Address::new(id, text.as_str()));
        Ok(state.addresses.clone())
    }

    async fn delete_address(
        &self,
        token: &str,
        id: &AddressId,
    ) -> Result<Vec<Address>, ApiError> {
        let mut state = self.record(ApiCall::DeleteAddress(id.clone()))?;
        Self::authorize(token)?;
        let before = state.addresses.len();
        state.addresses.retain(|a| &a.id != id);
        if state.addresses.len() == before {
            return Err(bad_request("Address to delete was not found"));
        }
        Ok(state.addresses.clone())
    }

    async fn checkout(&self, token: &str, address_id: &AddressId) -> Result<(), ApiError> {
        let gate = {
            let state = self.record(ApiCall::Checkout(address_id.clone()))?;
            Self::authorize(token)?;
            state.checkout_gate.clone()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut state = self.state();
        if !state.addresses.iter().any(|a| &a.id == address_id) {
            return Err(bad_request("Address not set"));
        }
        if state.cart.is_empty() {
            return Err(bad_request("Cart is empty"));
        }
        let items = reconcile(&state.cart, &state.products);
        let total = total_value(&items);

        let username = state
            .users
            .keys()
            .find(|name| token_for(name) == token)
            .cloned();
        if let Some(username) = username {
            if let Some(user) = state.users.get_mut(&username) {
                if !user.balance.covers(&total) {
                    return Err(bad_request("Wallet balance not sufficient to place order"));
                }
                user.balance = user.balance.saturating_sub(&total);
            }
        }
        state.cart.clear();
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let state = self.record(ApiCall::Login(username.to_string()))?;
        match state.users.get(username) {
            None => Err(bad_request("Username does not exist")),
            Some(user) if user.password != password => Err(bad_request("Password is incorrect")),
            Some(user) => Ok(LoginResponse {
                token: token_for(username),
                username: username.to_string(),
                balance: user.balance,
            }),
        }
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let mut state = self.record(ApiCall::Register(username.to_string()))?;
        if state.users.contains_key(username) {
            return Err(bad_request("Username is already in use"));
        }
        state.users.insert(
            username.to_string(),
            User {
                password: password.to_string(),
                balance: Money::from_decimal(5000.0, Currency::default()),
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(amount: f64) -> Money {
        Money::from_decimal(amount, Currency::USD)
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Tan Leatherette Weekender Duffle", "Fashion", usd(150.0), 4),
            Product::new("p2", "The Minimalist Slim Leather Watch", "Electronics", usd(60.0), 5),
        ]
    }

    #[tokio::test]
    async fn test_upsert_adds_updates_and_removes() {
        let api = MockStorefront::new().with_products(catalog());
        let p1 = ProductId::new("p1");

        let cart = api.upsert_cart_item("t", &p1, 1).await.unwrap();
        assert_eq!(cart, vec![CartRecord::new("p1", 1).unwrap()]);

        let cart = api.upsert_cart_item("t", &p1, 3).await.unwrap();
        assert_eq!(cart[0].qty, 3);

        let cart = api.upsert_cart_item("t", &p1, 0).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(api.call_count(Endpoint::CartUpsert), 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_on_name_and_category() {
        let api = MockStorefront::new().with_products(catalog());
        assert_eq!(api.search_products("duffle").await.unwrap().len(), 1);
        assert_eq!(api.search_products("ELECTRONICS").await.unwrap().len(), 1);
        assert!(api.search_products("kettle").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure_is_returned_and_call_recorded() {
        let api = MockStorefront::new();
        api.fail(Endpoint::Products, ApiError::Network("offline".into()));
        assert!(api.fetch_products().await.unwrap_err().is_network());
        assert_eq!(api.calls(), vec![ApiCall::FetchProducts]);

        api.clear_failure(Endpoint::Products);
        assert!(api.fetch_products().await.is_ok());
    }

    #[tokio::test]
    async fn test_checkout_debits_and_clears_cart() {
        let api = MockStorefront::new()
            .with_products(catalog())
            .with_cart(vec![CartRecord::new("p2", 2).unwrap()])
            .with_addresses(vec![Address::new("a1", "12 Lake View Road, Chennai")])
            .with_user("crio.do", "learnbydoing", usd(500.0));
        let token = MockStorefront::token_for("crio.do");

        api.checkout(&token, &AddressId::new("a1")).await.unwrap();
        assert!(api.cart().is_empty());
        assert_eq!(api.balance_of("crio.do"), Some(usd(380.0)));
    }

    #[tokio::test]
    async fn test_login_and_register_errors() {
        let api = MockStorefront::new().with_user("crio.do", "learnbydoing", usd(5000.0));

        let err = api.login("crio.do", "wrong").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Password is incorrect"));

        let err = api.register("crio.do", "another").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Username is already in use"));

        let login = api.login("crio.do", "learnbydoing").await.unwrap();
        assert_eq!(login.token, "token-crio.do");
        assert_eq!(login.balance, usd(5000.0));
    }

    #[tokio::test]
    async fn test_empty_token_is_unauthorized() {
        let api = MockStorefront::new();
        let err = api.fetch_cart("").await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
}
