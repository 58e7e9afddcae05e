//! Network implementation of [`StorefrontApi`].

use crate::api::{AddressBody, CartUpsertBody, CheckoutBody, CredentialsBody};
use crate::{ApiError, ClientRequestBuilder, FetchClient, LoginResponse, StorefrontApi};
use async_trait::async_trait;
use qkart_commerce::prelude::*;
use serde::de::DeserializeOwned;

/// Public QKart backend.
pub const DEFAULT_ENDPOINT: &str = "https://ecommerce-app-crio-1.onrender.com/api/v1";

/// Storefront API over HTTP.
#[derive(Clone)]
pub struct HttpStorefront {
    client: FetchClient,
}

impl HttpStorefront {
    /// Create a client for the given API root, e.g. `https://host/api/v1`.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApiError> {
        let client = FetchClient::new()?
            .with_base_url(endpoint)
            .with_default_header("Accept", "application/json");
        Ok(Self { client })
    }

    /// Create a client for [`DEFAULT_ENDPOINT`].
    pub fn with_default_endpoint() -> Result<Self, ApiError> {
        Self::new(DEFAULT_ENDPOINT)
    }
}

async fn fetch_json<T: DeserializeOwned>(request: ClientRequestBuilder) -> Result<T, ApiError> {
    request.send().await?.error_for_status()?.json()
}

#[async_trait]
impl StorefrontApi for HttpStorefront {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        fetch_json(self.client.get("/products")).await
    }

    async fn search_products(&self, text: &str) -> Result<Vec<Product>, ApiError> {
        let request = self.client.get("/products/search").query("value", text);
        match fetch_json(request).await {
            Err(e) if e.is_not_found() => {
                tracing::debug!(text, "search matched nothing");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    async fn fetch_cart(&self, token: &str) -> Result<Vec<CartRecord>, ApiError> {
        fetch_json(self.client.get("/cart").bearer_auth(token)).await
    }

    async fn upsert_cart_item(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartRecord>, ApiError> {
        let request = self
            .client
            .post("/cart")
            .bearer_auth(token)
            .json(&CartUpsertBody { product_id, qty })?;
        fetch_json(request).await
    }

    async fn fetch_addresses(&self, token: &str) -> Result<Vec<Address>, ApiError> {
        fetch_json(self.client.get("/user/addresses").bearer_auth(token)).await
    }

    async fn add_address(
        &self,
        token: &str,
        text: &AddressText,
    ) -> Result<Vec<Address>, ApiError> {
        let request = self
            .client
            .post("/user/addresses")
            .bearer_auth(token)
            .json(&AddressBody { address: text })?;
        fetch_json(request).await
    }

    async fn delete_address(
        &self,
        token: &str,
        id: &AddressId,
    ) -> Result<Vec<Address>, ApiError> {
        let request = self
            .client
            .delete(format!("/user/addresses/{id}"))
            .bearer_auth(token);
        fetch_json(request).await
    }

    async fn checkout(&self, token: &str, address_id: &AddressId) -> Result<(), ApiError> {
        let request = self
            .client
            .post("/cart/checkout")
            .bearer_auth(token)
            .json(&CheckoutBody { address_id })?;
        request.send().await?.error_for_status()?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .client
            .post("/auth/login")
            .json(&CredentialsBody { username, password })?;
        fetch_json(request).await
    }

    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post("/auth/register")
            .json(&CredentialsBody { username, password })?;
        request.send().await?.error_for_status()?;
        Ok(())
    }
}
