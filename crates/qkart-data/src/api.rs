//! The storefront operations used by the page controllers.

use crate::ApiError;
use async_trait::async_trait;
use qkart_commerce::prelude::*;
use serde::{Deserialize, Serialize};

/// Successful `POST /auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Wallet balance at login time.
    #[serde(with = "qkart_commerce::money::decimal")]
    pub balance: Money,
}

/// Remote storefront operations.
///
/// Every authenticated call takes the bearer token explicitly; the client
/// holds no session state.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /products`
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError>;

    /// `GET /products/search?value=<text>`. A 404 is an empty result.
    async fn search_products(&self, text: &str) -> Result<Vec<Product>, ApiError>;

    /// `GET /cart`
    async fn fetch_cart(&self, token: &str) -> Result<Vec<CartRecord>, ApiError>;

    /// `POST /cart`. A quantity of 0 removes the product.
    async fn upsert_cart_item(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartRecord>, ApiError>;

    /// `GET /user/addresses`
    async fn fetch_addresses(&self, token: &str) -> Result<Vec<Address>, ApiError>;

    /// `POST /user/addresses`
    async fn add_address(&self, token: &str, text: &AddressText)
        -> Result<Vec<Address>, ApiError>;

    /// `DELETE /user/addresses/{id}`
    async fn delete_address(&self, token: &str, id: &AddressId)
        -> Result<Vec<Address>, ApiError>;

    /// `POST /cart/checkout`
    async fn checkout(&self, token: &str, address_id: &AddressId) -> Result<(), ApiError>;

    /// `POST /auth/login`
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// `POST /auth/register`
    async fn register(&self, username: &str, password: &str) -> Result<(), ApiError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartUpsertBody<'a> {
    pub product_id: &'a ProductId,
    pub qty: u32,
}

#[derive(Serialize)]
pub(crate) struct AddressBody<'a> {
    pub address: &'a AddressText,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutBody<'a> {
    pub address_id: &'a AddressId,
}

#[derive(Serialize)]
pub(crate) struct CredentialsBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_decodes_decimal_balance() {
        let body = r#"{"success":true,"token":"eyJhbGci","username":"crio.do","balance":5000}"#;
        let login: LoginResponse = serde_json::from_str(body).unwrap();
        assert_eq!(login.username, "crio.do");
        assert_eq!(login.balance, Money::from_decimal(5000.0, Currency::USD));
    }

    #[test]
    fn test_wire_bodies() {
        let id = ProductId::new("BW0jAAeDJmlZCF8i");
        let body = serde_json::to_string(&CartUpsertBody {
            product_id: &id,
            qty: 0,
        })
        .unwrap();
        assert_eq!(body, r#"{"productId":"BW0jAAeDJmlZCF8i","qty":0}"#);

        let address_id = AddressId::new("a1");
        let body = serde_json::to_string(&CheckoutBody {
            address_id: &address_id,
        })
        .unwrap();
        assert_eq!(body, r#"{"addressId":"a1"}"#);

        let text = AddressText::parse("  12 Lake View Road, Chennai  ").unwrap();
        let body = serde_json::to_string(&AddressBody { address: &text }).unwrap();
        assert_eq!(body, r#"{"address":"12 Lake View Road, Chennai"}"#);
    }
}
