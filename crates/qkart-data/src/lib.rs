//! HTTP client for the QKart storefront API.
//!
//! Two layers:
//!
//! - [`FetchClient`]: a small builder over `reqwest` with a base URL, default
//!   headers, bearer auth and JSON bodies.
//! - [`StorefrontApi`]: the typed operations the storefront needs, with
//!   [`HttpStorefront`] as the network implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use qkart_data::{HttpStorefront, StorefrontApi};
//!
//! let api = HttpStorefront::new("https://ecommerce-app-crio-1.onrender.com/api/v1")?;
//! let products = api.fetch_products().await?;
//! let cart = api.upsert_cart_item(&token, &products[0].id, 1).await?;
//! ```

mod api;
mod error;
mod http;
mod request;
mod response;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use api::{LoginResponse, StorefrontApi};
pub use error::ApiError;
pub use http::{HttpStorefront, DEFAULT_ENDPOINT};
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;

/// HTTP client for making outbound requests.
#[derive(Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl FetchClient {
    /// Create a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying client fails to build (TLS backend).
    pub fn new() -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("qkart/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a DELETE request.
    pub fn delete(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Delete, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(method, full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, ApiError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// The resolved request URL, without query parameters.
    pub fn url(&self) -> &str {
        self.builder.url()
    }

    /// Send the request and read the whole response.
    ///
    /// Any status is returned as `Ok`; use [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, ApiError> {
        let RequestBuilder {
            method,
            url,
            headers,
            query,
            body,
        } = self.builder;

        let mut request = self.http.request(method.into(), &url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(%method, %url, "sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "request failed");
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(%method, %url, status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, FetchClient, HttpStorefront, LoginResponse, Response, StorefrontApi};
}
