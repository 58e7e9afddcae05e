#![allow(dead_code)]

use qkart_auth::Session;
use qkart_commerce::prelude::*;
use qkart_data::mock::MockStorefront;
use qkart_data::StorefrontApi;
use qkart_storefront::{NoticeLog, Notifier};
use std::sync::Arc;

pub const USERNAME: &str = "crio.do";
pub const PASSWORD: &str = "learnbydoing";

pub fn usd(amount: f64) -> Money {
    Money::from_decimal(amount, Currency::USD)
}

pub fn catalog() -> Vec<Product> {
    vec![
        Product::new("p1", "Tan Leatherette Weekender Duffle", "Fashion", usd(150.0), 4),
        Product::new("p2", "The Minimalist Slim Leather Watch", "Electronics", usd(60.0), 5),
        Product::new("p3", "YONEX Smash Badminton Racquet", "Sports", usd(100.0), 5),
    ]
}

pub fn session(balance: f64) -> Session {
    Session::new(MockStorefront::token_for(USERNAME), USERNAME, usd(balance))
}

/// A mock backend plus a notice log.
pub struct Harness {
    pub api: Arc<MockStorefront>,
    pub notices: Arc<NoticeLog>,
}

impl Harness {
    pub fn new(api: MockStorefront) -> Self {
        Self {
            api: Arc::new(api),
            notices: Arc::new(NoticeLog::new()),
        }
    }

    pub fn with_catalog() -> Self {
        Self::new(
            MockStorefront::new()
                .with_products(catalog())
                .with_user(USERNAME, PASSWORD, usd(5000.0)),
        )
    }

    pub fn api(&self) -> Arc<dyn StorefrontApi> {
        self.api.clone()
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        self.notices.clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notices.messages()
    }
}
