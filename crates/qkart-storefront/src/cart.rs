//! The cart sidebar.

use crate::{Notice, Notifier};
use qkart_auth::Session;
use qkart_commerce::prelude::*;
use qkart_data::{ApiError, StorefrontApi};
use std::sync::Arc;

/// Result of adding a product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// No session; nothing was sent.
    LoginRequired,
    /// The product already has a cart line; nothing was sent.
    AlreadyInCart,
    Failed(ApiError),
}

/// Holds the server's cart records and applies cart mutations.
///
/// Records are stored as received. Line items and totals are derived on
/// demand against whatever product list the page currently has.
pub struct CartPanel {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    records: Vec<CartRecord>,
}

impl CartPanel {
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[CartRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        CartRecord::find(&self.records, product_id).is_some()
    }

    /// Reload the records from the server. The caller picks the failure notice.
    pub async fn refresh(&mut self, session: &Session) -> Result<(), ApiError> {
        self.records = self.api.fetch_cart(session.token()).await?;
        tracing::debug!(lines = self.records.len(), "cart loaded");
        Ok(())
    }

    /// The product card's "add to cart": quantity 1, refused for duplicates.
    pub async fn add_from_catalog(
        &mut self,
        session: Option<&Session>,
        product_id: &ProductId,
    ) -> AddOutcome {
        let Some(session) = session else {
            self.notifier
                .notify(Notice::warning("Please login to add items to cart"));
            return AddOutcome::LoginRequired;
        };
        if self.contains(product_id) {
            self.notifier.notify(Notice::warning("Item already in cart"));
            return AddOutcome::AlreadyInCart;
        }
        match self.upsert(session, product_id, 1).await {
            Ok(()) => AddOutcome::Added,
            Err(e) => AddOutcome::Failed(e),
        }
    }

    /// The sidebar's quantity buttons. Always sent; 0 removes the line.
    pub async fn set_quantity(
        &mut self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<(), ApiError> {
        self.upsert(session, product_id, qty).await
    }

    async fn upsert(
        &mut self,
        session: &Session,
        product_id: &ProductId,
        qty: u32,
    ) -> Result<(), ApiError> {
        match self
            .api
            .upsert_cart_item(session.token(), product_id, qty)
            .await
        {
            Ok(records) => {
                self.records = records;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%product_id, qty, error = %e, "cart update failed");
                self.notifier.notify(Notice::error("Failed to update cart"));
                Err(e)
            }
        }
    }

    /// Line items against `catalog`, in cart order.
    pub fn items(&self, catalog: &[Product]) -> Vec<CartLineItem> {
        reconcile(&self.records, catalog)
    }

    pub fn totals(&self, catalog: &[Product]) -> CartTotals {
        CartTotals::of(&self.items(catalog))
    }
}
