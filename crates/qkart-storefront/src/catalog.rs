//! Product listing and search.

use crate::{AddOutcome, CartPanel, Debouncer, Notice, Notifier};
use qkart_auth::Session;
use qkart_commerce::prelude::*;
use qkart_data::StorefrontApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Quiet period before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// The product list currently shown, shared between the page and its
/// search box.
#[derive(Clone)]
pub struct ProductFeed {
    tx: Arc<watch::Sender<Vec<Product>>>,
}

impl Default for ProductFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFeed {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { tx: Arc::new(tx) }
    }

    /// A copy of the current list.
    pub fn snapshot(&self) -> Vec<Product> {
        self.tx.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receive every later replacement of the list.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.tx.subscribe()
    }

    fn replace(&self, products: Vec<Product>) {
        self.tx.send_replace(products);
    }
}

#[derive(Clone)]
struct Catalog {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    feed: ProductFeed,
}

impl Catalog {
    async fn load_all(&self) -> bool {
        match self.api.fetch_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products loaded");
                self.feed.replace(products);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                let message = if e.is_network() {
                    "Network error. Please check your connection."
                } else {
                    "Could not fetch products. Please try again."
                };
                self.notifier.notify(Notice::error(message));
                false
            }
        }
    }

    async fn search(&self, text: &str) {
        if text.is_empty() {
            self.load_all().await;
            return;
        }
        match self.api.search_products(text).await {
            Ok(products) => {
                tracing::debug!(text, count = products.len(), "search finished");
                self.feed.replace(products);
            }
            Err(e) if e.is_not_found() => self.feed.replace(Vec::new()),
            Err(e) => {
                tracing::warn!(text, error = %e, "search failed");
                self.notifier.notify(Notice::error("Could not fetch products"));
            }
        }
    }
}

/// The product listing page with its cart sidebar.
pub struct CatalogPage {
    catalog: Catalog,
    cart: CartPanel,
}

impl CatalogPage {
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn Notifier>) -> Self {
        let cart = CartPanel::new(api.clone(), notifier.clone());
        Self {
            catalog: Catalog {
                api,
                notifier,
                feed: ProductFeed::new(),
            },
            cart,
        }
    }

    /// Load the products, and the cart when logged in.
    pub async fn open(&mut self, session: Option<&Session>) {
        self.catalog.load_all().await;
        if let Some(session) = session {
            if let Err(e) = self.cart.refresh(session).await {
                tracing::warn!(error = %e, "failed to load cart");
                self.catalog
                    .notifier
                    .notify(Notice::error("Could not fetch cart items"));
            }
        }
    }

    pub fn products(&self) -> Vec<Product> {
        self.catalog.feed.snapshot()
    }

    pub fn feed(&self) -> &ProductFeed {
        &self.catalog.feed
    }

    /// Search immediately, bypassing the debounce.
    pub async fn search(&self, text: &str) {
        self.catalog.search(text).await;
    }

    /// A debounced search box writing into this page's product list.
    pub fn search_box(&self) -> SearchBox {
        SearchBox {
            catalog: self.catalog.clone(),
            debouncer: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn cart(&self) -> &CartPanel {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartPanel {
        &mut self.cart
    }

    /// The product card's add button.
    pub async fn add_to_cart(
        &mut self,
        session: Option<&Session>,
        product_id: &ProductId,
    ) -> AddOutcome {
        self.cart.add_from_catalog(session, product_id).await
    }

    /// Cart lines resolved against the products currently listed.
    pub fn cart_items(&self) -> Vec<CartLineItem> {
        self.cart.items(&self.products())
    }
}

/// Search input that fires only after typing pauses for [`SEARCH_DEBOUNCE`].
pub struct SearchBox {
    catalog: Catalog,
    debouncer: Debouncer,
}

impl SearchBox {
    /// Feed one input event. Replaces any search not yet finished.
    pub fn input(&mut self, text: impl Into<String>) {
        let text = text.into();
        let catalog = self.catalog.clone();
        self.debouncer.call(async move {
            catalog.search(&text).await;
        });
    }

    /// Whether a search is scheduled or running.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn feed(&self) -> &ProductFeed {
        &self.catalog.feed
    }
}
