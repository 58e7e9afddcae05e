//! The checkout page.

use crate::{Notice, Notifier};
use qkart_auth::{KeyValueStore, Session};
use qkart_commerce::prelude::*;
use qkart_data::{ApiError, StorefrontApi};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of an order placement attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderOutcome {
    /// The server accepted the order for `charged`.
    Placed { charged: Money },
    /// Local validation failed; nothing was sent.
    Rejected(CheckoutRejection),
    /// Another placement from this page has not finished; nothing was sent.
    AlreadyPlacing,
    Failed(ApiError),
}

impl OrderOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, OrderOutcome::Placed { .. })
    }
}

/// Clears the in-flight flag when the placement ends, however it ends.
struct PlacingGuard<'a>(&'a AtomicBool);

impl Drop for PlacingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Products, cart and addresses for one checkout, plus order placement.
pub struct CheckoutPage {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    products: Vec<Product>,
    cart: Vec<CartRecord>,
    addresses: AddressBook,
    placing: AtomicBool,
}

impl CheckoutPage {
    pub fn new(api: Arc<dyn StorefrontApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            products: Vec::new(),
            cart: Vec::new(),
            addresses: AddressBook::default(),
            placing: AtomicBool::new(false),
        }
    }

    /// Load everything the page shows. Returns false without a session.
    ///
    /// Each load fails independently; a failed one leaves its list empty.
    pub async fn open(&mut self, session: Option<&Session>) -> bool {
        let Some(session) = session else {
            self.notifier
                .notify(Notice::error("You must be logged in to access checkout"));
            return false;
        };
        let token = session.token();

        match self.api.fetch_products().await {
            Ok(products) => self.products = products,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load products");
                self.notifier.notify(Notice::error("Could not fetch products"));
            }
        }
        match self.api.fetch_cart(token).await {
            Ok(cart) => self.cart = cart,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load cart");
                self.notifier
                    .notify(Notice::error("Could not fetch cart details"));
            }
        }
        match self.api.fetch_addresses(token).await {
            Ok(addresses) => self.addresses.replace(addresses),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load addresses");
                self.notifier.notify(Notice::error("Could not fetch addresses"));
            }
        }
        true
    }

    pub fn items(&self) -> Vec<CartLineItem> {
        reconcile(&self.cart, &self.products)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.items())
    }

    pub fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    /// Select a listed address. Returns false for an unknown id.
    pub fn select_address(&mut self, id: &AddressId) -> bool {
        self.addresses.select(id)
    }

    /// Validate `raw` and save it. Returns true when the server accepted it.
    pub async fn add_address(&mut self, session: &Session, raw: &str) -> bool {
        let text = match AddressText::parse(raw) {
            Ok(text) => text,
            Err(e) => {
                self.notifier.notify(Notice::warning(e.to_string()));
                return false;
            }
        };
        match self.api.add_address(session.token(), &text).await {
            Ok(addresses) => {
                self.addresses.replace(addresses);
                self.notifier
                    .notify(Notice::success("Address added successfully"));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to add address");
                self.notifier
                    .notify(Notice::error(e.user_message("Could not add address")));
                false
            }
        }
    }

    /// Delete a saved address, dropping the selection if it pointed there.
    pub async fn delete_address(&mut self, session: &Session, id: &AddressId) -> bool {
        match self.api.delete_address(session.token(), id).await {
            Ok(addresses) => {
                if self.addresses.is_selected(id) {
                    self.addresses.deselect();
                }
                self.addresses.replace(addresses);
                true
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "failed to delete address");
                self.notifier
                    .notify(Notice::error(e.user_message("Could not delete address")));
                false
            }
        }
    }

    /// Validate and submit the order.
    ///
    /// Refuses while another placement from this page is in flight. Does
    /// not touch the session; see [`checkout`](CheckoutPage::checkout).
    pub async fn place_order(&self, session: &Session) -> OrderOutcome {
        if self
            .placing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("order placement already in flight");
            return OrderOutcome::AlreadyPlacing;
        }
        let _guard = PlacingGuard(&self.placing);

        let items = match reconcile_strict(&self.cart, &self.products) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(error = %e, "cart does not resolve against products");
                let rejection = CheckoutRejection::UnresolvedItems;
                self.notifier.notify(Notice::warning(rejection.to_string()));
                return OrderOutcome::Rejected(rejection);
            }
        };
        let total = total_value(&items);
        let address = match validate_checkout(session.balance(), total, &self.addresses) {
            Ok(address) => address,
            Err(rejection) => {
                self.notifier.notify(Notice::warning(rejection.to_string()));
                return OrderOutcome::Rejected(rejection);
            }
        };

        tracing::info!(address = %address.id, total = %total, "placing order");
        match self.api.checkout(session.token(), &address.id).await {
            Ok(()) => {
                self.notifier
                    .notify(Notice::success("Order placed successfully"));
                OrderOutcome::Placed { charged: total }
            }
            Err(e) => {
                tracing::warn!(error = %e, "checkout failed");
                self.notifier
                    .notify(Notice::error(e.user_message("Could not place order")));
                OrderOutcome::Failed(e)
            }
        }
    }

    /// Place the order, then debit and persist the session on success.
    ///
    /// The local cart is emptied to match the server.
    pub async fn checkout(
        &mut self,
        session: &mut Session,
        store: &dyn KeyValueStore,
    ) -> OrderOutcome {
        let outcome = self.place_order(session).await;
        if let OrderOutcome::Placed { charged } = &outcome {
            let balance = session.debit(charged);
            tracing::debug!(balance = %balance, "wallet debited");
            if let Err(e) = session.save(store) {
                tracing::warn!(error = %e, "failed to persist balance");
            }
            self.cart.clear();
        }
        outcome
    }
}
