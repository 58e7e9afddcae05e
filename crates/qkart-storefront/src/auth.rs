//! Login, registration and logout.

use crate::{Notice, Notifier};
use qkart_auth::{AuthError, KeyValueStore, LoginForm, RegistrationForm, Session};
use qkart_data::StorefrontApi;
use std::sync::Arc;

/// Handles the credential forms and owns the persisted session.
pub struct AuthPage {
    api: Arc<dyn StorefrontApi>,
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn KeyValueStore>,
}

impl AuthPage {
    pub fn new(
        api: Arc<dyn StorefrontApi>,
        notifier: Arc<dyn Notifier>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            api,
            notifier,
            store,
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// The persisted session, if any.
    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Session::load(self.store.as_ref())
    }

    /// Validate the form, log in and persist the session.
    pub async fn login(&self, form: &LoginForm) -> Option<Session> {
        if let Err(e) = form.validate() {
            self.notifier.notify(Notice::warning(e.to_string()));
            return None;
        }

        let response = match self.api.login(&form.username, &form.password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(username = %form.username, error = %e, "login failed");
                self.notifier
                    .notify(Notice::error(e.user_message("Login failed")));
                return None;
            }
        };

        let session = Session::new(response.token, response.username, response.balance);
        if let Err(e) = session.save(self.store.as_ref()) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        tracing::info!(username = %session.username(), "logged in");
        self.notifier.notify(Notice::success("Logged in successfully"));
        Some(session)
    }

    /// Validate the form and create the account. Does not log in.
    pub async fn register(&self, form: &RegistrationForm) -> bool {
        if let Err(e) = form.validate() {
            self.notifier.notify(Notice::warning(e.to_string()));
            return false;
        }

        match self.api.register(&form.username, &form.password).await {
            Ok(()) => {
                tracing::info!(username = %form.username, "registered");
                self.notifier.notify(Notice::success("Registered successfully"));
                true
            }
            Err(e) => {
                tracing::warn!(username = %form.username, error = %e, "registration failed");
                self.notifier
                    .notify(Notice::error(e.user_message("Registration failed")));
                false
            }
        }
    }

    /// Forget the session by clearing the whole store.
    pub fn logout(&self) -> Result<(), AuthError> {
        Session::clear(self.store.as_ref())?;
        tracing::info!("logged out");
        Ok(())
    }
}
