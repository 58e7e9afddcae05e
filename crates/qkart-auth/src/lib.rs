//! Authentication state for the QKart storefront client.
//!
//! - [`Session`]: the token, username and wallet balance obtained at login
//! - [`KeyValueStore`]: where the session is persisted ([`FileStore`] on
//!   disk, [`MemoryStore`] for tests)
//! - [`LoginForm`] / [`RegistrationForm`]: local credential checks run
//!   before any network call

mod credentials;
mod error;
mod session;
mod store;

pub use credentials::{
    CredentialError, LoginForm, RegistrationForm, MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};
pub use error::{AuthError, StoreError};
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore};
