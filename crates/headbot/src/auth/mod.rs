//! Authentication types and token handling.
//!
//! This module provides the credentials and token types, the
//! [`TokenStore`] a session keeps its current pair in, and the
//! [`Authenticator`] that talks to the token endpoints.

mod authenticator;
mod credentials;
mod store;
mod tokens;

pub use authenticator::{AuthOutcome, Authenticator, Grant};
pub use credentials::Credentials;
pub use store::TokenStore;
pub use tokens::{AccessToken, RefreshToken, TokenPair};
