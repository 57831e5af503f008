//! headbot - async session client for the Headbot API
//!
//! The API issues short-lived access tokens together with a refresh token.
//! A [`Session`] logs in, attaches the access token to every request, and
//! when the server rejects it, refreshes the pair once and retries the
//! request once.
//!
//! # Example
//!
//! ```no_run
//! use headbot::{ApiUrl, Credentials, Session};
//!
//! # async fn example() -> Result<(), headbot::Error> {
//! let api = ApiUrl::new(headbot::DEFAULT_API_URL)?;
//! let credentials = Credentials::new("vasya.pupkin@gmail.com", "abc123");
//! let session = Session::open(&api, credentials).await?;
//!
//! for crawler in session.crawlers().await? {
//!     println!("{}", crawler["name"]);
//! }
//!
//! session.close().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod error;
pub mod executor;
mod http;
mod retry;
mod session;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credentials, TokenPair};
pub use error::Error;
pub use executor::Request;
pub use session::Session;
pub use types::ApiUrl;

/// Root URL of the production API.
pub const DEFAULT_API_URL: &str = "https://headbot.io/api/";

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
