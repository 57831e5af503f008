//! Bearer token types.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// A short-lived access token attached to resource requests.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A longer-lived token used solely to obtain a new [`TokenPair`].
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// An access/refresh token pair issued by login or refresh.
///
/// Both tokens are non-empty. A pair is immutable; a refresh produces a new
/// pair that replaces the old one as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenPair {
    access: AccessToken,
    refresh: RefreshToken,
}

impl TokenPair {
    /// Create a token pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either token is empty.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Result<Self, Error> {
        let access = access.into();
        let refresh = refresh.into();

        if access.is_empty() {
            return Err(InvalidInputError::EmptyToken { kind: "access" }.into());
        }
        if refresh.is_empty() {
            return Err(InvalidInputError::EmptyToken { kind: "refresh" }.into());
        }

        Ok(Self {
            access: AccessToken(access),
            refresh: RefreshToken(refresh),
        })
    }

    /// Returns the access token.
    pub fn access(&self) -> &AccessToken {
        &self.access
    }

    /// Returns the refresh token.
    pub fn refresh(&self) -> &RefreshToken {
        &self.refresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn pair_hides_both_tokens_in_debug() {
        let pair = TokenPair::new("some_access_token", "some_refresh_token").unwrap();
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("some_access_token"));
        assert!(!debug.contains("some_refresh_token"));
    }

    #[test]
    fn pair_rejects_empty_tokens() {
        assert!(TokenPair::new("", "refresh").is_err());
        assert!(TokenPair::new("access", "").is_err());

        let pair = TokenPair::new("access", "refresh").unwrap();
        assert_eq!(pair.access().as_str(), "access");
        assert_eq!(pair.refresh().as_str(), "refresh");
    }
}
