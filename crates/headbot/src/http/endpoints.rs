//! Endpoint paths and request/response types.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths (relative to the API root)
// ============================================================================

/// Login with email and password.
pub const TOKEN: &str = "token/";

/// Exchange a refresh token for a new token pair.
pub const TOKEN_REFRESH: &str = "token/refresh/";

/// List the account's crawlers.
pub const CRAWLERS: &str = "crawlers/";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the login endpoint.
///
/// Deliberately not `Debug`; it carries the password.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Request body for the refresh endpoint.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Success body of both token endpoints.
///
/// `refresh` is absent when the server does not rotate refresh tokens.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Error body returned with 4xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub messages: Vec<TokenMessage>,
}

/// Per-token explanation attached to `token_not_valid` errors.
#[derive(Debug, Deserialize)]
pub struct TokenMessage {
    #[serde(default)]
    pub token_class: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// The top-level detail, or the first per-token message.
    pub fn into_detail(self) -> Option<String> {
        self.detail
            .or_else(|| self.messages.into_iter().find_map(|m| m.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_token_not_valid_body() {
        let body = json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid",
            "messages": [{
                "token_class": "AccessToken",
                "token_type": "access",
                "message": "Token is invalid or expired"
            }]
        });
        let parsed: ErrorResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.code.as_deref(), Some("token_not_valid"));
        assert_eq!(parsed.messages.len(), 1);
        assert_eq!(parsed.messages[0].token_type.as_deref(), Some("access"));
        assert_eq!(
            parsed.into_detail().as_deref(),
            Some("Given token not valid for any token type")
        );
    }

    #[test]
    fn detail_falls_back_to_token_message() {
        let parsed: ErrorResponse = serde_json::from_value(json!({
            "messages": [{ "message": "Token is invalid or expired" }]
        }))
        .unwrap();
        assert_eq!(
            parsed.into_detail().as_deref(),
            Some("Token is invalid or expired")
        );
    }

    #[test]
    fn refresh_response_without_rotation() {
        let parsed: TokenResponse =
            serde_json::from_value(json!({ "access": "another_access_token" })).unwrap();
        assert_eq!(parsed.access, "another_access_token");
        assert!(parsed.refresh.is_none());
    }
}
