//! Login and refresh against the token endpoints.

use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use crate::error::{AuthError, Error, TransportError};
use crate::http::HttpClient;
use crate::http::endpoints::{LoginRequest, RefreshRequest, TOKEN, TOKEN_REFRESH, TokenResponse};

use super::credentials::Credentials;
use super::tokens::{RefreshToken, TokenPair};

/// What the caller presents to obtain a token pair.
#[derive(Debug, Clone, Copy)]
pub enum Grant<'a> {
    /// Email and password, sent to the login endpoint.
    Password(&'a Credentials),
    /// A refresh token, sent to the refresh endpoint.
    Refresh(&'a RefreshToken),
}

impl Grant<'_> {
    /// The endpoint path this grant is exchanged at.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Grant::Password(_) => TOKEN,
            Grant::Refresh(_) => TOKEN_REFRESH,
        }
    }
}

/// Result of an authentication attempt.
#[derive(Debug)]
pub enum AuthOutcome {
    /// The server issued a new token pair.
    Success(TokenPair),
    /// The server explicitly refused the credentials or token.
    Rejected {
        endpoint: &'static str,
        reason: Option<String>,
    },
    /// The exchange could not complete (network, malformed body, other status).
    TransportFailure(Error),
}

impl AuthOutcome {
    /// Convert into a result, naming the endpoint on rejection.
    pub fn into_result(self) -> Result<TokenPair, Error> {
        match self {
            AuthOutcome::Success(pair) => Ok(pair),
            AuthOutcome::Rejected { endpoint, .. } => Err(AuthError::Rejected {
                endpoint: endpoint.to_string(),
            }
            .into()),
            AuthOutcome::TransportFailure(err) => Err(err),
        }
    }
}

/// Exchanges credentials or refresh tokens for token pairs.
///
/// The authenticator never touches the token store; committing a new pair is
/// the session's job.
#[derive(Debug, Clone)]
pub struct Authenticator {
    client: HttpClient,
}

impl Authenticator {
    pub(crate) fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Log in with email and password.
    pub async fn login(&self, credentials: &Credentials) -> AuthOutcome {
        self.authenticate(Grant::Password(credentials)).await
    }

    /// Obtain a new pair from a refresh token.
    pub async fn refresh(&self, refresh_token: &RefreshToken) -> AuthOutcome {
        self.authenticate(Grant::Refresh(refresh_token)).await
    }

    /// Exchange a grant at its token endpoint and classify the response.
    #[instrument(skip(self, grant), fields(endpoint = grant.endpoint()))]
    pub async fn authenticate(&self, grant: Grant<'_>) -> AuthOutcome {
        let endpoint = grant.endpoint();

        let sent = match grant {
            Grant::Password(credentials) => {
                info!(email = credentials.email(), "Logging in");
                let request = LoginRequest {
                    email: credentials.email(),
                    password: credentials.password(),
                };
                self.client.post_json(endpoint, &request).await
            }
            Grant::Refresh(token) => {
                info!("Refreshing token pair");
                let request = RefreshRequest {
                    refresh: token.as_str(),
                };
                self.client.post_json(endpoint, &request).await
            }
        };

        let response = match sent {
            Ok(response) => response,
            Err(err) => return AuthOutcome::TransportFailure(err),
        };

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            let error = HttpClient::protocol_error(response).await;
            warn!(status = error.status, "Authorization rejected");
            return AuthOutcome::Rejected {
                endpoint,
                reason: error.detail,
            };
        }
        if !status.is_success() {
            let error = HttpClient::protocol_error(response).await;
            return AuthOutcome::TransportFailure(error.into());
        }

        let body: TokenResponse = match HttpClient::decode(response).await {
            Ok(body) => body,
            Err(err) => return AuthOutcome::TransportFailure(err),
        };

        let refresh = match (body.refresh, grant) {
            (Some(refresh), _) => refresh,
            // Servers that don't rotate refresh tokens only return `access`.
            (None, Grant::Refresh(presented)) => presented.as_str().to_string(),
            (None, Grant::Password(_)) => {
                return AuthOutcome::TransportFailure(
                    TransportError::Decode {
                        message: format!("{endpoint} response is missing the refresh token"),
                    }
                    .into(),
                );
            }
        };

        match TokenPair::new(body.access, refresh) {
            Ok(pair) => {
                debug!("Token pair issued");
                AuthOutcome::Success(pair)
            }
            Err(err) => AuthOutcome::TransportFailure(
                TransportError::Decode {
                    message: format!("{endpoint} response: {err}"),
                }
                .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_map_to_their_endpoints() {
        let creds = Credentials::new("vasya.pupkin@gmail.com", "abc123");
        let token = RefreshToken::new("some_refresh_token");
        assert_eq!(Grant::Password(&creds).endpoint(), "token/");
        assert_eq!(Grant::Refresh(&token).endpoint(), "token/refresh/");
    }

    #[test]
    fn rejected_outcome_names_endpoint() {
        let outcome = AuthOutcome::Rejected {
            endpoint: TOKEN,
            reason: Some("No active account found with the given credentials".into()),
        };
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Authorization (token/) failed");
    }

    #[test]
    fn transport_failure_passes_error_through() {
        let outcome = AuthOutcome::TransportFailure(
            TransportError::Connection {
                message: "refused".into(),
            }
            .into(),
        );
        let err = outcome.into_result().unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.rejected_endpoint().is_none());
    }
}
