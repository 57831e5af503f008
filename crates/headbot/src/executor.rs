//! Single authenticated request execution.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::auth::AccessToken;
use crate::error::{Error, ProtocolError};
use crate::http::HttpClient;

/// A resource request, relative to the API root.
///
/// The same request is sent again verbatim when the session retries after a
/// token refresh.
///
/// # Example
///
/// ```
/// use headbot::Request;
///
/// let request = Request::get("crawlers/").query("page", "2");
/// assert_eq!(request.path(), "crawlers/");
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl Request {
    /// Create a request with an arbitrary method.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the endpoint path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Outcome of a single request attempt.
#[derive(Debug)]
pub enum ExecOutcome<T> {
    /// 2xx with a decoded body.
    Success(T),
    /// The server rejected the access token.
    AuthRejected(ProtocolError),
    /// Anything else; never eligible for refresh and retry.
    OtherFailure(Error),
}

/// Sends requests with a bearer token and classifies the result.
#[derive(Debug, Clone)]
pub struct Executor {
    client: HttpClient,
}

impl Executor {
    pub(crate) fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Send `request` once with `token` attached.
    #[instrument(skip(self, request, token), fields(method = %request.method, path = %request.path))]
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: &Request,
        token: &AccessToken,
    ) -> ExecOutcome<T> {
        let response = match self
            .client
            .send_authed(
                request.method.clone(),
                &request.path,
                &request.query,
                request.body.as_ref(),
                token.as_str(),
            )
            .await
        {
            Ok(response) => response,
            Err(err) => return ExecOutcome::OtherFailure(err),
        };

        if !response.status().is_success() {
            let error = HttpClient::protocol_error(response).await;
            if error.is_auth_error() {
                warn!(status = error.status, code = ?error.code, "Access token rejected");
                return ExecOutcome::AuthRejected(error);
            }
            debug!(status = error.status, "Request failed");
            return ExecOutcome::OtherFailure(error.into());
        }

        match HttpClient::decode(response).await {
            Ok(body) => ExecOutcome::Success(body),
            Err(err) => ExecOutcome::OtherFailure(err),
        }
    }
}
