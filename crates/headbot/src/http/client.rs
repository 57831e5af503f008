//! HTTP client implementation.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use crate::error::{Error, ProtocolError, TransportError};
use crate::types::ApiUrl;

use super::endpoints::ErrorResponse;

/// HTTP client bound to one API root.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given API root.
    pub fn new(api: ApiUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("headbot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TransportError::from)?;

        Ok(Self { client, api })
    }

    /// POST a JSON body without authentication.
    ///
    /// Only transport failures are errors; the caller classifies the status.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, Error>
    where
        B: Serialize,
    {
        let url = self.api.endpoint(path);
        debug!(%url, "POST");

        let response = self
            .client
            .post(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(body)
            .send()
            .await?;

        trace!(status = %response.status(), "response");
        Ok(response)
    }

    /// Send a request carrying a bearer access token.
    ///
    /// Only transport failures are errors; the caller classifies the status.
    #[instrument(skip(self, query, body, token), fields(api = %self.api))]
    pub async fn send_authed(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<Response, Error> {
        let url = self.api.endpoint(path);
        debug!(%method, %url, "authenticated request");

        let mut builder = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;

        trace!(status = %response.status(), "response");
        Ok(response)
    }

    /// Decode a successful response body.
    ///
    /// An empty body decodes as JSON `null`.
    pub async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, Error> {
        let bytes = response.bytes().await?;
        let bytes: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Build a protocol error from a non-success response.
    ///
    /// Bodies that are not JSON still produce an error carrying the status.
    pub async fn protocol_error(response: Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(body) => {
                let code = body.code.clone();
                ProtocolError::new(status, code, body.into_detail())
            }
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}
