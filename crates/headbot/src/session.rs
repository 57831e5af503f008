//! Authenticated session against the Headbot API.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use crate::Result;
use crate::auth::{Authenticator, Credentials, RefreshToken, TokenPair, TokenStore};
use crate::error::{AuthError, InvalidInputError};
use crate::executor::{Executor, Request};
use crate::http::HttpClient;
use crate::http::endpoints::CRAWLERS;
use crate::retry::{AfterFirst, Sent};
use crate::types::ApiUrl;

/// A session holding the current token pair and the logic around it.
///
/// Every resource call attaches the current access token. When the server
/// rejects it, the session refreshes the pair once and retries the call
/// once; whatever the retry returns is final.
///
/// Sessions are safe to share across tasks. Login and refresh are
/// serialised, so concurrent calls that hit an expired token share a
/// single refresh.
///
/// # Example
///
/// ```no_run
/// use headbot::{ApiUrl, Credentials, Session};
///
/// # async fn example() -> Result<(), headbot::Error> {
/// let api = ApiUrl::new("https://headbot.io/api/")?;
/// let creds = Credentials::new("vasya.pupkin@gmail.com", "abc123");
/// let session = Session::open(&api, creds).await?;
///
/// let crawlers = session.crawlers().await?;
/// println!("{} crawlers", crawlers.len());
///
/// session.close().await;
/// # Ok(())
/// # }
/// ```
pub struct Session {
    api: ApiUrl,
    authenticator: Authenticator,
    executor: Executor,
    tokens: TokenStore,
    /// Serialises login and refresh. Holds the credentials until the first
    /// token pair is issued.
    auth: Mutex<Option<Credentials>>,
}

impl Session {
    /// Create a session without contacting the server.
    ///
    /// The first resource call logs in with `credentials`.
    pub fn new(api: ApiUrl, credentials: Credentials) -> Result<Self> {
        Self::build(api, Some(credentials))
    }

    /// Log in and return a usable session.
    ///
    /// # Errors
    ///
    /// Fails with `Authorization (token/) failed` if the server rejects the
    /// credentials, or with the transport error if login could not complete.
    #[instrument(skip(credentials), fields(api = %api, email = %credentials.email()))]
    pub async fn open(api: &ApiUrl, credentials: Credentials) -> Result<Self> {
        info!("Opening session");
        let session = Self::new(api.clone(), credentials)?;
        session.login().await?;
        Ok(session)
    }

    /// Open a session from a refresh token alone.
    #[instrument(skip(refresh_token), fields(api = %api))]
    pub async fn from_refresh_token(api: &ApiUrl, refresh_token: &str) -> Result<Self> {
        info!("Opening session from refresh token");
        let session = Self::build(api.clone(), None)?;
        session.auth_by_refresh_token(refresh_token).await?;
        Ok(session)
    }

    fn build(api: ApiUrl, credentials: Option<Credentials>) -> Result<Self> {
        let client = HttpClient::new(api.clone())?;

        Ok(Self {
            api,
            authenticator: Authenticator::new(client.clone()),
            executor: Executor::new(client),
            tokens: TokenStore::new(),
            auth: Mutex::new(credentials),
        })
    }

    /// Log in with the credentials the session was created with.
    ///
    /// Credentials are released once a token pair has been issued, so this
    /// fails with [`AuthError::MissingCredentials`] afterwards.
    pub async fn login(&self) -> Result<()> {
        let mut auth = self.auth.lock().await;
        self.login_locked(&mut auth).await?;
        Ok(())
    }

    /// Authenticate with an explicit refresh token.
    ///
    /// On rejection the error reads `Authorization (token/refresh/) failed`
    /// and the stored pair is left as it was. An empty token is refused
    /// without contacting the server.
    #[instrument(skip(self, refresh_token), fields(api = %self.api))]
    pub async fn auth_by_refresh_token(&self, refresh_token: &str) -> Result<()> {
        if refresh_token.is_empty() {
            return Err(InvalidInputError::EmptyToken { kind: "refresh" }.into());
        }

        let mut auth = self.auth.lock().await;
        let token = RefreshToken::new(refresh_token);
        let pair = self.authenticator.refresh(&token).await.into_result()?;
        self.commit(&mut auth, pair).await;
        Ok(())
    }

    /// Refresh the stored token pair with its own refresh token.
    #[instrument(skip(self), fields(api = %self.api))]
    pub async fn refresh(&self) -> Result<()> {
        let mut auth = self.auth.lock().await;
        let current = self.tokens.get().await.ok_or(AuthError::NoRefreshToken)?;
        let pair = self
            .authenticator
            .refresh(current.refresh())
            .await
            .into_result()?;
        self.commit(&mut auth, pair).await;
        Ok(())
    }

    /// Returns the API root for this session.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Returns the current access token, if logged in.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn access_token(&self) -> Option<String> {
        self.tokens
            .get()
            .await
            .map(|pair| pair.access().as_str().to_string())
    }

    /// Returns the current refresh token, if logged in.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It can be used to obtain new access tokens.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .get()
            .await
            .map(|pair| pair.refresh().as_str().to_string())
    }

    /// Whether the session currently holds a token pair.
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.get().await.is_some()
    }

    /// Release the session.
    ///
    /// Tokens are discarded locally; nothing is revoked server-side.
    pub async fn close(self) {
        info!(api = %self.api, "Closing session");
        self.tokens.clear().await;
    }

    // ========================================================================
    // Resource Operations
    // ========================================================================

    /// List the account's crawlers.
    pub async fn crawlers(&self) -> Result<Vec<serde_json::Value>> {
        self.call(&Request::get(CRAWLERS)).await
    }

    /// Perform an authenticated request and decode its JSON body.
    ///
    /// Logs in first if the session holds no tokens. A rejected access token
    /// triggers one refresh and one retry.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn call<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let pair = self.ensure_tokens().await?;

        let outcome = self.executor.execute(request, pair.access()).await;
        let refreshing = match Sent.on_response(outcome) {
            AfterFirst::Done(result) => return result,
            AfterFirst::Refresh(next) => next,
        };

        info!("Access token rejected, refreshing before retry");
        let (retried, pair) = refreshing.on_refresh(self.refresh_after_rejection(&pair).await)?;

        let outcome = self.executor.execute(request, pair.access()).await;
        retried.on_response(outcome)
    }

    async fn ensure_tokens(&self) -> Result<Arc<TokenPair>> {
        if let Some(pair) = self.tokens.get().await {
            return Ok(pair);
        }

        let mut auth = self.auth.lock().await;
        // Another call may have logged in while we waited.
        if let Some(pair) = self.tokens.get().await {
            return Ok(pair);
        }

        debug!("No tokens stored, logging in");
        self.login_locked(&mut auth).await
    }

    /// Refresh the pair that was rejected, unless a concurrent call already
    /// replaced it.
    async fn refresh_after_rejection(&self, rejected: &Arc<TokenPair>) -> Result<Arc<TokenPair>> {
        let mut auth = self.auth.lock().await;

        if let Some(current) = self.tokens.get().await
            && !Arc::ptr_eq(&current, rejected)
        {
            debug!("Token pair already refreshed by a concurrent call");
            return Ok(current);
        }

        let pair = self
            .authenticator
            .refresh(rejected.refresh())
            .await
            .into_result()?;
        Ok(self.commit(&mut auth, pair).await)
    }

    async fn login_locked(
        &self,
        auth: &mut MutexGuard<'_, Option<Credentials>>,
    ) -> Result<Arc<TokenPair>> {
        let credentials = auth.as_ref().ok_or(AuthError::MissingCredentials)?;
        let pair = self
            .authenticator
            .login(credentials)
            .await
            .into_result()?;
        Ok(self.commit(auth, pair).await)
    }

    async fn commit(
        &self,
        auth: &mut MutexGuard<'_, Option<Credentials>>,
        pair: TokenPair,
    ) -> Arc<TokenPair> {
        let pair = self.tokens.set(pair).await;
        if auth.take().is_some() {
            debug!("Credentials released");
        }
        pair
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api", &self.api)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
