//! HTTP client implementation for the tastytrade API.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::config::ClientConfig;
use super::headers::default_headers;
use super::retry::{with_backoff, RequestAttempt};
use crate::{Error, Result};

/// The retrying client for the tastytrade API.
///
/// Every verb method joins its endpoint onto the configured base URL and
/// runs the request through the retry loop described by
/// [`RetryConfig`](super::RetryConfig). Responses are returned as raw JSON.
///
/// Cloning is cheap and every clone shares the same HTTP session, so many
/// requests may be in flight at once.
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use tastytrade_http::TastyClient;
///
/// # async fn example() -> tastytrade_http::Result<()> {
/// let config = HashMap::from([
///     ("BASE_PROD_URL".to_string(), "https://api.tastyworks.com/".to_string()),
///     ("BASE_SANDBOX_URL".to_string(), "https://api.cert.tastyworks.com/".to_string()),
/// ]);
///
/// let client = TastyClient::create(true, &config).await?;
/// let accounts = client.get("customers/me/accounts").await?;
/// println!("{accounts}");
/// client.close().await;
/// # Ok(())
/// # }
/// ```
pub struct TastyClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    http: RwLock<Option<reqwest::Client>>,
    base_url: Url,
    config: ClientConfig,
}

/// Body attached to a POST or PUT request.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON-encoded body
    Json(Value),
    /// `application/x-www-form-urlencoded` body
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize any value into a JSON body.
    pub fn json<B: Serialize + ?Sized>(body: &B) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(body)?))
    }

    /// Build a form body from key/value pairs.
    pub fn form<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(fields) => builder.form(fields),
        }
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

impl TastyClient {
    /// Open a client for the sandbox or production environment.
    ///
    /// The base URL is looked up in `config` under `BASE_SANDBOX_URL` or
    /// `BASE_PROD_URL` before any network activity.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingConfig`] if the required key is absent
    /// - [`Error::SessionInit`] if the HTTP transport cannot be built
    pub async fn create(sandbox: bool, config: &HashMap<String, String>) -> Result<Self> {
        Self::connect(ClientConfig::from_env_map(sandbox, config)?).await
    }

    /// Open a client from an explicit configuration.
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        let base_url = config.validate()?;
        let headers = default_headers(config.user_agent.as_deref())?;

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::SessionInit)?;

        tracing::debug!(base_url = %config.base_url, "Opened HTTP session");

        Ok(Self {
            inner: Arc::new(ClientInner {
                http: RwLock::new(Some(http)),
                base_url,
                config,
            }),
        })
    }

    /// Open a client, run `f` with it, and close the session afterwards.
    ///
    /// The session is closed whether `f` succeeds or fails, and the result of
    /// `f` is returned unchanged.
    pub async fn scoped<F, Fut, T>(config: ClientConfig, f: F) -> Result<T>
    where
        F: FnOnce(TastyClient) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let client = Self::connect(config).await?;
        let result = f(client.clone()).await;
        client.close().await;
        result
    }

    /// Make a GET request.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.inner.request(Method::GET, endpoint, |b| b).await
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> Result<Value> {
        self.inner
            .request(Method::GET, endpoint, |b| b.query(query))
            .await
    }

    /// Make a POST request.
    pub async fn post(&self, endpoint: &str, body: impl Into<RequestBody>) -> Result<Value> {
        let body = body.into();
        self.inner
            .request(Method::POST, endpoint, |b| body.apply(b))
            .await
    }

    /// Make a PUT request.
    pub async fn put(&self, endpoint: &str, body: impl Into<RequestBody>) -> Result<Value> {
        let body = body.into();
        self.inner
            .request(Method::PUT, endpoint, |b| body.apply(b))
            .await
    }

    /// Make a DELETE request.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.inner.request(Method::DELETE, endpoint, |b| b).await
    }

    /// Make a DELETE request with query parameters.
    pub async fn delete_with_query<Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> Result<Value> {
        self.inner
            .request(Method::DELETE, endpoint, |b| b.query(query))
            .await
    }

    /// Close the HTTP session.
    ///
    /// Later requests fail with [`Error::SessionClosed`]. Closing twice is a
    /// no-op.
    pub async fn close(&self) {
        let mut http = self.inner.http.write().await;
        if http.take().is_some() {
            tracing::debug!(base_url = %self.inner.config.base_url, "Closed HTTP session");
        }
    }

    /// Returns `true` once [`close`](Self::close) has run.
    pub async fn is_closed(&self) -> bool {
        self.inner.http.read().await.is_none()
    }

    /// The base URL exactly as configured.
    pub fn base_url(&self) -> &str {
        &self.inner.config.base_url
    }

    /// The configuration this client was opened with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolve an endpoint against the base URL.
    ///
    /// Standard URL-join rules apply: `/sessions` replaces the whole base
    /// path, `sessions` replaces only its last segment.
    pub fn url_for(&self, endpoint: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(endpoint)?)
    }
}

impl ClientInner {
    /// Clone the session handle, failing if the client has been closed.
    async fn session(&self) -> Result<reqwest::Client> {
        self.http.read().await.clone().ok_or(Error::SessionClosed)
    }

    async fn request<F>(&self, method: Method, endpoint: &str, build: F) -> Result<Value>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.base_url.join(endpoint)?;
        let build = &build;

        with_backoff(
            &self.config.retry,
            &method,
            &url,
            |attempt| async move {
                let http = self.session().await?;
                let request = build(http.request(attempt.method.clone(), attempt.url.clone()));
                self.send(request, &attempt).await
            },
            tokio::time::sleep,
        )
        .await
    }

    /// Send one attempt and decode its body.
    async fn send(&self, request: RequestBuilder, attempt: &RequestAttempt) -> Result<Value> {
        tracing::debug!(
            method = %attempt.method,
            url = %attempt.url,
            attempt = attempt.attempt,
            "Sending request"
        );

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(
            method = %attempt.method,
            url = %attempt.url,
            status = status.as_u16(),
            body = %text,
            "Received response"
        );

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_str(&text)?)
        } else {
            let body = match serde_json::from_str::<Value>(&text) {
                Ok(body) => body,
                Err(_) => Value::String(text),
            };
            Err(Error::from_api_response(status.as_u16(), body))
        }
    }
}

impl Clone for TastyClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for TastyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TastyClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
