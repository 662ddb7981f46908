//! Error types for the tastytrade HTTP client.
//!
//! Every fallible operation in this crate returns [`Error`]. Failures that
//! survive the retry loop are handed back exactly as they were produced, so a
//! caller matching on [`Error::Api`] sees the status and body of the last
//! response.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required key was absent from the configuration mapping.
    #[error("Missing configuration key: {key}")]
    MissingConfig {
        /// The key that was looked up
        key: String,
    },

    /// Configuration was present but unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The underlying HTTP transport could not be opened.
    #[error("Failed to open HTTP session: {0}")]
    SessionInit(#[source] reqwest::Error),

    /// HTTP transport failed while a request was in flight
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned a non-success status
    #[error("API error: status={status}, code={code:?}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Optional error code from the API
        code: Option<String>,
        /// Human-readable error message
        message: String,
        /// Raw response body for debugging
        body: Value,
    },

    /// Neither a password nor a remember token was supplied for login.
    #[error("Credential error: {0}")]
    Credential(String),

    /// A request was issued after the client was closed.
    #[error("HTTP session is closed")]
    SessionClosed,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` if this error is transient and the request may be
    /// attempted again.
    ///
    /// Every non-success HTTP status is retryable, as are transport timeouts
    /// and connection failures. Anything else is fatal on first sight.
    ///
    /// # Example
    ///
    /// ```
    /// use tastytrade_http::Error;
    ///
    /// let err = Error::Api {
    ///     status: 503,
    ///     code: None,
    ///     message: "unavailable".into(),
    ///     body: serde_json::Value::Null,
    /// };
    /// assert!(err.is_retryable());
    /// assert!(!Error::SessionClosed.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api { .. } => true,
            Error::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (invalid input, bad request, missing configuration, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_)
            | Error::Config(_)
            | Error::MissingConfig { .. }
            | Error::Credential(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error from a response
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let code = body
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|c| c.as_str())
            .map(String::from);

        let message = body
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| body.as_str())
            .unwrap_or("Unknown API error")
            .to_string();

        Error::Api {
            status,
            code,
            message,
            body,
        }
    }
}
