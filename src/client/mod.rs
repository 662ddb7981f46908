//! HTTP client and retry layer for the tastytrade API.
//!
//! [`TastyClient`] is the entry point. It resolves a base URL with
//! [`resolve_base_url`], opens an HTTP session carrying the
//! [`default_headers`], and retries failed requests with exponential backoff.
//!
//! # Example
//!
//! ```no_run
//! use tastytrade_http::{ClientConfig, RetryConfig, TastyClient};
//! use std::time::Duration;
//!
//! # async fn example() -> tastytrade_http::Result<()> {
//! let config = ClientConfig::new("https://api.cert.tastyworks.com/")
//!     .with_retry(RetryConfig::new(5, Duration::from_millis(500)));
//!
//! let status = TastyClient::scoped(config, |client| async move {
//!     client.get("market-time/sessions/current").await
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod headers;
mod http;
mod retry;

pub use config::{env_config, resolve_base_url, ClientConfig, RetryConfig};
pub use headers::{default_headers, random_user_agent};
pub use http::{RequestBody, TastyClient};
pub use retry::RequestAttempt;
