//! # tastytrade-http
//!
//! A thin async HTTP client for the tastytrade brokerage API.
//!
//! The client picks its base URL from a configuration mapping (production or
//! sandbox), sends JSON requests with a fixed set of default headers, and
//! retries failed requests with exponential backoff.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tastytrade_http::TastyClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> tastytrade_http::Result<()> {
//!     let config = tastytrade_http::client::env_config();
//!     let client = TastyClient::create(true, &config).await?;
//!
//!     let accounts = client.get("customers/me/accounts").await?;
//!     println!("{accounts}");
//!
//!     let watchlist = client
//!         .post("watchlists", json!({"name": "tech", "watchlist-entries": []}))
//!         .await?;
//!     println!("{watchlist}");
//!
//!     client.close().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! Every non-success status, transport timeout and connection failure is
//! retried. With the default [`RetryConfig`] a request is attempted three
//! times, sleeping one second and then two seconds between attempts. The
//! error from the last attempt is returned unchanged.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{LoginRequest, Session};
pub use client::{ClientConfig, RequestBody, RetryConfig, TastyClient};
pub use error::{Error, Result};
pub use models::Environment;

/// Prelude module for convenient imports.
///
/// ```rust
/// use tastytrade_http::prelude::*;
/// ```
pub mod prelude {
    pub use crate::auth::{LoginRequest, Session};
    pub use crate::client::{ClientConfig, RequestBody, RetryConfig, TastyClient};
    pub use crate::error::{Error, Result};
    pub use crate::models::Environment;
}
