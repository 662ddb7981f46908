//! Login session support for the tastytrade API.
//!
//! A login is made with either a password or a remember token obtained from
//! an earlier login with `remember_me` set. Credentials are validated when
//! the request is built, so a missing credential never reaches the network.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use tastytrade_http::Session;
//!
//! # async fn example() -> tastytrade_http::Result<()> {
//! let config = HashMap::from([
//!     ("BASE_PROD_URL".to_string(), "https://api.tastyworks.com".to_string()),
//!     ("BASE_SANDBOX_URL".to_string(), "https://api.cert.tastyworks.com".to_string()),
//! ]);
//!
//! let session = Session::new("username", Some("password"), Some(true), None, true, &config)?;
//! let client = session.client().await?;
//! let response = session.login(&client).await?;
//! client.close().await;
//! # Ok(())
//! # }
//! ```

mod session;

pub use session::{LoginRequest, Session, SESSIONS_ENDPOINT};
