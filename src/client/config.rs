//! Client configuration options and base URL resolution.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::models::{BASE_PROD_URL, BASE_SANDBOX_URL};
use crate::{Environment, Error, Result};

/// Resolve the base URL for an environment from a configuration mapping.
///
/// Returns the value under `BASE_SANDBOX_URL` when `sandbox` is set and
/// `BASE_PROD_URL` otherwise. The lookup happens before any network activity.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use tastytrade_http::client::resolve_base_url;
///
/// let config = HashMap::from([
///     ("BASE_PROD_URL".to_string(), "https://api.tastyworks.com".to_string()),
///     ("BASE_SANDBOX_URL".to_string(), "https://api.cert.tastyworks.com".to_string()),
/// ]);
///
/// assert_eq!(
///     resolve_base_url(true, &config).unwrap(),
///     "https://api.cert.tastyworks.com"
/// );
/// ```
pub fn resolve_base_url(sandbox: bool, config: &HashMap<String, String>) -> Result<String> {
    let key = Environment::from_sandbox(sandbox).config_key();
    config
        .get(key)
        .cloned()
        .ok_or_else(|| Error::MissingConfig {
            key: key.to_string(),
        })
}

/// Collect the base URL keys from the process environment.
///
/// Variables that are unset are left out of the mapping, so a later
/// [`resolve_base_url`] reports the missing key.
pub fn env_config() -> HashMap<String, String> {
    [BASE_PROD_URL, BASE_SANDBOX_URL]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect()
}

/// Configuration for the tastytrade client.
///
/// # Example
///
/// ```
/// use tastytrade_http::{ClientConfig, RetryConfig};
/// use std::time::Duration;
///
/// let config = ClientConfig::new("https://api.cert.tastyworks.com")
///     .with_retry(RetryConfig::new(5, Duration::from_millis(250)))
///     .with_user_agent("my-app/1.0");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint is joined onto
    pub base_url: String,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Fixed User-Agent; a random browser string is used when unset
    pub user_agent: Option<String>,
    /// Request timeout; unbounded when unset
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration for the given base URL with default retries.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry: RetryConfig::default(),
            user_agent: None,
            timeout: None,
        }
    }

    /// Create a configuration whose base URL is resolved from a mapping.
    pub fn from_env_map(sandbox: bool, config: &HashMap<String, String>) -> Result<Self> {
        Ok(Self::new(resolve_base_url(sandbox, config)?))
    }

    /// Set the retry configuration.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a transport-level request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check every field, returning the parsed base URL.
    pub fn validate(&self) -> Result<Url> {
        self.retry.validate()?;

        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL cannot be joined onto: {}",
                self.base_url
            )));
        }

        if matches!(self.timeout, Some(t) if t.is_zero()) {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }

        Ok(url)
    }
}

/// Configuration for automatic retries.
///
/// `max_retries` is the total number of attempts. A failed attempt `i`
/// (counting from zero) is followed by a sleep of `base_delay * 2^i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, at least one
    pub max_retries: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// A configuration that makes a single attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 1,
            ..Default::default()
        }
    }

    /// Set the maximum number of attempts.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the base backoff duration.
    pub fn with_base_delay(mut self, duration: Duration) -> Self {
        self.base_delay = duration;
        self
    }

    /// Calculate the backoff duration after a failed attempt.
    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Returns `true` if `attempt` is the final one allowed.
    pub fn is_last_attempt(&self, attempt: u32) -> bool {
        attempt + 1 >= self.max_retries
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(Error::Config("max_retries must be at least 1".to_string()));
        }
        if self.base_delay.is_zero() {
            return Err(Error::Config("base_delay must be greater than zero".to_string()));
        }
        Ok(())
    }
}
