//! Retry-with-backoff around a single request attempt.

use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use super::config::RetryConfig;
use crate::Result;

/// One attempt at a request, handed to the operation being retried.
#[derive(Debug, Clone)]
pub struct RequestAttempt {
    /// HTTP method
    pub method: Method,
    /// Fully joined request URL
    pub url: Url,
    /// Zero-based attempt index
    pub attempt: u32,
}

/// Run `op` until it succeeds, fails fatally, or the attempt ceiling is hit.
///
/// After a retryable failure on attempt `i` the task awaits
/// `sleep(retry.backoff_for_attempt(i))` before trying again. The final error
/// is returned exactly as `op` produced it.
pub(crate) async fn with_backoff<T, Op, Fut, Sl, SlFut>(
    retry: &RetryConfig,
    method: &Method,
    url: &Url,
    mut op: Op,
    mut sleep: Sl,
) -> Result<T>
where
    Op: FnMut(RequestAttempt) -> Fut,
    Fut: Future<Output = Result<T>>,
    Sl: FnMut(Duration) -> SlFut,
    SlFut: Future<Output = ()>,
{
    let mut attempt = 0;
    loop {
        let request = RequestAttempt {
            method: method.clone(),
            url: url.clone(),
            attempt,
        };

        match op(request).await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && !retry.is_last_attempt(attempt) => {
                let delay = retry.backoff_for_attempt(attempt);
                tracing::warn!(
                    %method,
                    %url,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = ?err,
                    "Request failed, backing off"
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(
                    %method,
                    %url,
                    attempt,
                    error = ?err,
                    "Request failed"
                );
                return Err(err);
            }
        }
    }
}
