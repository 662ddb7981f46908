//! Default request headers.

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};

use crate::{Error, Result};

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.4; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.2478.51",
];

/// Pick a browser User-Agent string at random.
pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Build the headers sent on every request.
///
/// `Accept` and `Content-Type` are JSON. The User-Agent is `user_agent` when
/// given, otherwise a random browser string.
pub fn default_headers(user_agent: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let agent = match user_agent {
        Some(agent) => agent,
        None => random_user_agent(),
    };
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(agent)
            .map_err(|_| Error::InvalidInput("Invalid User-Agent header".to_string()))?,
    );

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_json() {
        let headers = default_headers(None).unwrap();
        assert_eq!(headers[ACCEPT], "application/json");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_random_user_agent_from_pool() {
        let headers = default_headers(None).unwrap();
        let agent = headers[USER_AGENT].to_str().unwrap();
        assert!(USER_AGENTS.contains(&agent));
        assert!(agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_explicit_user_agent() {
        let headers = default_headers(Some("my-app/1.0")).unwrap();
        assert_eq!(headers[USER_AGENT], "my-app/1.0");
    }

    #[test]
    fn test_invalid_user_agent() {
        assert!(matches!(
            default_headers(Some("bad\nagent")),
            Err(Error::InvalidInput(_))
        ));
    }
}
