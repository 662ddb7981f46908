//! Login session for the tastytrade API.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::client::{resolve_base_url, ClientConfig};
use crate::{Environment, Error, Result, TastyClient};

/// Endpoint that accepts a login body.
pub const SESSIONS_ENDPOINT: &str = "sessions";

/// Validated credentials for a `POST /sessions` login.
///
/// A login needs either a password or a remember token. When both are given
/// the password is sent and the remember token is left out.
#[derive(Clone)]
pub struct LoginRequest {
    login: String,
    password: Option<SecretString>,
    remember_me: bool,
    remember_token: Option<SecretString>,
}

impl LoginRequest {
    /// Validate credentials and build a login request.
    ///
    /// Empty strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Credential`] if neither a password nor a remember
    /// token is supplied.
    ///
    /// # Example
    ///
    /// ```
    /// use tastytrade_http::auth::LoginRequest;
    ///
    /// let request = LoginRequest::new("trader", Some("hunter2"), Some(true), None).unwrap();
    /// let body = request.to_body();
    /// assert_eq!(body["login"], "trader");
    /// assert_eq!(body["remember-me"], true);
    /// assert!(body.get("remember-token").is_none());
    ///
    /// assert!(LoginRequest::new("trader", None, None, None).is_err());
    /// ```
    pub fn new(
        login: impl Into<String>,
        password: Option<&str>,
        remember_me: Option<bool>,
        remember_token: Option<&str>,
    ) -> Result<Self> {
        let password = non_empty_secret(password);
        let remember_token = non_empty_secret(remember_token);

        if password.is_none() && remember_token.is_none() {
            return Err(Error::Credential(
                "A password or remember token must be provided to login".to_string(),
            ));
        }

        Ok(Self {
            login: login.into(),
            password,
            remember_me: remember_me.unwrap_or(false),
            remember_token,
        })
    }

    /// The login name.
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Whether a remember token is requested from the server.
    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    /// Build the JSON body sent to the sessions endpoint.
    pub fn to_body(&self) -> Value {
        let mut body = Map::new();
        body.insert("login".to_string(), Value::String(self.login.clone()));
        body.insert("remember-me".to_string(), Value::Bool(self.remember_me));

        if let Some(password) = &self.password {
            body.insert(
                "password".to_string(),
                Value::String(password.expose_secret().to_string()),
            );
        } else if let Some(token) = &self.remember_token {
            body.insert(
                "remember-token".to_string(),
                Value::String(token.expose_secret().to_string()),
            );
        }

        Value::Object(body)
    }
}

fn non_empty_secret(value: Option<&str>) -> Option<SecretString> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| SecretString::from(v.to_string()))
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("remember_me", &self.remember_me)
            .field(
                "remember_token",
                &self.remember_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// A login session bound to one environment.
///
/// Credentials are checked when the session is built, before the base URL is
/// looked up and before any network call.
#[derive(Clone)]
pub struct Session {
    environment: Environment,
    base_url: String,
    request: LoginRequest,
}

impl Session {
    /// Build a session from credentials and a configuration mapping.
    ///
    /// # Errors
    ///
    /// - [`Error::Credential`] if neither password nor remember token is set
    /// - [`Error::MissingConfig`] if the environment's base URL key is absent
    /// - [`Error::UrlParse`] or [`Error::Config`] if the base URL is unusable
    pub fn new(
        login: impl Into<String>,
        password: Option<&str>,
        remember_me: Option<bool>,
        remember_token: Option<&str>,
        sandbox: bool,
        config: &HashMap<String, String>,
    ) -> Result<Self> {
        let request = LoginRequest::new(login, password, remember_me, remember_token)?;
        let base_url = resolve_base_url(sandbox, config)?;
        ClientConfig::new(base_url.as_str()).validate()?;

        Ok(Self {
            environment: Environment::from_sandbox(sandbox),
            base_url,
            request,
        })
    }

    /// The environment this session targets.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The validated login request.
    pub fn request(&self) -> &LoginRequest {
        &self.request
    }

    /// The JSON login body.
    pub fn request_body(&self) -> Value {
        self.request.to_body()
    }

    /// Open a client against this session's base URL.
    pub async fn client(&self) -> Result<TastyClient> {
        self.client_with(ClientConfig::new(self.base_url.clone())).await
    }

    /// Open a client with custom retry, timeout or User-Agent settings.
    ///
    /// The base URL of `config` is replaced by this session's.
    pub async fn client_with(&self, config: ClientConfig) -> Result<TastyClient> {
        TastyClient::connect(ClientConfig {
            base_url: self.base_url.clone(),
            ..config
        })
        .await
    }

    /// Post the login body to the sessions endpoint.
    ///
    /// Returns the raw response, which carries the session token on success.
    pub async fn login(&self, client: &TastyClient) -> Result<Value> {
        tracing::debug!(
            login = %self.request.login,
            environment = %self.environment,
            "Creating session"
        );
        client.post(SESSIONS_ENDPOINT, self.request.to_body()).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("request", &self.request)
            .finish()
    }
}
