//! Primitive types for environment selection.

use std::fmt;

/// Configuration key holding the production base URL.
pub const BASE_PROD_URL: &str = "BASE_PROD_URL";

/// Configuration key holding the sandbox base URL.
pub const BASE_SANDBOX_URL: &str = "BASE_SANDBOX_URL";

/// Environment configuration for the tastytrade API.
///
/// Determines which configured base URL is used - production or sandbox.
///
/// # Example
///
/// ```
/// use tastytrade_http::Environment;
///
/// let env = Environment::from_sandbox(true);
/// assert_eq!(env.config_key(), "BASE_SANDBOX_URL");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Environment {
    /// Production environment - real trading with real money.
    #[default]
    Production,
    /// Sandbox/certification environment for testing.
    Sandbox,
}

impl Environment {
    /// Map a sandbox flag to an environment.
    pub fn from_sandbox(sandbox: bool) -> Self {
        if sandbox {
            Environment::Sandbox
        } else {
            Environment::Production
        }
    }

    /// The configuration key that holds this environment's base URL.
    pub fn config_key(&self) -> &'static str {
        match self {
            Environment::Production => BASE_PROD_URL,
            Environment::Sandbox => BASE_SANDBOX_URL,
        }
    }

    /// Returns `true` if this is the production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Returns `true` if this is the sandbox environment.
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Environment::Sandbox)
    }
}

impl From<bool> for Environment {
    fn from(sandbox: bool) -> Self {
        Self::from_sandbox(sandbox)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Sandbox => write!(f, "sandbox"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_flag() {
        assert_eq!(Environment::from_sandbox(true), Environment::Sandbox);
        assert_eq!(Environment::from_sandbox(false), Environment::Production);
        assert!(Environment::from(true).is_sandbox());
        assert!(Environment::default().is_production());
    }

    #[test]
    fn test_environment_config_keys() {
        assert_eq!(Environment::Production.config_key(), "BASE_PROD_URL");
        assert_eq!(Environment::Sandbox.config_key(), "BASE_SANDBOX_URL");
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Sandbox.to_string(), "sandbox");
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
