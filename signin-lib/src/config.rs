//! Form configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SchemaError;
use crate::validation::{EMAIL_FIELD, FormSchema, PASSWORD_FIELD, SchemaDocument};

/// Config loading error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid schema in config: {0}")]
    Schema(#[from] SchemaError),
    #[error("credential field '{0}' is not defined in the schema")]
    MissingCredentialField(String),
}

/// User-facing texts the form produces outside of field rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Notified after a successful login.
    pub login_success: String,
    /// General error when local validation blocks a submit.
    pub fix_errors: String,
    /// Status 401.
    pub invalid_credentials: String,
    /// Status 429.
    pub rate_limited: String,
    /// Status 403.
    pub account_locked: String,
    /// Any other failure without a usable message from the provider.
    pub generic_failure: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            login_success: "Welcome back! You have been logged in.".to_string(),
            fix_errors: "Please fix the errors below and try again.".to_string(),
            invalid_credentials: "Invalid email or password. Please try again.".to_string(),
            rate_limited: "Too many login attempts. Please wait a moment and try again."
                .to_string(),
            account_locked: "Your account has been locked. Please contact support.".to_string(),
            generic_failure: "Login failed. Please try again.".to_string(),
        }
    }
}

/// Configuration for a [`LoginForm`](crate::form::LoginForm).
///
/// Every key is optional in JSON; missing keys take their defaults.
///
/// ```json
/// {
///   "error_clear_delay_ms": 5000,
///   "register_route": "/signup",
///   "messages": { "invalid_credentials": "Wrong email or password" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginFormConfig {
    /// How long a submission failure message stays before it is cleared.
    pub error_clear_delay_ms: u64,
    /// Route passed to the navigator when the user wants to create an account.
    pub register_route: String,
    /// Field submitted as the login identifier (trimmed).
    pub identifier_field: String,
    /// Field submitted as the secret (raw).
    pub secret_field: String,
    pub messages: Messages,
    /// Replaces the built-in field rules when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDocument>,
}

impl Default for LoginFormConfig {
    fn default() -> Self {
        Self {
            error_clear_delay_ms: 5000,
            register_route: "/register".to_string(),
            identifier_field: EMAIL_FIELD.to_string(),
            secret_field: PASSWORD_FIELD.to_string(),
            messages: Messages::default(),
            schema: None,
        }
    }
}

impl LoginFormConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::debug!("Loaded form config from {}", path.display());
        Ok(config)
    }

    /// Set the general error auto-clear delay.
    pub fn error_clear_delay(mut self, delay: Duration) -> Self {
        self.error_clear_delay_ms = delay.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    /// Set the registration route.
    pub fn register_route(mut self, route: impl Into<String>) -> Self {
        self.register_route = route.into();
        self
    }

    /// Set the user-facing messages.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// The auto-clear delay as a [`Duration`].
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.error_clear_delay_ms)
    }

    /// Build the schema this config describes, falling back to [`FormSchema::login`].
    pub fn build_schema(&self) -> Result<FormSchema, ConfigError> {
        match &self.schema {
            Some(document) => Ok(FormSchema::try_from(document.clone())?),
            None => Ok(FormSchema::login()),
        }
    }
}
