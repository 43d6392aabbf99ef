//! Authentication collaborator error types

/// Failure reported by an [`Authenticator`](crate::auth::Authenticator).
///
/// Carries an optional HTTP-like status code and an optional message payload.
/// Either, both or neither may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthError {
    /// Status code reported by the provider (e.g. 401, 403, 429).
    pub status: Option<u16>,
    /// Message supplied by the provider.
    pub message: Option<String>,
}

impl AuthError {
    /// Creates an error with only a status code.
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            message: None,
        }
    }

    /// Creates an error with only a message payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    /// Creates an error carrying both a status code and a message.
    pub fn with_status_and_message(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
        }
    }

    /// Returns the message payload, skipping blank ones.
    pub fn payload(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, self.payload()) {
            (Some(status), Some(message)) => write!(f, "status {}: {}", status, message),
            (Some(status), None) => write!(f, "status {}", status),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("authentication failed"),
        }
    }
}

impl std::error::Error for AuthError {}
