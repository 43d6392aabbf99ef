//! Submission error taxonomy

use super::AuthError;
use crate::config::Messages;

/// Why a submission did not end in a successful login.
///
/// Collaborator failures are classified into these variants at the submit
/// boundary and never propagated further as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// One or more fields failed local validation. The collaborator was not called.
    #[error("Form has invalid fields: {}", .fields.join(", "))]
    Invalid { fields: Vec<String> },

    /// Credentials were rejected (status 401).
    #[error("Authentication rejected")]
    AuthenticationRejected,

    /// Too many attempts (status 429).
    #[error("Rate limited")]
    RateLimited,

    /// The account is locked (status 403).
    #[error("Account locked")]
    AccountLocked,

    /// Any other collaborator failure.
    #[error("Login failed: {}", .message.as_deref().unwrap_or("no details"))]
    Generic { message: Option<String> },
}

impl SubmitError {
    /// Returns the general-error text shown to the user for this failure.
    pub fn user_message(&self, messages: &Messages) -> String {
        match self {
            Self::Invalid { .. } => messages.fix_errors.clone(),
            Self::AuthenticationRejected => messages.invalid_credentials.clone(),
            Self::RateLimited => messages.rate_limited.clone(),
            Self::AccountLocked => messages.account_locked.clone(),
            Self::Generic { message } => message
                .clone()
                .unwrap_or_else(|| messages.generic_failure.clone()),
        }
    }

    /// Returns `true` if the failure came from the authentication collaborator.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Invalid { .. })
    }
}

impl From<AuthError> for SubmitError {
    fn from(error: AuthError) -> Self {
        // Status codes take precedence over any payload.
        match error.status {
            Some(401) => Self::AuthenticationRejected,
            Some(429) => Self::RateLimited,
            Some(403) => Self::AccountLocked,
            _ => Self::Generic {
                message: error.payload().map(str::to_string),
            },
        }
    }
}
