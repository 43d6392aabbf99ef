//! Authentication collaborator

use async_trait::async_trait;

use crate::error::AuthError;

/// Submits credentials on behalf of the form.
///
/// Implemented by the host application. Credential transport, token storage
/// and session lifecycle all live behind this trait.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Attempts to log in.
    ///
    /// # Arguments
    ///
    /// * `email` - The identifier, already trimmed
    /// * `password` - The secret, exactly as typed
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Returns `true` while a login call is in flight.
    ///
    /// Hosts use this to disable the submit control.
    fn is_loading(&self) -> bool {
        false
    }
}

/// An authenticator that accepts exactly one credential pair.
///
/// Any other pair is rejected with status 401. The check completes without
/// awaiting, so [`is_loading`](Authenticator::is_loading) keeps its default.
/// Useful for demos and tests.
///
/// # Example
///
/// ```ignore
/// use signin_lib::auth::StaticAuthenticator;
///
/// let auth = StaticAuthenticator::new("user@example.com", "hunter22");
/// ```
#[derive(Debug)]
pub struct StaticAuthenticator {
    email: String,
    password: String,
}

impl StaticAuthenticator {
    /// Creates an authenticator accepting the given credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if email.eq_ignore_ascii_case(&self.email) && password == self.password {
            Ok(())
        } else {
            Err(AuthError::with_status_and_message(
                401,
                "Invalid credentials",
            ))
        }
    }
}
