//! Demo collaborators for the terminal driver.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use signin_lib::auth::Authenticator;
use signin_lib::error::AuthError;
use signin_lib::navigation::Navigator;
use signin_lib::notify::Notifier;

/// Failed attempts per email before further attempts are rate limited.
const MAX_FAILURES: u32 = 3;

/// In-memory authenticator with a few canned accounts.
///
/// - `demo@example.com` / `password123` logs in
/// - `locked@example.com` is always rejected with 403
/// - more than three failures for one email yield 429
pub struct DemoAuthenticator {
    accounts: HashMap<String, String>,
    locked: Vec<String>,
    failures: Mutex<HashMap<String, u32>>,
    latency: Duration,
    loading: AtomicBool,
}

impl DemoAuthenticator {
    pub fn new(latency: Duration) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert("demo@example.com".to_string(), "password123".to_string());
        Self {
            accounts,
            locked: vec!["locked@example.com".to_string()],
            failures: Mutex::new(HashMap::new()),
            latency,
            loading: AtomicBool::new(false),
        }
    }

    fn check(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = email.to_lowercase();
        if self.locked.contains(&email) {
            return Err(AuthError::status(403));
        }

        let mut failures = self.failures.lock().unwrap_or_else(|p| p.into_inner());
        let count = failures.entry(email.clone()).or_default();
        if *count >= MAX_FAILURES {
            return Err(AuthError::status(429));
        }

        match self.accounts.get(&email) {
            Some(expected) if expected == password => {
                *count = 0;
                Ok(())
            }
            Some(_) => {
                *count += 1;
                Err(AuthError::with_status_and_message(401, "Wrong password"))
            }
            None => {
                *count += 1;
                Err(AuthError::with_status_and_message(401, "Unknown account"))
            }
        }
    }
}

#[async_trait]
impl Authenticator for DemoAuthenticator {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.loading.store(true, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        let result = self.check(email, password);
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

/// Prints notifications to stdout.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify_success(&self, message: &str) {
        println!("  [success] {}", message);
    }

    fn notify_error(&self, message: &str) {
        println!("  [error] {}", message);
    }
}

/// Prints navigation requests to stdout.
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate_to(&self, route: &str) {
        println!("  -> navigate to {}", route);
    }
}
