//! Tests for the login form engine, driven through its public API.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use signin_lib::auth::Authenticator;
use signin_lib::config::{ConfigError, LoginFormConfig, Messages};
use signin_lib::error::{AuthError, FormError, SubmitError};
use signin_lib::navigation::Navigator;
use signin_lib::notify::Notifier;
use signin_lib::validation::{FieldDefinition, FieldStatus, FormSchema};
use signin_lib::{LoginForm, SubmitOutcome};

// =============================================================================
// Recording collaborators
// =============================================================================

#[derive(Default)]
struct FakeAuth {
    calls: Mutex<Vec<(String, String)>>,
    responses: Mutex<VecDeque<Result<(), AuthError>>>,
    loading: AtomicBool,
}

impl FakeAuth {
    fn responding(responses: Vec<Result<(), AuthError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Default::default()
        })
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Authenticator for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), password.to_string()));
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Success(String),
    Error(String),
}

#[derive(Clone, Default)]
struct FakeNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl FakeNotifier {
    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for FakeNotifier {
    fn notify_success(&self, message: &str) {
        let notice = Notice::Success(message.to_string());
        self.notices.lock().unwrap().push(notice);
    }

    fn notify_error(&self, message: &str) {
        let notice = Notice::Error(message.to_string());
        self.notices.lock().unwrap().push(notice);
    }
}

#[derive(Clone, Default)]
struct FakeNavigator {
    routes: Arc<Mutex<Vec<String>>>,
}

impl Navigator for FakeNavigator {
    fn navigate_to(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

struct Harness {
    form: LoginForm,
    auth: Arc<FakeAuth>,
    notifier: FakeNotifier,
    navigator: FakeNavigator,
}

fn harness(responses: Vec<Result<(), AuthError>>) -> Harness {
    let auth = FakeAuth::responding(responses);
    let notifier = FakeNotifier::default();
    let navigator = FakeNavigator::default();
    let form = LoginForm::builder()
        .shared_authenticator(auth.clone())
        .notifier(notifier.clone())
        .navigator(navigator.clone())
        .build()
        .unwrap();
    Harness {
        form,
        auth,
        notifier,
        navigator,
    }
}

fn fill(form: &mut LoginForm, email: &str, password: &str) {
    form.on_change("email", email).unwrap();
    form.on_change("password", password).unwrap();
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_successful_login_resets_form() {
    let mut h = harness(vec![Ok(())]);
    fill(&mut h.form, "a@b.c", "secret");
    assert!(h.form.is_valid());

    let outcome = h.form.on_submit().await;

    assert_eq!(outcome, SubmitOutcome::LoggedIn);
    assert_eq!(
        h.auth.calls(),
        vec![("a@b.c".to_string(), "secret".to_string())]
    );
    assert_eq!(h.form.value("email"), "");
    assert_eq!(h.form.value("password"), "");
    assert!(!h.form.is_touched("email"));
    assert_eq!(h.form.submit_attempts(), 0);
    assert_eq!(h.form.general_error(), None);
    assert_eq!(h.form.field_error("email"), None);
    assert_eq!(
        h.notifier.notices(),
        vec![Notice::Success(Messages::default().login_success)]
    );
}

#[tokio::test]
async fn test_invalid_submit_never_calls_authenticator() {
    let mut h = harness(vec![]);
    fill(&mut h.form, "bad", "12");

    let outcome = h.form.on_submit().await;

    let SubmitOutcome::Invalid(validation) = &outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    assert!(!validation.is_valid);
    assert_eq!(
        validation.error("email"),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        validation.error("password"),
        Some("Password must be at least 6 characters long")
    );
    assert!(h.auth.calls().is_empty());
    assert!(h.notifier.notices().is_empty());
    assert_eq!(h.form.submit_attempts(), 1);
    let fix_errors = Messages::default().fix_errors;
    assert_eq!(h.form.general_error(), Some(fix_errors));
    assert_eq!(
        outcome.error(),
        Some(SubmitError::Invalid {
            fields: vec!["email".to_string(), "password".to_string()],
        })
    );
}

#[tokio::test]
async fn test_submit_touches_every_field() {
    let mut h = harness(vec![]);
    assert!(matches!(
        h.form.on_submit().await,
        SubmitOutcome::Invalid(_)
    ));

    assert!(h.form.is_touched("email"));
    assert!(h.form.is_touched("password"));
    assert_eq!(
        h.form.field_error("email").as_deref(),
        Some("Email is required")
    );
    assert_eq!(
        h.form.field_error("password").as_deref(),
        Some("Password is required")
    );
    assert_eq!(h.form.field_status("email"), FieldStatus::Error);
}

#[tokio::test]
async fn test_blank_password_blocks_submit() {
    let mut h = harness(vec![]);
    fill(&mut h.form, "a@b.c", "        ");

    let outcome = h.form.on_submit().await;

    let SubmitOutcome::Invalid(validation) = &outcome else {
        panic!("expected invalid outcome, got {outcome:?}");
    };
    assert_eq!(validation.error("password"), Some("Password is required"));
    assert_eq!(validation.status("password"), FieldStatus::Error);
    assert!(h.auth.calls().is_empty());

    // The inline feedback agrees with the submit result.
    assert_eq!(
        h.form.field_error("password").as_deref(),
        Some("Password is required")
    );
    assert_eq!(h.form.field_status("password"), FieldStatus::Error);
    assert_eq!(
        outcome.error(),
        Some(SubmitError::Invalid {
            fields: vec!["password".to_string()],
        })
    );
}

#[tokio::test]
async fn test_blank_password_feedback_on_blur() {
    let mut h = harness(vec![]);
    h.form.on_blur("password", "      ").unwrap();
    assert_eq!(
        h.form.field_error("password").as_deref(),
        Some("Password is required")
    );
    assert_eq!(h.form.field_status("password"), FieldStatus::Error);
    assert!(!h.form.is_valid());
}

#[tokio::test]
async fn test_email_trimmed_password_raw() {
    let mut h = harness(vec![Ok(())]);
    fill(&mut h.form, "  a@b.c \t", " secret ");

    assert!(h.form.on_submit().await.is_logged_in());
    assert_eq!(
        h.auth.calls(),
        vec![("a@b.c".to_string(), " secret ".to_string())]
    );
}

#[tokio::test]
async fn test_values_stored_verbatim() {
    let mut h = harness(vec![]);
    h.form.on_change("email", "  a@b.c  ").unwrap();
    assert_eq!(h.form.value("email"), "  a@b.c  ");
}

#[tokio::test]
async fn test_failure_classification() {
    let messages = Messages::default();
    let cases = [
        (
            AuthError::status(401),
            SubmitError::AuthenticationRejected,
            messages.invalid_credentials.clone(),
        ),
        (
            AuthError::status(429),
            SubmitError::RateLimited,
            messages.rate_limited.clone(),
        ),
        (
            AuthError::status(403),
            SubmitError::AccountLocked,
            messages.account_locked.clone(),
        ),
        (
            AuthError::message("Service unavailable"),
            SubmitError::Generic {
                message: Some("Service unavailable".to_string()),
            },
            "Service unavailable".to_string(),
        ),
        (
            AuthError::status(500),
            SubmitError::Generic { message: None },
            messages.generic_failure.clone(),
        ),
    ];

    for (auth_error, expected, text) in cases {
        let mut h = harness(vec![Err(auth_error)]);
        fill(&mut h.form, "a@b.c", "secret");

        let outcome = h.form.on_submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed(expected));
        assert_eq!(h.form.general_error().as_deref(), Some(text.as_str()));
        assert_eq!(h.notifier.notices(), vec![Notice::Error(text)]);
        // Failed attempts keep the values for a retry.
        assert_eq!(h.form.value("email"), "a@b.c");
        assert_eq!(h.form.submit_attempts(), 1);
    }
}

#[tokio::test]
async fn test_retry_after_failure() {
    let mut h = harness(vec![Err(AuthError::status(401)), Ok(())]);
    fill(&mut h.form, "a@b.c", "secret");

    assert!(matches!(h.form.on_submit().await, SubmitOutcome::Failed(_)));
    h.form.on_change("password", "secret2").unwrap();
    assert!(h.form.on_submit().await.is_logged_in());

    assert_eq!(h.auth.calls().len(), 2);
    assert_eq!(h.form.general_error(), None);
    assert_eq!(h.form.submit_attempts(), 0);
}

// =============================================================================
// General error auto-clear
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_general_error_clears_after_delay() {
    let mut h = harness(vec![Err(AuthError::status(401))]);
    fill(&mut h.form, "a@b.c", "secret");
    h.form.on_submit().await;

    let expected = Messages::default().invalid_credentials;
    tokio::time::sleep(Duration::from_millis(4999)).await;
    assert_eq!(h.form.general_error(), Some(expected));

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(h.form.general_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_typing_does_not_clear_general_error() {
    let mut h = harness(vec![Err(AuthError::status(429))]);
    fill(&mut h.form, "a@b.c", "secret");
    h.form.on_submit().await;

    tokio::time::sleep(Duration::from_secs(2)).await;
    h.form.on_change("password", "another").unwrap();
    assert!(h.form.general_error().is_some());

    tokio::time::sleep(Duration::from_millis(3001)).await;
    assert_eq!(h.form.general_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_new_failure_restarts_delay() {
    let responses = vec![Err(AuthError::status(401)), Err(AuthError::status(403))];
    let mut h = harness(responses);
    fill(&mut h.form, "a@b.c", "secret");
    h.form.on_submit().await;

    tokio::time::sleep(Duration::from_secs(3)).await;
    h.form.on_submit().await;

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let account_locked = Messages::default().account_locked;
    assert_eq!(h.form.general_error(), Some(account_locked));

    tokio::time::sleep(Duration::from_millis(2501)).await;
    assert_eq!(h.form.general_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_validation_error_replaces_pending_clear() {
    let mut h = harness(vec![Err(AuthError::status(401))]);
    fill(&mut h.form, "a@b.c", "secret");
    h.form.on_submit().await;

    h.form.on_change("email", "").unwrap();
    assert!(matches!(
        h.form.on_submit().await,
        SubmitOutcome::Invalid(_)
    ));

    tokio::time::sleep(Duration::from_secs(10)).await;
    let fix_errors = Messages::default().fix_errors;
    assert_eq!(h.form.general_error(), Some(fix_errors));
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_clear() {
    let mut h = harness(vec![Err(AuthError::status(401))]);
    fill(&mut h.form, "a@b.c", "secret");
    h.form.on_submit().await;

    h.form.reset();
    assert_eq!(h.form.general_error(), None);
    assert_eq!(h.form.submit_attempts(), 0);
    assert_eq!(h.form.value("email"), "");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(h.form.general_error(), None);
}

#[tokio::test(start_paused = true)]
async fn test_custom_clear_delay() {
    let auth = FakeAuth::responding(vec![Err(AuthError::status(401))]);
    let config = LoginFormConfig::new().error_clear_delay(Duration::from_secs(1));
    let mut form = LoginForm::builder()
        .shared_authenticator(auth)
        .config(config)
        .build()
        .unwrap();
    fill(&mut form, "a@b.c", "secret");
    form.on_submit().await;

    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(form.general_error(), None);
}

#[test]
fn test_failure_outside_tokio_runtime() {
    let mut h = harness(vec![Err(AuthError::status(401))]);
    fill(&mut h.form, "a@b.c", "secret");

    let outcome = futures::executor::block_on(h.form.on_submit());

    assert_eq!(
        outcome,
        SubmitOutcome::Failed(SubmitError::AuthenticationRejected)
    );
    let expected = Messages::default().invalid_credentials;
    assert_eq!(h.form.general_error(), Some(expected));

    h.form.reset();
    assert_eq!(h.form.general_error(), None);
}

// =============================================================================
// Field feedback
// =============================================================================

#[tokio::test]
async fn test_feedback_deferred_until_blur() {
    let mut h = harness(vec![]);

    h.form.on_change("email", "bad").unwrap();
    assert_eq!(h.form.field_error("email"), None);
    assert_eq!(h.form.field_status("email"), FieldStatus::None);

    h.form.on_blur("email", "bad").unwrap();
    assert_eq!(
        h.form.field_error("email").as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(h.form.field_status("email"), FieldStatus::Error);

    // Touched fields give live feedback.
    h.form.on_change("email", "a@b.c").unwrap();
    assert_eq!(h.form.field_error("email"), None);
    assert_eq!(h.form.field_status("email"), FieldStatus::Success);

    // The other field is still untouched.
    h.form.on_change("password", "1").unwrap();
    assert_eq!(h.form.field_error("password"), None);
}

#[tokio::test]
async fn test_live_feedback_after_submit_attempt() {
    let mut h = harness(vec![]);
    h.form.on_submit().await;

    h.form.on_change("password", "123").unwrap();
    assert_eq!(
        h.form.field_error("password").as_deref(),
        Some("Password must be at least 6 characters long")
    );
    h.form.on_change("password", "123456").unwrap();
    assert_eq!(h.form.field_status("password"), FieldStatus::Success);
}

#[tokio::test]
async fn test_blur_is_idempotent() {
    let mut h = harness(vec![]);
    h.form.on_blur("password", "abc").unwrap();
    let error = h.form.field_error("password");
    let status = h.form.field_status("password");

    h.form.on_blur("password", "abc").unwrap();
    assert_eq!(h.form.field_error("password"), error);
    assert_eq!(h.form.field_status("password"), status);
    assert_eq!(status, FieldStatus::Error);
}

#[tokio::test]
async fn test_optional_field_empty_status_none() {
    let otp = FieldDefinition::new("otp")
        .trimmed()
        .min_length(6, "Code must be 6 digits");
    let schema = FormSchema::login().with_field(otp).unwrap();
    let mut form = LoginForm::builder()
        .shared_authenticator(FakeAuth::responding(vec![]))
        .schema(schema)
        .build()
        .unwrap();

    form.on_blur("otp", "  ").unwrap();
    assert_eq!(form.field_status("otp"), FieldStatus::None);
    assert_eq!(form.field_error("otp"), None);

    form.on_blur("otp", "123").unwrap();
    assert_eq!(form.field_status("otp"), FieldStatus::Error);
}

#[tokio::test]
async fn test_unknown_field_rejected() {
    let mut h = harness(vec![]);
    assert_eq!(
        h.form.on_change("username", "x"),
        Err(FormError::unknown_field("username"))
    );
    assert_eq!(
        h.form.on_blur("username", "x"),
        Err(FormError::unknown_field("username"))
    );
    assert!(h.form.validate_field("username", "x").is_err());
    assert_eq!(h.form.field_status("username"), FieldStatus::None);
}

#[tokio::test]
async fn test_validate_field_ignores_touched_state() {
    let h = harness(vec![]);
    let result = h.form.validate_field("email", "").unwrap();
    assert_eq!(result.message(), Some("Email is required"));
    let result = h.form.validate_field("password", "").unwrap();
    assert_eq!(result.message(), Some("Password is required"));
}

// =============================================================================
// Host-facing operations
// =============================================================================

#[tokio::test]
async fn test_go_to_register() {
    let h = harness(vec![]);
    h.form.go_to_register();
    assert_eq!(
        *h.navigator.routes.lock().unwrap(),
        vec!["/register".to_string()]
    );
}

#[tokio::test]
async fn test_password_visibility() {
    let mut h = harness(vec![]);
    assert!(!h.form.password_visible());
    assert!(h.form.toggle_password_visibility());
    assert!(h.form.password_visible());
    h.form.reset();
    assert!(!h.form.password_visible());
}

#[tokio::test]
async fn test_loading_passthrough() {
    let h = harness(vec![]);
    assert!(h.form.can_submit());
    h.auth.loading.store(true, Ordering::SeqCst);
    assert!(h.form.is_loading());
    assert!(!h.form.can_submit());
}

#[test]
fn test_build_requires_credential_fields() {
    let schema = FormSchema::new()
        .with_field(FieldDefinition::new("username").required("Required"))
        .unwrap();
    let result = LoginForm::builder()
        .shared_authenticator(FakeAuth::responding(vec![]))
        .schema(schema)
        .build();
    assert!(matches!(
        result,
        Err(ConfigError::MissingCredentialField(field)) if field == "email"
    ));
}

#[tokio::test]
async fn test_custom_credential_fields() {
    let json = r#"{
        "identifier_field": "username",
        "schema": { "fields": [
            { "name": "username", "trim": true, "rules": [
                { "kind": "required", "message": "Required" }
            ] },
            { "name": "password", "rules": [
                { "kind": "required", "message": "Required" }
            ] }
        ] }
    }"#;
    let config = LoginFormConfig::from_json(json).unwrap();
    let auth = FakeAuth::responding(vec![Ok(())]);
    let mut form = LoginForm::builder()
        .shared_authenticator(auth.clone())
        .config(config)
        .build()
        .unwrap();

    form.on_change("username", " jdoe ").unwrap();
    form.on_change("password", "pw").unwrap();
    assert!(form.on_submit().await.is_logged_in());
    assert_eq!(auth.calls(), vec![("jdoe".to_string(), "pw".to_string())]);
}
