//! The login form engine.

use std::sync::Arc;

use super::{AutoClear, FormValues, GeneralError, Touched};
use crate::auth::Authenticator;
use crate::config::{ConfigError, LoginFormConfig};
use crate::error::{FormError, SubmitError};
use crate::navigation::{LogNavigator, Navigator};
use crate::notify::{LogNotifier, Notifier};
use crate::validation::{FieldStatus, FieldValidation, FormSchema, FormValidation};

/// How a call to [`LoginForm::on_submit`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; the authenticator was not called.
    Invalid(FormValidation),
    /// The authenticator accepted the credentials and the form was reset.
    LoggedIn,
    /// The authenticator rejected the credentials.
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }

    /// The failure behind this outcome, if any.
    pub fn error(&self) -> Option<SubmitError> {
        match self {
            Self::Invalid(validation) => Some(SubmitError::Invalid {
                fields: validation.invalid_fields(),
            }),
            Self::LoggedIn => None,
            Self::Failed(error) => Some(error.clone()),
        }
    }
}

/// A sign-in form: raw values, touched flags, submission gating.
///
/// Field errors and statuses are never stored. They are derived on read from
/// the current value, the field's rules and whether the field shows
/// feedback yet (touched, or any submit attempt so far).
///
/// # Example
///
/// ```ignore
/// use signin_lib::LoginForm;
/// use signin_lib::auth::StaticAuthenticator;
///
/// let mut form = LoginForm::builder()
///     .authenticator(StaticAuthenticator::new("a@b.c", "secret"))
///     .build()?;
///
/// form.on_change("email", "a@b.c")?;
/// form.on_change("password", "secret")?;
/// assert!(form.on_submit().await.is_logged_in());
/// ```
pub struct LoginForm {
    schema: FormSchema,
    config: LoginFormConfig,
    values: FormValues,
    touched: Touched,
    submit_attempts: u32,
    general_error: GeneralError,
    auto_clear: Option<AutoClear>,
    password_visible: bool,
    authenticator: Arc<dyn Authenticator>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl LoginForm {
    /// Creates a new builder for constructing a form.
    pub fn builder() -> LoginFormBuilder<Missing> {
        LoginFormBuilder::new()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate `value` against the named field's rules.
    pub fn validate_field(&self, name: &str, value: &str) -> Result<FieldValidation, FormError> {
        self.schema.validate_field(name, value)
    }

    /// Validate every field's current value.
    pub fn validate_form(&self) -> FormValidation {
        self.schema.validate_form(&self.values)
    }

    /// Returns `true` if the current values would pass a submit.
    pub fn is_valid(&self) -> bool {
        self.validate_form().is_valid
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Store a keystroke's raw value.
    ///
    /// Feedback for the field updates live only once it is touched or a
    /// submit was attempted.
    pub fn on_change(&mut self, name: &str, raw_value: &str) -> Result<(), FormError> {
        self.ensure_field(name)?;
        log::trace!("Field '{}' changed", name);
        self.values.set(name, raw_value);
        Ok(())
    }

    /// Store the value and mark the field touched.
    pub fn on_blur(&mut self, name: &str, raw_value: &str) -> Result<(), FormError> {
        self.ensure_field(name)?;
        self.values.set(name, raw_value);
        self.touched.touch(name);
        log::trace!(
            "Field '{}' blurred: status={:?}",
            name,
            self.field_status(name)
        );
        Ok(())
    }

    /// Validate and, if valid, hand the credentials to the authenticator.
    ///
    /// Collaborator failures are classified and returned as
    /// [`SubmitOutcome::Failed`]; they also set the general error, which
    /// clears itself after the configured delay. Outside a tokio runtime
    /// the general error is still set but does not clear itself.
    pub async fn on_submit(&mut self) -> SubmitOutcome {
        self.submit_attempts += 1;
        for field in self.schema.fields() {
            self.touched.touch(field.name());
        }

        let validation = self.validate_form();
        if !validation.is_valid {
            log::debug!(
                "Submit attempt {} blocked by validation: {:?}",
                self.submit_attempts,
                validation.invalid_fields()
            );
            let message = self.config.messages.fix_errors.clone();
            self.cancel_auto_clear();
            self.general_error.set(message);
            return SubmitOutcome::Invalid(validation);
        }

        self.clear_general_error();

        let email = self.values.get(&self.config.identifier_field);
        let email = email.trim().to_string();
        let password = self.values.get(&self.config.secret_field).to_string();

        log::info!("Submitting login for {}", email);
        match self.authenticator.login(&email, &password).await {
            Ok(()) => {
                log::info!("Login succeeded for {}", email);
                self.values.clear();
                self.touched.clear();
                self.submit_attempts = 0;
                let success = &self.config.messages.login_success;
                self.notifier.notify_success(success);
                SubmitOutcome::LoggedIn
            }
            Err(e) => {
                log::warn!("Login failed for {}: {}", email, e);
                let error = SubmitError::from(e);
                let message = error.user_message(&self.config.messages);
                self.notifier.notify_error(&message);
                self.show_transient_error(message);
                SubmitOutcome::Failed(error)
            }
        }
    }

    /// Ask the navigator to open account creation.
    pub fn go_to_register(&self) {
        self.navigator.navigate_to(&self.config.register_route);
    }

    /// Flip the show/hide state of the password input.
    pub fn toggle_password_visibility(&mut self) -> bool {
        self.password_visible = !self.password_visible;
        self.password_visible
    }

    /// Reset to a freshly mounted form, cancelling any pending auto-clear.
    pub fn reset(&mut self) {
        self.cancel_auto_clear();
        self.general_error.clear();
        self.values.clear();
        self.touched.clear();
        self.submit_attempts = 0;
        self.password_visible = false;
    }

    // =========================================================================
    // Derived State
    // =========================================================================

    /// The raw value of a field; empty if it never received input.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.is_touched(name)
    }

    /// The inline error to display for a field, if any.
    ///
    /// Uses the same checks as a submit, so a required field left blank
    /// shows its required message.
    pub fn field_error(&self, name: &str) -> Option<String> {
        if !self.shows_feedback(name) {
            return None;
        }
        let value = self.values.get(name);
        self.schema
            .get(name)
            .and_then(|field| field.validate_in_form(value).into_message())
    }

    /// The feedback status to display for a field.
    pub fn field_status(&self, name: &str) -> FieldStatus {
        if !self.shows_feedback(name) {
            return FieldStatus::None;
        }
        let Some(field) = self.schema.get(name) else {
            return FieldStatus::None;
        };
        let value = self.values.get(name);
        FieldStatus::derive(field.candidate(value), &field.validate_in_form(value))
    }

    /// The form-level error message, if any.
    pub fn general_error(&self) -> Option<String> {
        self.general_error.get()
    }

    /// Number of submit attempts since mount, the last success, or reset.
    pub fn submit_attempts(&self) -> u32 {
        self.submit_attempts
    }

    /// Whether the authenticator has a login in flight.
    pub fn is_loading(&self) -> bool {
        self.authenticator.is_loading()
    }

    /// Whether the host should enable the submit control.
    pub fn can_submit(&self) -> bool {
        !self.is_loading()
    }

    pub fn password_visible(&self) -> bool {
        self.password_visible
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn config(&self) -> &LoginFormConfig {
        &self.config
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn ensure_field(&self, name: &str) -> Result<(), FormError> {
        match self.schema.get(name) {
            Some(_) => Ok(()),
            None => Err(FormError::unknown_field(name)),
        }
    }

    fn shows_feedback(&self, name: &str) -> bool {
        self.touched.is_touched(name) || self.submit_attempts > 0
    }

    fn cancel_auto_clear(&mut self) {
        if let Some(timer) = self.auto_clear.take() {
            timer.cancel();
        }
    }

    fn clear_general_error(&mut self) {
        self.cancel_auto_clear();
        self.general_error.clear();
    }

    fn show_transient_error(&mut self, message: String) {
        self.cancel_auto_clear();
        let generation = self.general_error.set(message);
        self.auto_clear = AutoClear::schedule(
            self.general_error.clone(),
            generation,
            self.config.clear_delay(),
        );
    }
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("fields", &self.schema.len())
            .field("touched", &self.touched)
            .field("submit_attempts", &self.submit_attempts)
            .field("general_error", &self.general_error.get())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`LoginForm`].
///
/// The authenticator is required and enforced at compile time. Everything
/// else defaults: [`LogNotifier`], [`LogNavigator`],
/// [`LoginFormConfig::default`], and the schema from the config (or
/// [`FormSchema::login`]).
///
/// # Example
///
/// ```ignore
/// let form = LoginForm::builder()
///     .authenticator(my_auth)
///     .notifier(my_toasts)
///     .navigator(my_router)
///     .config(LoginFormConfig::load("signin.json")?)
///     .build()?;
/// ```
pub struct LoginFormBuilder<Auth> {
    authenticator: Auth,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    config: LoginFormConfig,
    schema: Option<FormSchema>,
}

impl LoginFormBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            authenticator: Missing,
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
            config: LoginFormConfig::default(),
            schema: None,
        }
    }

    /// Sets the authenticator credentials are submitted to.
    pub fn authenticator<A: Authenticator + 'static>(
        self,
        authenticator: A,
    ) -> LoginFormBuilder<Set<Arc<dyn Authenticator>>> {
        self.shared_authenticator(Arc::new(authenticator))
    }

    /// Sets an authenticator that is shared with the host.
    pub fn shared_authenticator(
        self,
        authenticator: Arc<dyn Authenticator>,
    ) -> LoginFormBuilder<Set<Arc<dyn Authenticator>>> {
        LoginFormBuilder {
            authenticator: Set(authenticator),
            notifier: self.notifier,
            navigator: self.navigator,
            config: self.config,
            schema: self.schema,
        }
    }
}

impl Default for LoginFormBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> LoginFormBuilder<A> {
    /// Sets the notifier used for success/error toasts.
    pub fn notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Sets the navigator used for the registration link.
    pub fn navigator<N: Navigator + 'static>(mut self, navigator: N) -> Self {
        self.navigator = Arc::new(navigator);
        self
    }

    pub fn config(mut self, config: LoginFormConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the field schema, overriding any schema in the config.
    pub fn schema(mut self, schema: FormSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

impl LoginFormBuilder<Set<Arc<dyn Authenticator>>> {
    /// Builds the [`LoginForm`].
    ///
    /// Fails if the config's schema is invalid or does not define the
    /// identifier and secret fields.
    pub fn build(self) -> Result<LoginForm, ConfigError> {
        let schema = match self.schema {
            Some(schema) => schema,
            None => self.config.build_schema()?,
        };

        for field in [&self.config.identifier_field, &self.config.secret_field] {
            if schema.get(field).is_none() {
                return Err(ConfigError::MissingCredentialField(field.clone()));
            }
        }

        Ok(LoginForm {
            schema,
            config: self.config,
            values: FormValues::new(),
            touched: Touched::new(),
            submit_attempts: 0,
            general_error: GeneralError::new(),
            auto_clear: None,
            password_visible: false,
            authenticator: self.authenticator.0,
            notifier: self.notifier,
            navigator: self.navigator,
        })
    }
}
