//! Form handler error types

/// Errors returned by [`LoginForm`](crate::form::LoginForm) event handlers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// The handler was given a name that is not defined in the schema.
    #[error("Field '{field}' is not defined in the form schema")]
    UnknownField { field: String },
}

impl FormError {
    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }
}
