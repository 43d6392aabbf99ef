use std::collections::BTreeMap;

use serde::Serialize;

/// Result of validating one value against one field's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValidation {
    /// Every rule passed.
    #[default]
    Valid,
    /// A rule failed; carries that rule's message.
    Invalid(String),
}

impl FieldValidation {
    /// Check if the value passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Get the failure message (if any).
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }

    /// Consume the result, yielding the failure message (if any).
    pub fn into_message(self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid(message) => Some(message),
        }
    }
}

/// Visual feedback state of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    /// No feedback: the field is empty and valid by absence, or not yet shown.
    #[default]
    None,
    /// The current value fails a rule.
    Error,
    /// The current value is non-empty and passes every rule.
    Success,
}

impl FieldStatus {
    /// Derive the status from a candidate value and its validation result.
    pub fn derive(candidate: &str, validation: &FieldValidation) -> Self {
        if !validation.is_valid() {
            Self::Error
        } else if candidate.is_empty() {
            Self::None
        } else {
            Self::Success
        }
    }
}

/// Result of validating every field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    /// First failing message per invalid field.
    pub errors: BTreeMap<String, String>,
    /// Status of every defined field.
    pub statuses: BTreeMap<String, FieldStatus>,
    /// No field failed and every required field is non-blank.
    pub is_valid: bool,
}

impl FormValidation {
    /// Get the error message for a field (if any).
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Get the status of a field; undefined fields report [`FieldStatus::None`].
    pub fn status(&self, field: &str) -> FieldStatus {
        self.statuses.get(field).copied().unwrap_or_default()
    }

    /// Names of the fields that failed validation.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.errors.keys().cloned().collect()
    }
}
