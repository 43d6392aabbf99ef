//! Form schemas: the ordered set of fields a form validates.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::field::FieldDefinition;
use super::result::{FieldStatus, FieldValidation, FormValidation};
use super::rule::RuleSpec;
use crate::error::{FormError, SchemaError};
use crate::form::FormValues;

/// Name of the built-in email field.
pub const EMAIL_FIELD: &str = "email";

/// Name of the built-in password field.
pub const PASSWORD_FIELD: &str = "password";

/// Shape check for email addresses: something, `@`, something, `.`, something.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Ordered, duplicate-free list of field definitions.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<FieldDefinition>,
}

impl FormSchema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// The built-in sign-in schema: email and password.
    pub fn login() -> Self {
        Self {
            fields: vec![
                FieldDefinition::new(EMAIL_FIELD)
                    .trimmed()
                    .required("Email is required")
                    .pattern(EMAIL_REGEX.clone(), "Please enter a valid email address")
                    .max_length(254, "Email must not exceed 254 characters"),
                FieldDefinition::new(PASSWORD_FIELD)
                    .required("Password is required")
                    .min_length(6, "Password must be at least 6 characters long")
                    .max_length(128, "Password must not exceed 128 characters"),
            ],
        }
    }

    /// Append a field, rejecting empty or duplicate names.
    pub fn with_field(mut self, field: FieldDefinition) -> Result<Self, SchemaError> {
        if field.name().is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        if self.get(field.name()).is_some() {
            return Err(SchemaError::DuplicateField {
                field: field.name().to_string(),
            });
        }
        self.fields.push(field);
        Ok(self)
    }

    /// Parse a schema from a JSON [`SchemaDocument`].
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let document: SchemaDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    /// Look up a field definition by name.
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Iterate over the fields in definition order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate one value against the named field's rules.
    pub fn validate_field(
        &self,
        name: &str,
        value: &str,
    ) -> Result<FieldValidation, FormError> {
        self.get(name)
            .map(|field| field.validate(value))
            .ok_or_else(|| FormError::unknown_field(name))
    }

    /// Validate every field against its own rules.
    ///
    /// Missing values count as empty. A required field that is blank after
    /// trimming fails with its required message. The form is valid only if
    /// no field fails.
    pub fn validate_form(&self, values: &FormValues) -> FormValidation {
        let mut result = FormValidation::default();

        for field in &self.fields {
            let value = values.get(field.name());
            let validation = field.validate_in_form(value);
            let status = FieldStatus::derive(field.candidate(value), &validation);

            if let Some(message) = validation.into_message() {
                result.errors.insert(field.name().to_string(), message);
            }
            result.statuses.insert(field.name().to_string(), status);
        }
        result.is_valid = result.errors.is_empty();

        log::debug!(
            "Form validated: valid={}, errors={:?}",
            result.is_valid,
            result.errors.keys().collect::<Vec<_>>()
        );
        result
    }

    /// Convert back into a serializable document.
    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            fields: self
                .fields
                .iter()
                .map(|field| FieldSpec {
                    name: field.name().to_string(),
                    trim: field.trims(),
                    rules: field.rules().iter().map(RuleSpec::from).collect(),
                })
                .collect(),
        }
    }
}

/// Serializable schema, as stored in config files.
///
/// ```json
/// {
///   "fields": [
///     { "name": "email", "trim": true, "rules": [
///       { "kind": "required", "message": "Email is required" },
///       {
///         "kind": "pattern",
///         "pattern": "^\\S+@\\S+\\.\\S+$",
///         "message": "Invalid email"
///       }
///     ] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub fields: Vec<FieldSpec>,
}

/// Serializable field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(default)]
    pub trim: bool,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl TryFrom<SchemaDocument> for FormSchema {
    type Error = SchemaError;

    fn try_from(document: SchemaDocument) -> Result<Self, Self::Error> {
        let mut schema = FormSchema::new();
        for spec in document.fields {
            let mut field = FieldDefinition::new(spec.name.as_str());
            if spec.trim {
                field = field.trimmed();
            }
            for rule in &spec.rules {
                let rule = rule.compile().map_err(|source| SchemaError::InvalidPattern {
                    field: spec.name.clone(),
                    source,
                })?;
                field = field.rule(rule);
            }
            schema = schema.with_field(field)?;
        }
        Ok(schema)
    }
}
