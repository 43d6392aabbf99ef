//! Field validation for the login form.
//!
//! Field definitions are plain data: a name, a trim flag and a list of rules.
//! Rules always run in the order required → pattern → min length → max length
//! and stop at the first failure.
//!
//! # Example
//!
//! ```ignore
//! use signin_lib::validation::{FieldDefinition, FormSchema};
//!
//! let schema = FormSchema::new()
//!     .with_field(
//!         FieldDefinition::new("username")
//!             .trimmed()
//!             .required("Username is required")
//!             .min_length(3, "Username must be at least 3 characters"),
//!     )?;
//!
//! let result = schema.validate_field("username", "ab")?;
//! assert_eq!(result.message(), Some("Username must be at least 3 characters"));
//! ```

mod field;
mod result;
mod rule;
mod schema;

pub use field::FieldDefinition;
pub use result::{FieldStatus, FieldValidation, FormValidation};
pub use rule::{Rule, RuleKind, RuleSpec};
pub use schema::{EMAIL_FIELD, EMAIL_PATTERN, FieldSpec, FormSchema, PASSWORD_FIELD, SchemaDocument};
