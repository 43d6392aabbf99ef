//! Schema construction error types

/// Errors that can occur while building a [`FormSchema`](crate::validation::FormSchema).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Two field definitions share a name.
    #[error("Field '{field}' is defined more than once")]
    DuplicateField { field: String },

    /// A field definition has an empty name.
    #[error("Field names must not be empty")]
    EmptyFieldName,

    /// A pattern rule does not compile.
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// The schema document is not valid JSON or has the wrong shape.
    #[error("Schema parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
