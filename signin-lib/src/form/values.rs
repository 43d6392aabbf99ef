//! Raw input values and touched flags.

use std::collections::{BTreeMap, BTreeSet};

/// Current raw value of every field that has received input.
///
/// Values are stored verbatim; trimming happens only when validating or
/// submitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field's value; fields without input read as empty.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

/// Fields that have been blurred or included in a submit attempt.
///
/// Touching is one-way; only [`Touched::clear`] (a full form reset) undoes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Touched {
    fields: BTreeSet<String>,
}

impl Touched {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch(&mut self, field: impl Into<String>) {
        self.fields.insert(field.into());
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}
