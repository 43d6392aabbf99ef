//! Validation rules.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The predicate part of a [`Rule`].
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// The candidate must not be empty.
    Required,
    /// The candidate must match the pattern.
    Pattern(Regex),
    /// The candidate must have at least this many characters.
    MinLength(usize),
    /// The candidate must have at most this many characters.
    MaxLength(usize),
}

impl RuleKind {
    /// Position of this kind in the fixed evaluation order.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Required => 0,
            Self::Pattern(_) => 1,
            Self::MinLength(_) => 2,
            Self::MaxLength(_) => 3,
        }
    }

    fn check(&self, value: &str) -> bool {
        match self {
            Self::Required => !value.is_empty(),
            Self::Pattern(re) => re.is_match(value),
            Self::MinLength(min) => value.chars().count() >= *min,
            Self::MaxLength(max) => value.chars().count() <= *max,
        }
    }
}

/// A single validation predicate with the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    message: String,
}

impl Rule {
    /// Creates a rule from a kind and failure message.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns the rule's predicate.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Returns the failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` if `value` passes this rule.
    pub fn check(&self, value: &str) -> bool {
        self.kind.check(value)
    }

    /// Returns `true` for the required rule.
    pub fn is_required(&self) -> bool {
        matches!(self.kind, RuleKind::Required)
    }
}

/// Serializable form of a [`Rule`], as it appears in schema documents.
///
/// ```json
/// { "kind": "min_length", "min": 6, "message": "Too short" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSpec {
    Required { message: String },
    Pattern { pattern: String, message: String },
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
}

impl RuleSpec {
    /// Compiles this spec into a [`Rule`].
    pub fn compile(&self) -> Result<Rule, regex::Error> {
        let rule = match self {
            Self::Required { message } => Rule::new(RuleKind::Required, message.as_str()),
            Self::Pattern { pattern, message } => {
                Rule::new(RuleKind::Pattern(Regex::new(pattern)?), message.as_str())
            }
            Self::MinLength { min, message } => {
                Rule::new(RuleKind::MinLength(*min), message.as_str())
            }
            Self::MaxLength { max, message } => {
                Rule::new(RuleKind::MaxLength(*max), message.as_str())
            }
        };
        Ok(rule)
    }
}

impl From<&Rule> for RuleSpec {
    fn from(rule: &Rule) -> Self {
        let message = rule.message.clone();
        match &rule.kind {
            RuleKind::Required => Self::Required { message },
            RuleKind::Pattern(re) => Self::Pattern {
                pattern: re.as_str().to_string(),
                message,
            },
            RuleKind::MinLength(min) => Self::MinLength { min: *min, message },
            RuleKind::MaxLength(max) => Self::MaxLength { max: *max, message },
        }
    }
}
