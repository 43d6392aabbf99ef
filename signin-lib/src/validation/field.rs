//! Field definitions.

use regex::Regex;

use super::result::FieldValidation;
use super::rule::{Rule, RuleKind};

/// A named form field and its validation rules.
///
/// Rules are kept sorted by [`RuleKind::rank`], so they run as
/// required → pattern → min length → max length no matter the order they
/// were added in. Rules of the same kind keep their insertion order.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    name: String,
    trim: bool,
    rules: Vec<Rule>,
}

impl FieldDefinition {
    /// Create a field definition with no rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trim: false,
            rules: Vec::new(),
        }
    }

    /// Validate the trimmed value instead of the raw one.
    pub fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    /// Add a rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        let rank = rule.kind().rank();
        let at = self
            .rules
            .iter()
            .position(|r| r.kind().rank() > rank)
            .unwrap_or(self.rules.len());
        self.rules.insert(at, rule);
        self
    }

    /// Require the field to be non-empty.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(Rule::new(RuleKind::Required, msg))
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: Regex, msg: impl Into<String>) -> Self {
        self.rule(Rule::new(RuleKind::Pattern(pattern), msg))
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(Rule::new(RuleKind::MinLength(min), msg))
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(Rule::new(RuleKind::MaxLength(max), msg))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trims(&self) -> bool {
        self.trim
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns `true` if the field has a required rule.
    pub fn is_required(&self) -> bool {
        self.rules.iter().any(Rule::is_required)
    }

    /// The value the rules actually see.
    pub fn candidate<'a>(&self, value: &'a str) -> &'a str {
        if self.trim { value.trim() } else { value }
    }

    /// Run the rules against `value`, stopping at the first failure.
    ///
    /// An empty candidate on a non-required field is valid and skips the rules.
    pub fn validate(&self, value: &str) -> FieldValidation {
        let candidate = self.candidate(value);
        if candidate.is_empty() && !self.is_required() {
            return FieldValidation::Valid;
        }

        self.rules
            .iter()
            .find(|rule| !rule.check(candidate))
            .map(|rule| FieldValidation::Invalid(rule.message().to_string()))
            .unwrap_or(FieldValidation::Valid)
    }

    /// Run the rules as part of a whole-form check.
    ///
    /// A required field whose value is blank after trimming fails with the
    /// required message, even if the field does not trim its candidate.
    /// Otherwise this is the same as [`validate`](Self::validate).
    pub fn validate_in_form(&self, value: &str) -> FieldValidation {
        match self.rules.iter().find(|rule| rule.is_required()) {
            Some(rule) if value.trim().is_empty() => {
                FieldValidation::Invalid(rule.message().to_string())
            }
            _ => self.validate(value),
        }
    }
}
