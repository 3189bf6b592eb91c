use thiserror::Error;

use crate::rule::RuleKind;

/// Reasons a single rule is rejected
///
/// Only raised while building a dispatcher. Applying a rule never fails.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A required field is empty or cannot be used as an HTTP header name or value
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// The `header` field is not a valid regular expression
    #[error("invalid header pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern as written in the configuration
        pattern: String,
        /// Underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// The rule kind needs a `value` and none was given
    #[error("{0} rule requires a non-empty value")]
    MissingValue(RuleKind),

    /// No handler is registered for the rule type
    #[error("unknown rule type `{0}`")]
    UnknownRuleType(String),
}

/// Rule error tagged with the position of the offending rule
#[derive(Debug, Error)]
#[error("rule #{index} ({name:?}): {error}")]
pub struct BuildError {
    /// Zero-based position in the configured rule list
    pub index: usize,
    /// Logical name of the rule, empty when unnamed
    pub name: String,
    /// What was wrong with it
    #[source]
    pub error: RuleError,
}
