//! Errors for the fallible operations around the audit.
//!
//! The audit itself is total and reports problems as
//! [`ValidationError`](crate::validation::ValidationError) values. The
//! types here cover decoding snapshots, rules, and configuration.

/// Result alias for decoding and rule-parameter checks.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding or checking inputs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule is missing or has invalid parameters for its kind.
    #[error("invalid rule '{rule_id}': {reason}")]
    InvalidRule { rule_id: String, reason: String },

    /// A pattern-match rule carries a regex that does not compile.
    #[error("invalid pattern in rule '{rule_id}': {source}")]
    InvalidPattern {
        rule_id: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration values are inconsistent.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid_rule(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRule {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }
}
