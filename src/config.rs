//! Audit configuration.
//!
//! The defaults reproduce the standard rule set: priorities in 1..=5,
//! durations of at least one phase, and uncovered skills reported as
//! errors. Overrides are read from JSON.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::validation::Severity;

/// Tunable parameters of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationConfig {
    /// Severity for required skills that no worker offers.
    pub skill_coverage_severity: Severity,
    /// Lowest accepted client priority (inclusive).
    pub min_priority: i64,
    /// Highest accepted client priority (inclusive).
    pub max_priority: i64,
    /// Shortest accepted task duration, in phases.
    pub min_duration: i64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            skill_coverage_severity: Severity::Error,
            min_priority: 1,
            max_priority: 5,
            min_duration: 1,
        }
    }
}

impl ValidationConfig {
    /// Parses and checks a JSON configuration. Missing keys keep defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the skill coverage severity.
    pub fn with_skill_coverage_severity(mut self, severity: Severity) -> Self {
        self.skill_coverage_severity = severity;
        self
    }

    /// Sets the accepted priority range.
    pub fn with_priority_range(mut self, min: i64, max: i64) -> Self {
        self.min_priority = min;
        self.max_priority = max;
        self
    }

    /// Checks that the bounds are consistent.
    pub fn validate(&self) -> Result<()> {
        if self.min_priority > self.max_priority {
            return Err(Error::InvalidConfig(format!(
                "minPriority {} exceeds maxPriority {}",
                self.min_priority, self.max_priority
            )));
        }
        if self.min_duration < 1 {
            return Err(Error::InvalidConfig(format!(
                "minDuration must be at least 1, got {}",
                self.min_duration
            )));
        }
        Ok(())
    }

    /// Whether a priority level lies in the accepted range.
    pub fn priority_in_range(&self, level: i64) -> bool {
        (self.min_priority..=self.max_priority).contains(&level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let c = ValidationConfig::default();
        assert_eq!(c.skill_coverage_severity, Severity::Error);
        assert!(c.priority_in_range(1));
        assert!(c.priority_in_range(5));
        assert!(!c.priority_in_range(0));
        assert!(!c.priority_in_range(6));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let c = ValidationConfig::from_json(r#"{"skillCoverageSeverity": "warning"}"#).unwrap();
        assert_eq!(c.skill_coverage_severity, Severity::Warning);
        assert_eq!(c.max_priority, 5);
        assert_eq!(c.min_duration, 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ValidationConfig::from_json(r#"{"minPriority": 4, "maxPriority": 2}"#);
        assert!(matches!(err, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_min_duration_rejected() {
        let c = ValidationConfig {
            min_duration: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ValidationConfig::from_json("{"),
            Err(Error::Json(_))
        ));
    }
}
