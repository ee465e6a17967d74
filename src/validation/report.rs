//! Summary views over a validation run.
//!
//! Consumers usually want the same few numbers: is the dataset usable,
//! how many errors and warnings, and where they sit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EntityKind, ErrorType, Severity, ValidationError};

/// Error and warning counts for one entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub errors: usize,
    pub warnings: usize,
}

/// The complete result of one validation run.
///
/// Supersedes any earlier report; findings keep their run order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Wraps the findings of a run.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// All findings, in run order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the report, returning the findings.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// `true` when no finding has `error` severity. Warnings are advisory.
    pub fn is_valid(&self) -> bool {
        self.errors.iter().all(|e| e.severity != Severity::Error)
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the run produced no findings.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of `error` findings.
    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    /// Number of `warning` findings.
    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.errors.iter().filter(|e| e.severity == severity).count()
    }

    /// Findings of one type, in run order.
    pub fn of_type(&self, kind: ErrorType) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Per-entity breakdown. Only kinds with findings appear.
    pub fn by_entity(&self) -> BTreeMap<EntityKind, EntityCounts> {
        let mut counts: BTreeMap<EntityKind, EntityCounts> = BTreeMap::new();
        for e in &self.errors {
            let entry = counts.entry(e.affected_entity).or_default();
            match e.severity {
                Severity::Error => entry.errors += 1,
                Severity::Warning => entry.warnings += 1,
            }
        }
        counts
    }
}

impl From<Vec<ValidationError>> for ValidationReport {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::new(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationReport {
        ValidationReport::new(vec![
            ValidationError::error(ErrorType::DuplicateId, EntityKind::Client, "C1", "dup"),
            ValidationError::warning(ErrorType::OutOfRangeValue, EntityKind::Worker, "W1", "skills"),
            ValidationError::error(ErrorType::SkillCoverage, EntityKind::Task, "T1", "rust"),
            ValidationError::warning(
                ErrorType::MaxConcurrencyFeasibility,
                EntityKind::Task,
                "T1",
                "3 > 1",
            ),
            ValidationError::warning(ErrorType::PhaseSlotSaturation, EntityKind::Phase, "1", "6 > 1"),
        ])
    }

    #[test]
    fn test_counts() {
        let r = sample();
        assert_eq!(r.len(), 5);
        assert_eq!(r.error_count(), 2);
        assert_eq!(r.warning_count(), 3);
        assert!(!r.is_valid());
    }

    #[test]
    fn test_warnings_only_is_valid() {
        let r: ValidationReport = sample()
            .into_errors()
            .into_iter()
            .filter(|e| !e.is_error())
            .collect::<Vec<_>>()
            .into();
        assert!(r.is_valid());
        assert!(ValidationReport::default().is_valid());
    }

    #[test]
    fn test_by_entity() {
        let counts = sample().by_entity();

        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&EntityKind::Task], EntityCounts { errors: 1, warnings: 1 });
        assert_eq!(counts[&EntityKind::Phase], EntityCounts { errors: 0, warnings: 1 });
        assert!(!counts.contains_key(&EntityKind::Rule));
    }

    #[test]
    fn test_of_type() {
        let r = sample();
        let ids: Vec<_> = r
            .of_type(ErrorType::SkillCoverage)
            .map(|e| e.entity_id.as_str())
            .collect();
        assert_eq!(ids, vec!["T1"]);
    }

    #[test]
    fn test_report_serializes_as_error_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["errors"][0]["type"], "DuplicateID");
        assert_eq!(json["errors"][4]["affectedEntity"], "phase");
    }
}
