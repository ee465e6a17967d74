//! Cross-entity consistency audit.
//!
//! Inspects clients, workers, tasks, and business rules together and
//! reports every problem found. Detects:
//! - Missing required fields and duplicate IDs
//! - Out-of-range values
//! - Dangling task and group references
//! - Required skills no worker offers
//! - Circular co-run groups
//! - Phase preferences outside a phase window
//! - Phases where demand exceeds slot supply
//! - Tasks whose concurrency limit exceeds qualified workers
//!
//! Each check is a pure function over a [`Snapshot`]; the [`Validator`]
//! runs them in a fixed order and concatenates the findings. A run never
//! aborts early and never fails: bad data yields findings, not `Err`.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3 (DFS)

mod concurrency;
mod corun;
mod engine;
mod fields;
mod phases;
mod references;
mod report;
mod skills;

pub use concurrency::{check_concurrency_feasibility, qualified_worker_count};
pub use corun::check_co_run_cycles;
pub use engine::{validate_all, Snapshot, Validator};
pub use fields::{check_duplicate_ids, check_ranges, check_required_fields};
pub use phases::{check_phase_capacity, check_phase_conflicts, PhaseLoad};
pub use references::{check_rule_references, check_task_references};
pub use report::{EntityCounts, ValidationReport};
pub use skills::check_skill_coverage;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single audit finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Finding category.
    #[serde(rename = "type")]
    pub kind: ErrorType,
    /// Whether the finding blocks allocation.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Kind of entity the finding is attributed to.
    pub affected_entity: EntityKind,
    /// ID of the affected entity, or a positional placeholder.
    pub entity_id: String,
}

/// Categories of audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    /// Identifier or name field is empty.
    MissingRequiredColumns,
    /// An identifier repeats within one entity kind.
    #[serde(rename = "DuplicateID")]
    DuplicateId,
    /// A numeric or set field is outside its domain.
    OutOfRangeValue,
    /// A referenced task or group does not exist.
    UnknownReference,
    /// A required skill is offered by no worker.
    SkillCoverage,
    /// A co-run group forms a cycle.
    CircularCoRunGroup,
    /// Preferred phases fall outside a phase window.
    ConflictingPhaseWindow,
    /// Phase demand exceeds slot supply.
    PhaseSlotSaturation,
    /// Concurrency limit exceeds qualified, available workers.
    MaxConcurrencyFeasibility,
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Data-correctness violation; blocks allocation.
    Error,
    /// Heuristic capacity or feasibility concern.
    Warning,
}

/// Entity kinds findings are attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Worker,
    Task,
    Rule,
    Phase,
}

impl EntityKind {
    /// Lowercase tag, also used for positional placeholders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Worker => "worker",
            Self::Task => "task",
            Self::Rule => "rule",
            Self::Phase => "phase",
        }
    }

    /// Placeholder ID for a row whose identifier is missing.
    pub fn placeholder(&self, index: usize) -> String {
        format!("{}-{}", self.as_str(), index)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

impl ValidationError {
    /// Creates a finding.
    pub fn new(
        kind: ErrorType,
        severity: Severity,
        affected_entity: EntityKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            affected_entity,
            entity_id: entity_id.into(),
        }
    }

    /// Creates an `error` finding.
    pub fn error(
        kind: ErrorType,
        affected_entity: EntityKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Error, affected_entity, entity_id, message)
    }

    /// Creates a `warning` finding.
    pub fn warning(
        kind: ErrorType,
        affected_entity: EntityKind,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(kind, Severity::Warning, affected_entity, entity_id, message)
    }

    /// Whether this finding blocks allocation.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Returns the trimmed ID, or the positional placeholder when it is blank.
pub(crate) fn id_or_placeholder(id: &str, kind: EntityKind, index: usize) -> String {
    let id = id.trim();
    if id.is_empty() {
        kind.placeholder(index)
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_wire_names() {
        let e = ValidationError::error(
            ErrorType::DuplicateId,
            EntityKind::Client,
            "C1",
            "Duplicate client ID: C1",
        );
        let v = serde_json::to_value(&e).unwrap();

        assert_eq!(v["type"], "DuplicateID");
        assert_eq!(v["severity"], "error");
        assert_eq!(v["affectedEntity"], "client");
        assert_eq!(v["entityId"], "C1");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(EntityKind::Worker.placeholder(3), "worker-3");
        assert_eq!(id_or_placeholder("  ", EntityKind::Task, 0), "task-0");
        assert_eq!(id_or_placeholder(" T1 ", EntityKind::Task, 0), "T1");
    }

    #[test]
    fn test_severity_helpers() {
        let w = ValidationError::warning(
            ErrorType::PhaseSlotSaturation,
            EntityKind::Phase,
            "1",
            "saturated",
        );
        assert!(!w.is_error());
        assert_eq!(w.severity.to_string(), "warning");
    }
}
