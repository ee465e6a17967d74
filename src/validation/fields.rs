//! Field-level checks: presence, uniqueness, and value ranges.
//!
//! Each function makes one pass per entity kind in the order clients,
//! workers, tasks, and reports findings in input order.

use std::collections::HashSet;

use super::{id_or_placeholder, EntityKind, ErrorType, ValidationError};
use crate::config::ValidationConfig;
use crate::models::{Client, Task, Worker};

/// Flags rows whose identifier or name is blank.
///
/// One finding per row, naming every missing column. Rows without an
/// identifier are addressed as `"{kind}-{index}"`.
pub fn check_required_fields(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    missing_in(
        EntityKind::Client,
        ("ClientID", "ClientName"),
        clients.iter().map(|c| (c.id.as_str(), c.name.as_str())),
        &mut errors,
    );
    missing_in(
        EntityKind::Worker,
        ("WorkerID", "WorkerName"),
        workers.iter().map(|w| (w.id.as_str(), w.name.as_str())),
        &mut errors,
    );
    missing_in(
        EntityKind::Task,
        ("TaskID", "TaskName"),
        tasks.iter().map(|t| (t.id.as_str(), t.name.as_str())),
        &mut errors,
    );
    errors
}

fn missing_in<'a>(
    kind: EntityKind,
    (id_col, name_col): (&str, &str),
    rows: impl Iterator<Item = (&'a str, &'a str)>,
    errors: &mut Vec<ValidationError>,
) {
    for (index, (id, name)) in rows.enumerate() {
        let mut missing = Vec::new();
        if id.trim().is_empty() {
            missing.push(id_col);
        }
        if name.trim().is_empty() {
            missing.push(name_col);
        }
        if missing.is_empty() {
            continue;
        }

        let entity_id = id_or_placeholder(id, kind, index);
        errors.push(ValidationError::error(
            ErrorType::MissingRequiredColumns,
            kind,
            entity_id.clone(),
            format!("{kind} '{entity_id}' is missing {}", missing.join(", ")),
        ));
    }
}

/// Flags every repeat of an identifier after its first occurrence.
///
/// The first occurrence is never flagged. Blank IDs are left to
/// [`check_required_fields`].
pub fn check_duplicate_ids(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    duplicates_in(EntityKind::Client, clients.iter().map(|c| c.id.as_str()), &mut errors);
    duplicates_in(EntityKind::Worker, workers.iter().map(|w| w.id.as_str()), &mut errors);
    duplicates_in(EntityKind::Task, tasks.iter().map(|t| t.id.as_str()), &mut errors);
    errors
}

fn duplicates_in<'a>(
    kind: EntityKind,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids.map(str::trim).filter(|id| !id.is_empty()) {
        if !seen.insert(id) {
            errors.push(ValidationError::error(
                ErrorType::DuplicateId,
                kind,
                id,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
}

/// Checks numeric domains and worker skill sets.
///
/// - Client priority within the configured range (missing counts as out of range)
/// - Worker skills non-empty (warning)
/// - Worker max load per phase at least 1
/// - Task duration at least the configured minimum (missing counts as out of range)
/// - Task max concurrency at least 1
pub fn check_ranges(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    config: &ValidationConfig,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, client) in clients.iter().enumerate() {
        let in_range = client
            .priority_level
            .is_some_and(|p| config.priority_in_range(p));
        if !in_range {
            let id = id_or_placeholder(&client.id, EntityKind::Client, i);
            errors.push(ValidationError::error(
                ErrorType::OutOfRangeValue,
                EntityKind::Client,
                id.clone(),
                format!(
                    "Client '{id}' has PriorityLevel {} outside {}..={}",
                    describe(client.priority_level),
                    config.min_priority,
                    config.max_priority
                ),
            ));
        }
    }

    for (i, worker) in workers.iter().enumerate() {
        let id = id_or_placeholder(&worker.id, EntityKind::Worker, i);
        if worker.effective_skills().next().is_none() {
            errors.push(ValidationError::warning(
                ErrorType::OutOfRangeValue,
                EntityKind::Worker,
                id.clone(),
                format!("Worker '{id}' lists no skills"),
            ));
        }
        if worker.max_load_per_phase < 1 {
            errors.push(ValidationError::error(
                ErrorType::OutOfRangeValue,
                EntityKind::Worker,
                id.clone(),
                format!(
                    "Worker '{id}' has MaxLoadPerPhase {}, expected at least 1",
                    worker.max_load_per_phase
                ),
            ));
        }
    }

    for (i, task) in tasks.iter().enumerate() {
        let id = id_or_placeholder(&task.id, EntityKind::Task, i);
        if !task.duration.is_some_and(|d| d >= config.min_duration) {
            errors.push(ValidationError::error(
                ErrorType::OutOfRangeValue,
                EntityKind::Task,
                id.clone(),
                format!(
                    "Task '{id}' has Duration {}, expected at least {}",
                    describe(task.duration),
                    config.min_duration
                ),
            ));
        }
        if task.max_concurrent < 1 {
            errors.push(ValidationError::error(
                ErrorType::OutOfRangeValue,
                EntityKind::Task,
                id.clone(),
                format!(
                    "Task '{id}' has MaxConcurrent {}, expected at least 1",
                    task.max_concurrent
                ),
            ));
        }
    }

    errors
}

fn describe(value: Option<i64>) -> String {
    value.map_or_else(|| "(missing)".to_string(), |v| v.to_string())
}
