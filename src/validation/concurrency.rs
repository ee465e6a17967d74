//! Concurrency feasibility.
//!
//! Compares each task's concurrency limit with the number of workers that
//! could be on it at once. A worker counts when it shares at least one
//! skill with the task and has at least one slot in a preferred phase.
//! Partial overlap is enough on both sides, so the count can be too high
//! (one shared skill may not cover all requirements) as well as too low
//! (no phase-by-phase matching), and findings are warnings.

use super::{id_or_placeholder, EntityKind, ErrorType, ValidationError};
use crate::models::{Task, Worker};

/// Number of workers that are both skill-matched and slot-matched.
pub fn qualified_worker_count(task: &Task, workers: &[Worker]) -> usize {
    workers
        .iter()
        .filter(|w| w.shares_skill(&task.required_skills))
        .filter(|w| w.available_in_any(&task.preferred_phases))
        .count()
}

/// Warns about tasks whose `max_concurrent` exceeds qualified workers.
pub fn check_concurrency_feasibility(workers: &[Worker], tasks: &[Task]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (i, task) in tasks.iter().enumerate() {
        let qualified = qualified_worker_count(task, workers);
        if task.max_concurrent > qualified as i64 {
            let id = id_or_placeholder(&task.id, EntityKind::Task, i);
            errors.push(ValidationError::warning(
                ErrorType::MaxConcurrencyFeasibility,
                EntityKind::Task,
                id.clone(),
                format!(
                    "Task '{id}' allows {} concurrent workers but only {qualified} are qualified and available",
                    task.max_concurrent
                ),
            ));
        }
    }

    errors
}
