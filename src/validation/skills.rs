//! Skill coverage.
//!
//! A required skill that no worker offers makes its task unassignable
//! whatever the schedule looks like.

use std::collections::HashSet;

use super::{id_or_placeholder, EntityKind, ErrorType, Severity, ValidationError};
use crate::models::{Task, Worker};

/// Flags each required skill missing from the union of worker skills.
///
/// One finding per missing skill per task; the same skill missing from
/// two tasks yields two findings.
pub fn check_skill_coverage(
    workers: &[Worker],
    tasks: &[Task],
    severity: Severity,
) -> Vec<ValidationError> {
    let offered: HashSet<&str> = workers.iter().flat_map(Worker::effective_skills).collect();

    let mut errors = Vec::new();
    for (i, task) in tasks.iter().enumerate() {
        for skill in &task.required_skills {
            let skill = skill.trim();
            if skill.is_empty() || offered.contains(skill) {
                continue;
            }
            let id = id_or_placeholder(&task.id, EntityKind::Task, i);
            errors.push(ValidationError::new(
                ErrorType::SkillCoverage,
                severity,
                EntityKind::Task,
                id.clone(),
                format!("Task '{id}' requires skill '{skill}' that no worker offers"),
            ));
        }
    }

    errors
}
