//! Reference integrity between entity collections and rules.

use std::collections::HashSet;

use super::{id_or_placeholder, EntityKind, ErrorType, ValidationError};
use crate::models::{BusinessRule, Client, RuleKind, Task, Worker};

/// Flags requested task IDs that match no task.
///
/// One finding per unmatched entry, attributed to the requesting client.
pub fn check_task_references(clients: &[Client], tasks: &[Task]) -> Vec<ValidationError> {
    let task_ids = task_id_set(tasks);
    let mut errors = Vec::new();

    for (i, client) in clients.iter().enumerate() {
        for requested in &client.requested_task_ids {
            let requested = requested.trim();
            if requested.is_empty() || task_ids.contains(requested) {
                continue;
            }
            let id = id_or_placeholder(&client.id, EntityKind::Client, i);
            errors.push(ValidationError::error(
                ErrorType::UnknownReference,
                EntityKind::Client,
                id.clone(),
                format!("Client '{id}' requests unknown task '{requested}'"),
            ));
        }
    }

    errors
}

/// Flags rules that point at tasks or groups that do not exist.
///
/// Unknown task IDs in co-run and phase-window rules are errors, one per
/// distinct ID; blank entries are ignored. Unknown
/// groups in load-limit and slot-restriction rules are warnings, since
/// groups may be populated by a later import.
pub fn check_rule_references(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    rules: &[BusinessRule],
) -> Vec<ValidationError> {
    let task_ids = task_id_set(tasks);
    let worker_groups: HashSet<&str> = workers
        .iter()
        .map(|w| w.group.trim())
        .filter(|g| !g.is_empty())
        .collect();
    let client_groups: HashSet<&str> = clients
        .iter()
        .map(|c| c.group_tag.trim())
        .filter(|g| !g.is_empty())
        .collect();

    let mut errors = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        let rule_id = id_or_placeholder(&rule.id, EntityKind::Rule, i);

        let mut seen = HashSet::new();
        for task_id in rule.referenced_tasks() {
            let task_id = task_id.trim();
            if task_id.is_empty() || !seen.insert(task_id) {
                continue;
            }
            if !task_ids.contains(task_id) {
                errors.push(ValidationError::error(
                    ErrorType::UnknownReference,
                    EntityKind::Rule,
                    rule_id.clone(),
                    format!(
                        "Rule '{rule_id}' ({}) references unknown task '{task_id}'",
                        rule.kind_name()
                    ),
                ));
            }
        }

        let unknown_group = match &rule.kind {
            RuleKind::LoadLimit { worker_group, .. }
                if !worker_groups.contains(worker_group.trim()) =>
            {
                Some(worker_group)
            }
            RuleKind::SlotRestriction { group, .. }
                if !worker_groups.contains(group.trim())
                    && !client_groups.contains(group.trim()) =>
            {
                Some(group)
            }
            _ => None,
        };
        if let Some(group) = unknown_group {
            errors.push(ValidationError::warning(
                ErrorType::UnknownReference,
                EntityKind::Rule,
                rule_id.clone(),
                format!(
                    "Rule '{rule_id}' ({}) targets unknown group '{group}'",
                    rule.kind_name()
                ),
            ));
        }
    }

    errors
}

fn task_id_set(tasks: &[Task]) -> HashSet<&str> {
    tasks
        .iter()
        .map(|t| t.id.trim())
        .filter(|id| !id.is_empty())
        .collect()
}
