//! Co-run cycle detection.
//!
//! Each co-run rule declares a group of tasks that must run together.
//! Within a group every task neighbors every other task (no self-loops),
//! and a DFS back-edge to a task still on the stack is a cycle.
//!
//! Groups are checked in isolation: visit marks never carry over from one
//! rule to the next, so a task shared by two rules is explored in both.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.3

use std::collections::HashMap;

use tracing::{trace, warn};

use super::{EntityKind, ErrorType, ValidationError};
use crate::models::BusinessRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Flags each co-run group that contains a cycle.
///
/// At most one finding per rule, naming the task at which the back-edge
/// was found.
pub fn check_co_run_cycles(rules: &[BusinessRule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for rule in rules {
        let Some(group) = rule.co_run_group() else {
            continue;
        };
        if group.is_empty() {
            warn!(rule_id = %rule.id, "co-run rule has an empty group, skipping");
            continue;
        }

        if let Some((at, back_to)) = find_cycle(group) {
            trace!(rule_id = %rule.id, at, back_to, "co-run back-edge");
            errors.push(ValidationError::error(
                ErrorType::CircularCoRunGroup,
                EntityKind::Task,
                at,
                format!(
                    "Co-run rule '{}' forms a cycle at task '{at}' (back to '{back_to}')",
                    rule.id
                ),
            ));
        }
    }

    errors
}

/// Returns the first back-edge `(from, to)` found in the group's clique.
fn find_cycle(group: &[String]) -> Option<(&str, &str)> {
    // Distinct members in first-seen order.
    let mut members: Vec<&str> = Vec::with_capacity(group.len());
    for id in group.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if !members.contains(&id) {
            members.push(id);
        }
    }

    let adj: HashMap<&str, Vec<&str>> = members
        .iter()
        .map(|&m| (m, members.iter().copied().filter(|&n| n != m).collect()))
        .collect();

    let mut marks: HashMap<&str, Mark> = HashMap::new();
    for &node in &members {
        if !marks.contains_key(node) {
            if let Some(edge) = dfs(node, &adj, &mut marks) {
                return Some(edge);
            }
        }
    }
    None
}

fn dfs<'a>(
    node: &'a str,
    adj: &HashMap<&'a str, Vec<&'a str>>,
    marks: &mut HashMap<&'a str, Mark>,
) -> Option<(&'a str, &'a str)> {
    marks.insert(node, Mark::OnStack);

    if let Some(neighbors) = adj.get(node) {
        for &next in neighbors {
            match marks.get(next) {
                Some(Mark::OnStack) => return Some((node, next)), // Back edge → cycle
                Some(Mark::Done) => {}
                None => {
                    if let Some(edge) = dfs(next, adj, marks) {
                        return Some(edge);
                    }
                }
            }
        }
    }

    marks.insert(node, Mark::Done);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleKind;

    #[test]
    fn test_clique_reports_one_cycle() {
        let rules = vec![BusinessRule::co_run("R1", ["T1", "T2", "T3"])];
        let errors = check_co_run_cycles(&rules);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorType::CircularCoRunGroup);
        assert!(["T1", "T2", "T3"].contains(&errors[0].entity_id.as_str()));
        assert!(errors[0].message.contains("R1"));
    }

    #[test]
    fn test_back_edge_found_at_second_member() {
        let rules = vec![BusinessRule::co_run("R1", ["T1", "T2"])];
        let errors = check_co_run_cycles(&rules);
        assert_eq!(errors[0].entity_id, "T2");
    }

    #[test]
    fn test_single_member_group_is_acyclic() {
        let rules = vec![BusinessRule::co_run("R1", ["T1"])];
        assert!(check_co_run_cycles(&rules).is_empty());
    }

    #[test]
    fn test_repeated_member_is_not_a_self_loop() {
        let rules = vec![BusinessRule::co_run("R1", ["T1", "T1", " T1 "])];
        assert!(check_co_run_cycles(&rules).is_empty());
    }

    #[test]
    fn test_empty_group_skipped() {
        let rules = vec![BusinessRule::new("R1", RuleKind::CoRun { tasks: vec![] })];
        assert!(check_co_run_cycles(&rules).is_empty());
    }

    #[test]
    fn test_groups_checked_independently() {
        // Shared task T2 must not be treated as already visited in R2.
        let rules = vec![
            BusinessRule::co_run("R1", ["T1", "T2"]),
            BusinessRule::co_run("R2", ["T2", "T3"]),
            BusinessRule::co_run("R3", ["T4"]),
        ];
        let errors = check_co_run_cycles(&rules);

        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("'R1'"));
        assert!(errors[1].message.contains("'R2'"));
        assert_eq!(errors[1].entity_id, "T3");
    }

    #[test]
    fn test_non_co_run_rules_ignored() {
        let rules = vec![BusinessRule::phase_window("R1", "T1", vec![1])];
        assert!(check_co_run_cycles(&rules).is_empty());
    }
}
