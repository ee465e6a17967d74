//! Phase window conflicts and phase slot capacity.

use std::collections::BTreeMap;

use super::{EntityKind, ErrorType, ValidationError};
use crate::models::{BusinessRule, Phase, Task, Worker};

/// Flags tasks whose preferred phases leave their phase window.
///
/// One finding per phase-window rule and task, however many preferred
/// phases fall outside. Rules naming unknown tasks are skipped here and
/// reported by the reference checks.
pub fn check_phase_conflicts(tasks: &[Task], rules: &[BusinessRule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for rule in rules {
        let Some((task_id, allowed)) = rule.phase_window_of() else {
            continue;
        };
        let task_id = task_id.trim();
        let Some(task) = tasks.iter().find(|t| t.id.trim() == task_id) else {
            continue;
        };

        let outside: Vec<Phase> = task
            .preferred_phases
            .iter()
            .copied()
            .filter(|p| !allowed.contains(p))
            .collect();
        if !outside.is_empty() {
            errors.push(ValidationError::error(
                ErrorType::ConflictingPhaseWindow,
                EntityKind::Task,
                task_id,
                format!(
                    "Task '{task_id}' prefers phases {outside:?} outside window {allowed:?} of rule '{}'",
                    rule.id
                ),
            ));
        }
    }

    errors
}

/// Per-phase demand and supply totals.
///
/// Demand adds a task's full duration to every phase it prefers; supply
/// counts one unit per slot occurrence. Both sums saturate at `i64::MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseLoad {
    /// Phase → summed task duration.
    pub demand: BTreeMap<Phase, i64>,
    /// Phase → number of worker slots.
    pub supply: BTreeMap<Phase, i64>,
}

impl PhaseLoad {
    /// Aggregates demand and supply over a snapshot.
    pub fn calculate(workers: &[Worker], tasks: &[Task]) -> Self {
        let mut load = Self::default();
        for task in tasks {
            for &phase in &task.preferred_phases {
                let demand = load.demand.entry(phase).or_default();
                *demand = demand.saturating_add(task.demand_per_phase());
            }
        }
        for worker in workers {
            for &phase in &worker.available_slots {
                let supply = load.supply.entry(phase).or_default();
                *supply = supply.saturating_add(1);
            }
        }
        load
    }

    /// Slot supply in a phase (0 when no worker has a slot there).
    pub fn supply_in(&self, phase: Phase) -> i64 {
        self.supply.get(&phase).copied().unwrap_or(0)
    }

    /// Phases whose demand exceeds supply, ascending.
    pub fn saturated(&self) -> impl Iterator<Item = (Phase, i64, i64)> + '_ {
        self.demand
            .iter()
            .map(|(&phase, &demand)| (phase, demand, self.supply_in(phase)))
            .filter(|&(_, demand, supply)| demand > supply)
    }
}

/// Warns about each phase where task demand exceeds worker slots.
///
/// A capacity heuristic, not an infeasibility proof, hence warnings.
/// Phases are reported in ascending order.
pub fn check_phase_capacity(workers: &[Worker], tasks: &[Task]) -> Vec<ValidationError> {
    PhaseLoad::calculate(workers, tasks)
        .saturated()
        .map(|(phase, demand, supply)| {
            ValidationError::warning(
                ErrorType::PhaseSlotSaturation,
                EntityKind::Phase,
                phase.to_string(),
                format!("Phase {phase} needs {demand} slot units but workers offer {supply}"),
            )
        })
        .collect()
}
