//! Validation orchestrator.
//!
//! Runs every check over one snapshot in a fixed order and concatenates
//! the findings. All working state is local to a run, so a [`Validator`]
//! can be reused across snapshots and called after every edit.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    check_co_run_cycles, check_concurrency_feasibility, check_duplicate_ids,
    check_phase_capacity, check_phase_conflicts, check_ranges, check_required_fields,
    check_rule_references, check_skill_coverage, check_task_references, ValidationError,
    ValidationReport,
};
use crate::config::ValidationConfig;
use crate::error::Result;
use crate::models::{BusinessRule, Client, Task, Worker};

/// One consistent view of the data to audit.
///
/// The caller owns the snapshot; the audit only borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
    pub rules: Vec<BusinessRule>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a `{clients, workers, tasks, rules}` document.
    ///
    /// Rules are decoded structurally but not parameter-checked, so that a
    /// half-edited rule still reaches the audit.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.clients.push(client);
        self
    }

    /// Adds a worker.
    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Adds a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a rule.
    pub fn with_rule(mut self, rule: BusinessRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// Runs the audit with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Audits a snapshot and returns every finding.
    ///
    /// Order: required fields, duplicate IDs, ranges, references, skill
    /// coverage, co-run cycles, phase conflicts, phase capacity,
    /// concurrency feasibility. Nothing is deduplicated across stages.
    pub fn validate(&self, snapshot: &Snapshot) -> Vec<ValidationError> {
        self.validate_parts(
            &snapshot.clients,
            &snapshot.workers,
            &snapshot.tasks,
            &snapshot.rules,
        )
    }

    /// Audits collections that are not held in a [`Snapshot`].
    pub fn validate_parts(
        &self,
        clients: &[Client],
        workers: &[Worker],
        tasks: &[Task],
        rules: &[BusinessRule],
    ) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        run_stage(&mut errors, "required_fields", || {
            check_required_fields(clients, workers, tasks)
        });
        run_stage(&mut errors, "duplicate_ids", || {
            check_duplicate_ids(clients, workers, tasks)
        });
        run_stage(&mut errors, "ranges", || {
            check_ranges(clients, workers, tasks, &self.config)
        });
        run_stage(&mut errors, "references", || {
            let mut found = check_task_references(clients, tasks);
            found.extend(check_rule_references(clients, workers, tasks, rules));
            found
        });
        run_stage(&mut errors, "skill_coverage", || {
            check_skill_coverage(workers, tasks, self.config.skill_coverage_severity)
        });
        run_stage(&mut errors, "co_run_cycles", || check_co_run_cycles(rules));
        run_stage(&mut errors, "phase_conflicts", || {
            check_phase_conflicts(tasks, rules)
        });
        run_stage(&mut errors, "phase_capacity", || {
            check_phase_capacity(workers, tasks)
        });
        run_stage(&mut errors, "concurrency", || {
            check_concurrency_feasibility(workers, tasks)
        });

        info!(
            clients = clients.len(),
            workers = workers.len(),
            tasks = tasks.len(),
            rules = rules.len(),
            findings = errors.len(),
            "validation finished"
        );
        errors
    }

    /// Audits a snapshot and wraps the findings in a report.
    pub fn report(&self, snapshot: &Snapshot) -> ValidationReport {
        ValidationReport::new(self.validate(snapshot))
    }
}

fn run_stage<F>(errors: &mut Vec<ValidationError>, stage: &str, check: F)
where
    F: FnOnce() -> Vec<ValidationError>,
{
    let found = check();
    debug!(stage, findings = found.len(), "validation stage");
    errors.extend(found);
}

/// Audits the collections with the default configuration.
pub fn validate_all(
    clients: &[Client],
    workers: &[Worker],
    tasks: &[Task],
    rules: &[BusinessRule],
) -> Vec<ValidationError> {
    Validator::default().validate_parts(clients, workers, tasks, rules)
}
