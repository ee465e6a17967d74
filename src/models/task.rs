//! Task model.
//!
//! A task is a unit of work requested by clients and performed by
//! workers. It consumes `duration` phases, needs skills, prefers phases,
//! and may be staffed by up to `max_concurrent` workers at once.

use serde::{Deserialize, Serialize};

use super::Phase;

/// A task to be allocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    /// Unique task identifier.
    #[serde(rename = "TaskID", deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(rename = "TaskName", deserialize_with = "super::null_as_default")]
    pub name: String,
    /// Task category.
    #[serde(rename = "Category", deserialize_with = "super::null_as_default")]
    pub category: String,
    /// Number of phases consumed. `None` when absent or non-numeric.
    #[serde(rename = "Duration")]
    pub duration: Option<i64>,
    /// Skills a worker needs for this task.
    #[serde(rename = "RequiredSkills", deserialize_with = "super::null_as_default")]
    pub required_skills: Vec<String>,
    /// Phases the task should run in.
    #[serde(rename = "PreferredPhases", deserialize_with = "super::null_as_default")]
    pub preferred_phases: Vec<Phase>,
    /// Maximum simultaneous worker assignments.
    #[serde(rename = "MaxConcurrent", deserialize_with = "super::null_as_one")]
    pub max_concurrent: i64,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            category: String::new(),
            duration: None,
            required_skills: Vec::new(),
            preferred_phases: Vec::new(),
            max_concurrent: 1,
        }
    }
}

impl Task {
    /// Creates a new task with the given ID and a duration of one phase.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration: Some(1),
            ..Default::default()
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the task category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the duration in phases.
    pub fn with_duration(mut self, phases: i64) -> Self {
        self.duration = Some(phases);
        self
    }

    /// Clears the duration, as an import does for a non-numeric cell.
    pub fn without_duration(mut self) -> Self {
        self.duration = None;
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Adds a preferred phase.
    pub fn with_preferred_phase(mut self, phase: Phase) -> Self {
        self.preferred_phases.push(phase);
        self
    }

    /// Sets the concurrency limit.
    pub fn with_max_concurrent(mut self, max: i64) -> Self {
        self.max_concurrent = max;
        self
    }

    /// Duration counted towards phase demand. Missing durations count as zero.
    pub fn demand_per_phase(&self) -> i64 {
        self.duration.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1")
            .with_name("Migrate DB")
            .with_category("ops")
            .with_duration(3)
            .with_required_skill("sql")
            .with_preferred_phase(2)
            .with_preferred_phase(3)
            .with_max_concurrent(2);

        assert_eq!(task.id, "T1");
        assert_eq!(task.name, "Migrate DB");
        assert_eq!(task.category, "ops");
        assert_eq!(task.duration, Some(3));
        assert_eq!(task.required_skills, vec!["sql"]);
        assert_eq!(task.preferred_phases, vec![2, 3]);
        assert_eq!(task.max_concurrent, 2);
    }

    #[test]
    fn test_task_demand() {
        assert_eq!(Task::new("T1").with_duration(4).demand_per_phase(), 4);
        assert_eq!(Task::new("T1").without_duration().demand_per_phase(), 0);
        assert_eq!(Task::new("T1").with_duration(-2).demand_per_phase(), 0);
    }

    #[test]
    fn test_task_decodes_import_headers() {
        let json = r#"{
            "TaskID": "T9",
            "TaskName": "Audit",
            "Duration": 2,
            "RequiredSkills": ["x"],
            "PreferredPhases": [1, 2],
            "MaxConcurrent": 3
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id, "T9");
        assert_eq!(task.duration, Some(2));
        assert_eq!(task.preferred_phases, vec![1, 2]);
        assert_eq!(task.max_concurrent, 3);
    }

    #[test]
    fn test_task_null_columns_default() {
        let json = r#"{
            "TaskID": "T4",
            "TaskName": null,
            "Duration": null,
            "RequiredSkills": null,
            "PreferredPhases": null,
            "MaxConcurrent": null
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();

        assert_eq!(task.id, "T4");
        assert!(task.name.is_empty());
        assert_eq!(task.duration, None);
        assert!(task.required_skills.is_empty());
        assert!(task.preferred_phases.is_empty());
        assert_eq!(task.max_concurrent, 1);
    }
}
