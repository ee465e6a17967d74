//! Worker model.
//!
//! Workers offer skills and phase slots. Each occurrence of a phase in
//! `available_slots` is one unit of capacity in that phase.

use serde::{Deserialize, Serialize};

use super::Phase;

/// A worker that can be allocated to tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Worker {
    /// Unique worker identifier.
    #[serde(rename = "WorkerID", deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(rename = "WorkerName", deserialize_with = "super::null_as_default")]
    pub name: String,
    /// Offered skills.
    #[serde(rename = "Skills", deserialize_with = "super::null_as_default")]
    pub skills: Vec<String>,
    /// Phase slots. Duplicates count as separate slots.
    #[serde(rename = "AvailableSlots", deserialize_with = "super::null_as_default")]
    pub available_slots: Vec<Phase>,
    /// Maximum number of slots this worker takes per phase.
    #[serde(rename = "MaxLoadPerPhase", deserialize_with = "super::null_as_one")]
    pub max_load_per_phase: i64,
    /// Worker grouping, referenced by load-limit rules.
    #[serde(rename = "WorkerGroup", deserialize_with = "super::null_as_default")]
    pub group: String,
    /// Free-form qualification label.
    #[serde(rename = "QualificationLevel", deserialize_with = "super::null_as_default")]
    pub qualification_level: String,
}

impl Default for Worker {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            skills: Vec::new(),
            available_slots: Vec::new(),
            max_load_per_phase: 1,
            group: String::new(),
            qualification_level: String::new(),
        }
    }
}

impl Worker {
    /// Creates a worker with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Adds one slot in the given phase.
    pub fn with_slot(mut self, phase: Phase) -> Self {
        self.available_slots.push(phase);
        self
    }

    /// Sets the per-phase load limit.
    pub fn with_max_load(mut self, max_load: i64) -> Self {
        self.max_load_per_phase = max_load;
        self
    }

    /// Sets the worker group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the qualification level.
    pub fn with_qualification(mut self, level: impl Into<String>) -> Self {
        self.qualification_level = level.into();
        self
    }

    /// Whether this worker offers the skill.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    /// Whether any offered skill appears in `required`.
    pub fn shares_skill(&self, required: &[String]) -> bool {
        required.iter().any(|r| self.has_skill(r))
    }

    /// Whether any slot falls into one of `phases`.
    pub fn available_in_any(&self, phases: &[Phase]) -> bool {
        self.available_slots.iter().any(|p| phases.contains(p))
    }

    /// Skills with blank entries removed.
    pub fn effective_skills(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}
