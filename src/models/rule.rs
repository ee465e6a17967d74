//! Business rules.
//!
//! Rules are authored by users and stored next to the entity data. Each
//! kind carries its own parameters; the audit consumes co-run groupings
//! and phase windows, the remaining kinds are carried for the allocator
//! and checked only for well-formed parameters and group references.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Phase;
use crate::error::{Error, Result};

/// A user-defined business rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRule {
    /// Rule identifier, used to attribute audit findings.
    pub id: String,
    /// Kind-specific parameters.
    #[serde(flatten)]
    pub kind: RuleKind,
}

/// Rule parameters, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RuleKind {
    /// Listed tasks must run together.
    CoRun { tasks: Vec<String> },

    /// Members of `group` must share at least `min_common_slots` slots.
    #[serde(rename_all = "camelCase")]
    SlotRestriction { group: String, min_common_slots: u32 },

    /// Workers in `worker_group` take at most `max_slots_per_phase` per phase.
    #[serde(rename_all = "camelCase")]
    LoadLimit {
        worker_group: String,
        max_slots_per_phase: u32,
    },

    /// `task_id` may only run in `allowed_phases`.
    #[serde(rename_all = "camelCase")]
    PhaseWindow {
        task_id: String,
        allowed_phases: Vec<Phase>,
    },

    /// Entities matching `regex` get the rule described by `template`.
    PatternMatch {
        regex: String,
        template: String,
        #[serde(default)]
        params: Map<String, Value>,
    },

    /// Reorders rule evaluation.
    #[serde(rename_all = "camelCase")]
    PrecedenceOverride {
        scope: OverrideScope,
        #[serde(default)]
        rule_ids: Vec<String>,
        priority: i32,
    },
}

/// Scope of a precedence override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverrideScope {
    /// Applies to every rule.
    Global,
    /// Applies to the listed rule IDs only.
    Specific,
}

impl BusinessRule {
    /// Creates a rule from its parts.
    pub fn new(id: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Creates a co-run rule.
    pub fn co_run<I, S>(id: impl Into<String>, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            id,
            RuleKind::CoRun {
                tasks: tasks.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Creates a phase-window rule.
    pub fn phase_window(
        id: impl Into<String>,
        task_id: impl Into<String>,
        allowed_phases: Vec<Phase>,
    ) -> Self {
        Self::new(
            id,
            RuleKind::PhaseWindow {
                task_id: task_id.into(),
                allowed_phases,
            },
        )
    }

    /// Creates a slot-restriction rule.
    pub fn slot_restriction(id: impl Into<String>, group: impl Into<String>, min: u32) -> Self {
        Self::new(
            id,
            RuleKind::SlotRestriction {
                group: group.into(),
                min_common_slots: min,
            },
        )
    }

    /// Creates a load-limit rule.
    pub fn load_limit(id: impl Into<String>, worker_group: impl Into<String>, max: u32) -> Self {
        Self::new(
            id,
            RuleKind::LoadLimit {
                worker_group: worker_group.into(),
                max_slots_per_phase: max,
            },
        )
    }

    /// Creates a pattern-match rule with no parameters.
    pub fn pattern_match(
        id: impl Into<String>,
        regex: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            RuleKind::PatternMatch {
                regex: regex.into(),
                template: template.into(),
                params: Map::new(),
            },
        )
    }

    /// Creates a precedence override.
    pub fn precedence_override(
        id: impl Into<String>,
        scope: OverrideScope,
        rule_ids: Vec<String>,
        priority: i32,
    ) -> Self {
        Self::new(
            id,
            RuleKind::PrecedenceOverride {
                scope,
                rule_ids,
                priority,
            },
        )
    }

    /// Decodes and checks a single rule.
    pub fn from_json(json: &str) -> Result<Self> {
        let rule: Self = serde_json::from_str(json)?;
        rule.validate()?;
        Ok(rule)
    }

    /// Wire tag of the rule kind.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            RuleKind::CoRun { .. } => "coRun",
            RuleKind::SlotRestriction { .. } => "slotRestriction",
            RuleKind::LoadLimit { .. } => "loadLimit",
            RuleKind::PhaseWindow { .. } => "phaseWindow",
            RuleKind::PatternMatch { .. } => "patternMatch",
            RuleKind::PrecedenceOverride { .. } => "precedenceOverride",
        }
    }

    /// Task group of a co-run rule.
    pub fn co_run_group(&self) -> Option<&[String]> {
        match &self.kind {
            RuleKind::CoRun { tasks } => Some(tasks.as_slice()),
            _ => None,
        }
    }

    /// Task and allowed phases of a phase-window rule.
    pub fn phase_window_of(&self) -> Option<(&str, &[Phase])> {
        match &self.kind {
            RuleKind::PhaseWindow {
                task_id,
                allowed_phases,
            } => Some((task_id.as_str(), allowed_phases.as_slice())),
            _ => None,
        }
    }

    /// Task IDs this rule refers to.
    pub fn referenced_tasks(&self) -> Vec<&str> {
        match &self.kind {
            RuleKind::CoRun { tasks } => tasks.iter().map(String::as_str).collect(),
            RuleKind::PhaseWindow { task_id, .. } => vec![task_id.as_str()],
            _ => Vec::new(),
        }
    }

    /// Checks the parameters required by the rule kind.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::invalid_rule("", "rule id is empty"));
        }
        let fail = |reason: &str| -> Result<()> { Err(Error::invalid_rule(&self.id, reason)) };

        match &self.kind {
            RuleKind::CoRun { tasks } => {
                if tasks.len() < 2 {
                    return fail("co-run rule needs at least two tasks");
                }
                if tasks.iter().any(|t| t.trim().is_empty()) {
                    return fail("co-run rule names an empty task id");
                }
            }
            RuleKind::SlotRestriction {
                group,
                min_common_slots,
            } => {
                if group.trim().is_empty() {
                    return fail("slot restriction has no group");
                }
                if *min_common_slots == 0 {
                    return fail("minCommonSlots must be at least 1");
                }
            }
            RuleKind::LoadLimit {
                worker_group,
                max_slots_per_phase,
            } => {
                if worker_group.trim().is_empty() {
                    return fail("load limit has no worker group");
                }
                if *max_slots_per_phase == 0 {
                    return fail("maxSlotsPerPhase must be at least 1");
                }
            }
            RuleKind::PhaseWindow {
                task_id,
                allowed_phases,
            } => {
                if task_id.trim().is_empty() {
                    return fail("phase window has no task id");
                }
                if allowed_phases.is_empty() {
                    return fail("phase window allows no phases");
                }
                if allowed_phases.iter().any(|p| *p < 1) {
                    return fail("phase numbers start at 1");
                }
            }
            RuleKind::PatternMatch {
                regex: pattern,
                template,
                ..
            } => {
                if template.trim().is_empty() {
                    return fail("pattern match has no template");
                }
                regex::Regex::new(pattern).map_err(|source| Error::InvalidPattern {
                    rule_id: self.id.clone(),
                    source,
                })?;
            }
            RuleKind::PrecedenceOverride {
                scope, rule_ids, ..
            } => {
                if *scope == OverrideScope::Specific && rule_ids.is_empty() {
                    return fail("specific override names no rules");
                }
            }
        }
        Ok(())
    }
}

/// Decodes and checks a JSON array of rules.
pub fn rules_from_json(json: &str) -> Result<Vec<BusinessRule>> {
    let rules: Vec<BusinessRule> = serde_json::from_str(json)?;
    for rule in &rules {
        rule.validate()?;
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_co_run_rule() {
        let r = BusinessRule::co_run("R1", ["T1", "T2"]);
        assert_eq!(r.kind_name(), "coRun");
        assert_eq!(r.co_run_group(), Some(&["T1".to_string(), "T2".to_string()][..]));
        assert!(r.phase_window_of().is_none());
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_phase_window_rule() {
        let r = BusinessRule::phase_window("R2", "T1", vec![1, 2]);
        match r.phase_window_of() {
            Some((task, phases)) => {
                assert_eq!(task, "T1");
                assert_eq!(phases, &[1, 2]);
            }
            None => panic!("wrong variant"),
        }
        assert_eq!(r.referenced_tasks(), vec!["T1"]);
    }

    #[test]
    fn test_decode_tagged_rules() {
        let json = r#"[
            {"id": "R1", "type": "coRun", "tasks": ["T1", "T2"]},
            {"id": "R2", "type": "phaseWindow", "taskId": "T3", "allowedPhases": [1, 2]},
            {"id": "R3", "type": "loadLimit", "workerGroup": "ops", "maxSlotsPerPhase": 2},
            {"id": "R4", "type": "slotRestriction", "group": "vip", "minCommonSlots": 1},
            {"id": "R5", "type": "patternMatch", "regex": "^T\\d+$", "template": "tag"},
            {"id": "R6", "type": "precedenceOverride", "scope": "global", "priority": 1}
        ]"#;
        let rules = rules_from_json(json).unwrap();

        assert_eq!(rules.len(), 6);
        assert_eq!(
            rules[2].kind,
            RuleKind::LoadLimit {
                worker_group: "ops".into(),
                max_slots_per_phase: 2
            }
        );
        assert_eq!(rules[5].kind_name(), "precedenceOverride");
    }

    #[test]
    fn test_decode_rejects_missing_variant_field() {
        let json = r#"{"id": "R1", "type": "phaseWindow", "taskId": "T1"}"#;
        assert!(matches!(BusinessRule::from_json(json), Err(Error::Json(_))));
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        let json = r#"{"id": "R1", "type": "teleport"}"#;
        assert!(BusinessRule::from_json(json).is_err());
    }

    #[test]
    fn test_validate_parameters() {
        assert!(BusinessRule::co_run("R1", ["T1"]).validate().is_err());
        assert!(BusinessRule::phase_window("R2", "T1", vec![]).validate().is_err());
        assert!(BusinessRule::phase_window("R2", "T1", vec![0]).validate().is_err());
        assert!(BusinessRule::load_limit("R3", "ops", 0).validate().is_err());
        assert!(BusinessRule::slot_restriction("R4", "", 1).validate().is_err());
        assert!(
            BusinessRule::precedence_override("R5", OverrideScope::Specific, vec![], 1)
                .validate()
                .is_err()
        );
        assert!(BusinessRule::co_run("", ["T1", "T2"]).validate().is_err());
    }

    #[test]
    fn test_validate_bad_regex() {
        let r = BusinessRule::pattern_match("R1", "([", "tag");
        match r.validate() {
            Err(Error::InvalidPattern { rule_id, .. }) => assert_eq!(rule_id, "R1"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_rule_serializes_with_type_tag() {
        let r = BusinessRule::phase_window("R1", "T1", vec![2]);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["type"], "phaseWindow");
        assert_eq!(v["taskId"], "T1");
        assert_eq!(v["allowedPhases"], serde_json::json!([2]));
    }
}
