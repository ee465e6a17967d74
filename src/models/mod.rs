//! Allocation domain models.
//!
//! Plain records for the three imported entity kinds and the business
//! rules authored on top of them. No validation logic lives here beyond
//! rule parameter checks; see [`crate::validation`].
//!
//! # Entity Roles
//!
//! | Entity | Offers | Needs |
//! |--------|--------|-------|
//! | Client | priority | tasks (by ID) |
//! | Worker | skills, phase slots | - |
//! | Task | demand per phase | skills, phases, workers |

mod client;
mod rule;
mod task;
mod worker;

pub use client::Client;
pub use rule::{rules_from_json, BusinessRule, OverrideScope, RuleKind};
pub use task::Task;
pub use worker::Worker;

use serde::{Deserialize, Deserializer};

/// A discrete scheduling period, numbered from 1.
pub type Phase = i32;

/// Decodes an explicit `null` cell the same way as a missing column.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Like [`null_as_default`] for limits whose missing value is one.
pub(crate) fn null_as_one<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(|v| v.unwrap_or(1))
}
