//! Client model.
//!
//! A client requests tasks and carries a priority used downstream by the
//! allocator. Field names on the wire follow the import column headers
//! (`ClientID`, `PriorityLevel`, ...).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A client requesting work.
///
/// Missing columns decode to empty values so the audit can report them
/// instead of failing the import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Unique client identifier.
    #[serde(rename = "ClientID", deserialize_with = "super::null_as_default")]
    pub id: String,
    /// Display name.
    #[serde(rename = "ClientName", deserialize_with = "super::null_as_default")]
    pub name: String,
    /// Priority level, expected in 1..=5. `None` when absent or non-numeric.
    #[serde(rename = "PriorityLevel")]
    pub priority_level: Option<i64>,
    /// Requested task IDs, in import order.
    #[serde(rename = "RequestedTaskIDs", deserialize_with = "super::null_as_default")]
    pub requested_task_ids: Vec<String>,
    /// Free-form grouping tag.
    #[serde(rename = "GroupTag", deserialize_with = "super::null_as_default")]
    pub group_tag: String,
    /// Opaque per-client metadata.
    #[serde(rename = "AttributesJSON", deserialize_with = "super::null_as_default")]
    pub attributes: Map<String, Value>,
}

impl Client {
    /// Creates a client with the given ID.
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

    /// Sets the priority level.
    pub fn with_priority(mut self, level: i64) -> Self {
        self.priority_level = Some(level);
        self
    }

    /// Adds a requested task ID.
    pub fn with_requested_task(mut self, task_id: impl Into<String>) -> Self {
        self.requested_task_ids.push(task_id.into());
        self
    }

    /// Sets the group tag.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group_tag = group.into();
        self
    }

    /// Adds a metadata attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let c = Client::new("C1")
            .with_name("Acme")
            .with_priority(3)
            .with_requested_task("T1")
            .with_requested_task("T2")
            .with_group("enterprise")
            .with_attribute("region", "EU");

        assert_eq!(c.id, "C1");
        assert_eq!(c.name, "Acme");
        assert_eq!(c.priority_level, Some(3));
        assert_eq!(c.requested_task_ids, vec!["T1", "T2"]);
        assert_eq!(c.group_tag, "enterprise");
        assert_eq!(c.attributes.get("region"), Some(&Value::from("EU")));
    }

    #[test]
    fn test_client_decodes_import_headers() {
        let json = r#"{
            "ClientID": "C7",
            "ClientName": "Globex",
            "PriorityLevel": 5,
            "RequestedTaskIDs": ["T1"],
            "AttributesJSON": {"budget": 1200}
        }"#;
        let c: Client = serde_json::from_str(json).unwrap();

        assert_eq!(c.id, "C7");
        assert_eq!(c.priority_level, Some(5));
        assert_eq!(c.requested_task_ids, vec!["T1"]);
        assert!(c.group_tag.is_empty());
        assert_eq!(c.attributes.get("budget"), Some(&Value::from(1200)));
    }

    #[test]
    fn test_client_missing_columns_default() {
        let c: Client = serde_json::from_str("{}").unwrap();
        assert!(c.id.is_empty());
        assert_eq!(c.priority_level, None);
        assert!(c.requested_task_ids.is_empty());
    }

    #[test]
    fn test_client_null_columns_default() {
        let json = r#"{
            "ClientID": "C1",
            "ClientName": null,
            "PriorityLevel": 2,
            "RequestedTaskIDs": null,
            "GroupTag": null,
            "AttributesJSON": null
        }"#;
        let c: Client = serde_json::from_str(json).unwrap();

        assert_eq!(c.id, "C1");
        assert!(c.name.is_empty());
        assert_eq!(c.priority_level, Some(2));
        assert!(c.requested_task_ids.is_empty());
        assert!(c.group_tag.is_empty());
        assert!(c.attributes.is_empty());
    }
}
