//! ClickUp JSON shapes used by the hierarchy and status passes.
//!
//! Only the fields the tool reads are modeled; everything else in the API
//! payloads is ignored by serde.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// Folder reference embedded in a list payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A ClickUp list. Its name carries the encoded path (see [`crate::list_path`]).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder: Option<FolderRef>,
}

impl TaskList {
    pub fn folder_name(&self) -> &str {
        self.folder
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .unwrap_or("")
    }
}

/// List reference embedded in a task payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Task status. The API sends an object (`{"status": "complete", ...}`);
/// a bare string is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStatus {
    pub status: String,
}

impl TaskStatus {
    pub fn is(&self, name: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(name)
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Object {
                #[serde(default)]
                status: String,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Name(status) | Repr::Object { status } => TaskStatus { status },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CustomField {
    pub name: String,
    /// Absent and `null` both mean "no value".
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub list: ListRef,
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

impl Task {
    pub fn has_parent(&self) -> bool {
        self.parent.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Value of the custom field `name`. When the name repeats, the last
    /// occurrence wins, even if it has no value.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.custom_fields
            .iter()
            .rev()
            .find(|f| f.name == name)?
            .value
            .as_ref()
            .filter(|v| !v.is_null())
    }

    /// Field value as text: strings verbatim, numbers in decimal form.
    pub fn field_text(&self, name: &str) -> Option<String> {
        self.field(name).and_then(value_text)
    }

    /// Non-empty text value of `name`.
    pub fn field_nonempty(&self, name: &str) -> Option<String> {
        self.field_text(name).filter(|s| !s.is_empty())
    }

    /// True when `name` holds `level`, either as a string or an integer.
    pub fn field_is_level(&self, name: &str, level: u32) -> bool {
        self.field(name).is_some_and(|v| value_is_level(v, level))
    }
}

pub(crate) fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_is_level(v: &Value, level: u32) -> bool {
    match v {
        Value::String(s) => s.trim() == level.to_string(),
        Value::Number(n) => n.as_u64() == Some(u64::from(level)),
        _ => false,
    }
}

/// Body of `PUT /task/{id}`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "Date Closed", skip_serializing_if = "Option::is_none")]
    pub date_closed: Option<Value>,
    #[serde(rename = "Date Done", skip_serializing_if = "Option::is_none")]
    pub date_done: Option<Value>,
}

impl TaskUpdate {
    /// Re-parent `task` under `parent` and move it into `list`.
    pub fn reparent(parent: &Task, list: &TaskList) -> Self {
        let list_id = match list.id.trim().parse::<u64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(list.id.clone()),
        };
        Self {
            parent: Some(parent.id.clone()),
            list_id: Some(list_id),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FoldersEnvelope {
    #[serde(default)]
    pub folders: Vec<Folder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListsEnvelope {
    #[serde(default)]
    pub lists: Vec<TaskList>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TasksPage {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub last_page: Option<bool>,
}

impl TasksPage {
    /// A missing `last_page` is treated as the final page.
    pub fn is_last(&self) -> bool {
        self.last_page.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task(value: Value) -> Task {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn status_object_and_string() {
        let t = task(json!({"id": "1", "name": "a", "status": {"status": "complete", "color": "#000"}}));
        assert!(t.status.is("COMPLETE"));
        let t = task(json!({"id": "1", "name": "a", "status": "in progress"}));
        assert_eq!(t.status.status, "in progress");
    }

    #[test]
    fn custom_field_values() {
        let t = task(json!({
            "id": "1",
            "name": "a",
            "custom_fields": [
                {"name": "M Path Depth 2", "value": "7"},
                {"name": "M Is Project", "value": 1},
                {"name": "M Recurrence"},
                {"name": "M Starred", "value": null}
            ]
        }));
        assert!(t.field_is_level("M Path Depth 2", 7));
        assert!(!t.field_is_level("M Path Depth 2", 6));
        assert_eq!(t.field_text("M Is Project").as_deref(), Some("1"));
        assert!(t.field("M Recurrence").is_none());
        assert!(t.field("M Starred").is_none());
        assert!(t.field("missing").is_none());
    }

    #[test]
    fn numeric_depth_matches() {
        let t = task(json!({
            "id": "1",
            "name": "a",
            "custom_fields": [{"name": "M Path Depth 2", "value": 6}]
        }));
        assert!(t.field_is_level("M Path Depth 2", 6));
    }

    #[test]
    fn repeated_field_name_takes_last_occurrence() {
        let t = task(json!({
            "id": "1",
            "name": "a",
            "custom_fields": [
                {"name": "M Path Depth 2", "value": "6"},
                {"name": "M Path Depth 2", "value": "7"},
                {"name": "M Starred", "value": "Y"},
                {"name": "M Starred", "value": null}
            ]
        }));
        assert!(t.field_is_level("M Path Depth 2", 7));
        assert!(!t.field_is_level("M Path Depth 2", 6));
        assert!(t.field("M Starred").is_none());
    }

    #[test]
    fn parent_presence() {
        assert!(!task(json!({"id": "1", "name": "a"})).has_parent());
        assert!(!task(json!({"id": "1", "name": "a", "parent": null})).has_parent());
        assert!(!task(json!({"id": "1", "name": "a", "parent": ""})).has_parent());
        assert!(task(json!({"id": "1", "name": "a", "parent": "abc"})).has_parent());
    }

    #[test]
    fn reparent_body_uses_numeric_list_id() {
        let parent = task(json!({"id": "p1", "name": "Parent"}));
        let list = TaskList {
            id: "901".to_string(),
            name: "A\\B\\".to_string(),
            folder: None,
        };
        let body = serde_json::to_value(TaskUpdate::reparent(&parent, &list)).unwrap();
        assert_eq!(body, json!({"parent": "p1", "list_id": 901}));
    }

    #[test]
    fn update_omits_unset_fields() {
        let mut u = TaskUpdate::default();
        assert!(u.is_empty());
        u.status = Some("COMPLETE".to_string());
        u.date_closed = Some(json!("1700000000000"));
        let body = serde_json::to_value(&u).unwrap();
        assert_eq!(
            body,
            json!({"status": "COMPLETE", "Date Closed": "1700000000000"})
        );
        assert!(!u.is_empty());
    }

    #[test]
    fn tasks_page_last_page_defaults_true() {
        let p: TasksPage = serde_json::from_value(json!({"tasks": []})).unwrap();
        assert!(p.is_last());
        let p: TasksPage = serde_json::from_value(json!({"tasks": [], "last_page": false})).unwrap();
        assert!(!p.is_last());
    }
}
