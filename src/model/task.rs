//! Task record, the borrowed read view over it, and the parameters
//! for creating a new task.

use crate::model::attachment::{Attachment, AttachmentRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stored form of a task inside the document's task collection.
///
/// Every field is tolerant on load; records written by the CLI carry
/// the full set with the issue-tracker fields defaulted to null, the
/// way the host application writes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub is_done: bool,

    /// Completion time in epoch-millis, null while open.
    #[serde(default)]
    pub done_on: Option<i64>,

    #[serde(default)]
    pub project_id: Option<String>,

    #[serde(default)]
    pub tag_ids: Vec<String>,

    #[serde(default)]
    pub sub_task_ids: Vec<String>,

    #[serde(default)]
    pub time_spent_on_day: Map<String, Value>,

    #[serde(default)]
    pub time_spent: i64,

    #[serde(default)]
    pub time_estimate: i64,

    #[serde(default)]
    pub reminder_id: Option<Value>,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub parent_id: Option<String>,

    #[serde(default)]
    pub planned_at: Option<Value>,

    #[serde(rename = "_showSubtasksMode", default = "default_show_subtasks_mode")]
    pub show_subtasks_mode: i64,

    #[serde(default)]
    pub attachments: Vec<AttachmentRecord>,

    // Issue-tracker integration fields, null on creation.
    #[serde(default)]
    pub issue_id: Option<Value>,

    #[serde(default)]
    pub issue_points: Option<Value>,

    #[serde(default)]
    pub issue_type: Option<Value>,

    #[serde(default)]
    pub issue_attachment_nr: Option<Value>,

    #[serde(default)]
    pub issue_last_updated: Option<Value>,

    #[serde(default)]
    pub issue_was_updated: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_show_subtasks_mode() -> i64 {
    2
}

impl TaskRecord {
    /// Build a fresh, not-done record with the given identity.
    #[must_use]
    pub fn new(id: &str, title: &str, project_id: Option<String>, time_estimate: i64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            project_id,
            time_estimate,
            show_subtasks_mode: default_show_subtasks_mode(),
            ..Self::default()
        }
    }
}

/// Read view over one task record. Short-lived; holds no state beyond
/// the borrows.
#[derive(Debug, Clone, Copy)]
pub struct Task<'a> {
    id: &'a str,
    record: &'a TaskRecord,
}

impl<'a> Task<'a> {
    pub(crate) fn new(id: &'a str, record: &'a TaskRecord) -> Self {
        Self { id, record }
    }

    #[must_use]
    pub fn id(&self) -> &'a str {
        self.id
    }

    /// Title with surrounding whitespace trimmed.
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.record.title.trim()
    }

    #[must_use]
    pub fn done(&self) -> bool {
        self.record.is_done
    }

    /// Completion time in seconds since the epoch, `0.0` while open.
    #[must_use]
    pub fn done_at(&self) -> f64 {
        match self.record.done_on {
            Some(millis) => millis as f64 / 1000.0,
            None => 0.0,
        }
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&'a str> {
        self.record.project_id.as_deref()
    }

    #[must_use]
    pub fn tags(&self) -> &'a [String] {
        &self.record.tag_ids
    }

    /// Attachments in stored order, converted lazily.
    pub fn attachments(&self) -> impl Iterator<Item = Attachment> + 'a {
        self.record.attachments.iter().map(Attachment::from_record)
    }
}

/// Parameters for creating a task. `today` defaults to true, matching
/// the host application's quick-add behavior.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub project_id: Option<String>,
    pub today: bool,
    pub unique: bool,
    pub time_estimate: i64,
    pub attachments: Vec<Attachment>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            project_id: None,
            today: true,
            unique: false,
            time_estimate: 0,
            attachments: Vec::new(),
        }
    }

    /// Create the task in this project instead of the configured default.
    #[must_use]
    pub fn project(mut self, id: impl Into<String>) -> Self {
        self.project_id = Some(id.into());
        self
    }

    /// Tag (or don't tag) the task TODAY.
    #[must_use]
    pub fn today(mut self, today: bool) -> Self {
        self.today = today;
        self
    }

    /// Skip creation when a not-done task with the same title exists.
    #[must_use]
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Time estimate in milliseconds.
    #[must_use]
    pub fn time_estimate(mut self, millis: i64) -> Self {
        self.time_estimate = millis;
        self
    }

    #[must_use]
    pub fn attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        let record = TaskRecord::new("1", "  Buy milk  ", None, 0);
        let task = Task::new("1", &record);
        assert_eq!(task.title(), "Buy milk");
    }

    #[test]
    fn done_at_converts_millis_to_seconds() {
        let mut record = TaskRecord::new("1", "t", None, 0);
        let task = Task::new("1", &record);
        assert_eq!(task.done_at(), 0.0);

        record.done_on = Some(1_700_000_000_000);
        let task = Task::new("1", &record);
        assert_eq!(task.done_at(), 1_700_000_000.0);
    }

    #[test]
    fn new_record_serializes_full_shape() {
        let record = TaskRecord::new("3", "Buy milk", Some("P1".into()), 500);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["isDone"], false);
        assert_eq!(json["doneOn"], Value::Null);
        assert_eq!(json["projectId"], "P1");
        assert_eq!(json["timeEstimate"], 500);
        assert_eq!(json["_showSubtasksMode"], 2);
        assert_eq!(json["issueId"], Value::Null);
        assert_eq!(json["issueWasUpdated"], Value::Null);
        assert_eq!(json["tagIds"], serde_json::json!([]));
    }

    #[test]
    fn attachments_convert_in_order() {
        let mut record = TaskRecord::new("1", "t", None, 0);
        record.attachments = vec![
            Attachment::link("http://a", "a").to_record(),
            Attachment::link("http://b", "b").to_record(),
        ];
        let task = Task::new("1", &record);
        let paths: Vec<String> = task.attachments().map(|a| a.path).collect();
        assert_eq!(paths, vec!["http://a", "http://b"]);
    }
}
