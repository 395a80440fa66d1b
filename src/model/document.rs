//! Typed schema over the exported document, plus the pure document
//! operations (id allocation, task insertion, cleanup, lookups).
//!
//! Everything here is transport-free so it can be tested against
//! fixture documents built in code.

use crate::error::{Error, Result};
use crate::model::attachment::Attachment;
use crate::model::project::Project;
use crate::model::task::{NewTask, Task, TaskRecord};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Well-known tag id driving the "today" view and theme color.
pub const TODAY_TAG: &str = "TODAY";

/// Project id `cleanup_manual` detaches generated tasks from.
///
/// This is the literal the reference behavior uses, regardless of the
/// configured default project id. Tasks created under a differently
/// named default project are still removed from the task collection,
/// but stay listed in that project's `taskIds`.
pub const DEFAULT_PROJECT_ID: &str = "DEFAULT";

/// An ordered entity collection: `ids` drives order, `entities` maps
/// id to record. Shared shape of the task, project, and tag sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityState<T> {
    #[serde(default)]
    pub ids: Vec<String>,

    #[serde(default)]
    pub entities: BTreeMap<String, T>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<T> Default for EntityState<T> {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            entities: BTreeMap::new(),
            extra: Map::new(),
        }
    }
}

/// A project record: a named grouping of tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub task_ids: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Theme color pair carried by tag records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagTheme {
    #[serde(default)]
    pub primary: String,

    #[serde(default)]
    pub accent: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tag record; `TODAY` is the only one the CLI touches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub task_ids: Vec<String>,

    #[serde(default)]
    pub theme: TagTheme,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `globalConfig.misc` — the only config subsection the CLI reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiscConfig {
    #[serde(default)]
    pub default_project_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Host-application global config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub misc: MiscConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The whole exported document.
///
/// The three entity collections are required: a body without them is
/// not a Super Productivity export and fails to parse. Every other
/// field the host application owns rides along in the extras maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub task: EntityState<TaskRecord>,
    pub project: EntityState<ProjectRecord>,
    pub tag: EntityState<TagRecord>,

    #[serde(default)]
    pub global_config: GlobalConfig,

    /// Refreshed to "now" on every write so the host application
    /// recognizes the document changed.
    #[serde(default)]
    pub last_local_sync_model_change: i64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    // ── Reads ─────────────────────────────────────────────────

    /// All tasks in stored order, completed ones included.
    #[must_use]
    pub fn all_tasks(&self) -> Vec<Task<'_>> {
        self.task
            .ids
            .iter()
            .filter_map(|id| self.task.entities.get(id).map(|record| Task::new(id, record)))
            .collect()
    }

    /// Not-done tasks in stored order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task<'_>> {
        self.all_tasks().into_iter().filter(|t| !t.done()).collect()
    }

    /// Not-done tasks carrying `tag`.
    #[must_use]
    pub fn tasks_with_tag(&self, tag: &str) -> Vec<Task<'_>> {
        self.tasks()
            .into_iter()
            .filter(|t| t.tags().iter().any(|x| x == tag))
            .collect()
    }

    /// Not-done tasks flagged for today.
    #[must_use]
    pub fn todays_tasks(&self) -> Vec<Task<'_>> {
        self.tasks_with_tag(TODAY_TAG)
    }

    /// First not-done task whose (trimmed) title is exactly `title`.
    #[must_use]
    pub fn find_task_by_title(&self, title: &str) -> Option<Task<'_>> {
        self.tasks().into_iter().find(|t| t.title() == title)
    }

    /// All projects in stored order.
    #[must_use]
    pub fn projects(&self) -> Vec<Project<'_>> {
        self.project
            .ids
            .iter()
            .filter_map(|id| {
                self.project
                    .entities
                    .get(id)
                    .map(|record| Project::new(self, id, record))
            })
            .collect()
    }

    /// Look up a project by title. Linear scan; first match wins.
    pub fn project_by_name(&self, name: &str, case_insensitive: bool) -> Result<Project<'_>> {
        let wanted = if case_insensitive { name.to_lowercase() } else { name.to_string() };
        self.projects()
            .into_iter()
            .find(|p| {
                if case_insensitive {
                    p.title().to_lowercase() == wanted
                } else {
                    p.title() == wanted
                }
            })
            .ok_or_else(|| Error::ProjectNotFound { name: name.to_string() })
    }

    /// The configured default project id, treating an empty string as unset.
    #[must_use]
    pub fn default_project_id(&self) -> Option<String> {
        self.global_config
            .misc
            .default_project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    /// Smallest positive integer (as a string) absent from the task
    /// id sequence. O(n) per allocation; call volume is low.
    #[must_use]
    pub fn new_task_id(&self) -> String {
        // A sequence of n ids cannot contain all of 1..=n+1, so this
        // terminates within task count + 1 iterations.
        let mut candidate = 1u64;
        loop {
            let id = candidate.to_string();
            if !self.task.ids.contains(&id) {
                return id;
            }
            candidate += 1;
        }
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Insert a new task and wire up project and TODAY membership.
    ///
    /// Resolves the project to the configured default when none is
    /// given; tags TODAY when requested or when no project resolved.
    /// Returns the allocated id. Uniqueness is the caller's concern
    /// (the skip must also suppress the upload).
    ///
    /// Fails without mutating anything when the resolved project or
    /// the TODAY tag has no entity (a dangling reference, e.g. a
    /// configured default project that was deleted): wiring only one
    /// side of the membership would leave a task whose `projectId` or
    /// TODAY tag appears in no `taskIds` list.
    pub fn insert_task(&mut self, new: &NewTask) -> Result<String> {
        let project_id = new.project_id.clone().or_else(|| self.default_project_id());
        let today = new.today || project_id.is_none();

        // Validate both membership targets before touching the document.
        if let Some(pid) = &project_id {
            if !self.project.entities.contains_key(pid) {
                return Err(Error::MissingEntity { kind: "project", id: pid.clone() });
            }
        }
        if today && !self.tag.entities.contains_key(TODAY_TAG) {
            return Err(Error::MissingEntity { kind: "tag", id: TODAY_TAG.to_string() });
        }

        let id = self.new_task_id();

        let mut record = TaskRecord::new(&id, &new.title, project_id.clone(), new.time_estimate);
        record.attachments = new.attachments.iter().map(Attachment::to_record).collect();
        if today {
            record.tag_ids.push(TODAY_TAG.to_string());
        }

        self.task.ids.push(id.clone());
        self.task.entities.insert(id.clone(), record);

        if let Some(pid) = &project_id {
            if let Some(project) = self.project.entities.get_mut(pid) {
                project.task_ids.push(id.clone());
            }
        }

        if today {
            if let Some(tag) = self.tag.entities.get_mut(TODAY_TAG) {
                tag.task_ids.push(id.clone());
            }
        }

        Ok(id)
    }

    /// Remove every task whose id parses as an integer.
    ///
    /// Generated ids are numeric; ids minted by the host application
    /// are not, so this prunes exactly the programmatically created
    /// tasks. Removed ids are also detached from the
    /// [`DEFAULT_PROJECT_ID`] project and the TODAY tag (see the
    /// constant's note on the literal). Returns the removed ids.
    pub fn remove_generated_tasks(&mut self) -> Vec<String> {
        let removed: Vec<String> = self
            .task
            .ids
            .iter()
            .filter(|id| id.parse::<i64>().is_ok())
            .cloned()
            .collect();

        if removed.is_empty() {
            return removed;
        }

        self.task.ids.retain(|id| !removed.contains(id));
        for id in &removed {
            self.task.entities.remove(id);
        }

        if let Some(project) = self.project.entities.get_mut(DEFAULT_PROJECT_ID) {
            project.task_ids.retain(|id| !removed.contains(id));
        }
        if let Some(tag) = self.tag.entities.get_mut(TODAY_TAG) {
            tag.task_ids.retain(|id| !removed.contains(id));
        }

        removed
    }

    /// Set the TODAY tag theme primary and accent to `color`.
    pub fn set_today_color(&mut self, color: &str) {
        if let Some(tag) = self.tag.entities.get_mut(TODAY_TAG) {
            tag.theme.primary = color.to_string();
            tag.theme.accent = color.to_string();
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A small document: default project P1 with one open and one done
    /// task, an empty DEFAULT project, and the TODAY tag.
    pub fn sample() -> Document {
        serde_json::from_value(serde_json::json!({
            "task": {
                "ids": ["aaa", "bbb"],
                "entities": {
                    "aaa": {
                        "id": "aaa",
                        "title": "  Write report  ",
                        "isDone": false,
                        "projectId": "P1",
                        "tagIds": ["TODAY"],
                        "attachments": [
                            {"type": "LINK", "path": "http://example.com", "title": "ref", "id": "1"}
                        ]
                    },
                    "bbb": {
                        "id": "bbb",
                        "title": "Old chore",
                        "isDone": true,
                        "doneOn": 1_700_000_000_000i64,
                        "projectId": "P1",
                        "tagIds": []
                    }
                }
            },
            "project": {
                "ids": ["P1", "DEFAULT"],
                "entities": {
                    "P1": {"title": "Work", "taskIds": ["aaa", "bbb"]},
                    "DEFAULT": {"title": "Inbox", "taskIds": []}
                }
            },
            "tag": {
                "ids": ["TODAY"],
                "entities": {
                    "TODAY": {
                        "title": "Today",
                        "taskIds": ["aaa"],
                        "theme": {"primary": "#00ff00", "accent": "#00ff00"}
                    }
                }
            },
            "globalConfig": {"misc": {"defaultProjectId": "P1"}},
            "lastLocalSyncModelChange": 0,
            "hostOwned": {"keep": true}
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample;
    use super::*;

    #[test]
    fn new_task_id_skips_existing_integers() {
        let mut doc = sample();
        doc.task.ids = vec!["1".into(), "2".into(), "4".into()];
        assert_eq!(doc.new_task_id(), "3");

        doc.task.ids.clear();
        assert_eq!(doc.new_task_id(), "1");

        doc.task.ids = vec!["aaa".into(), "1".into()];
        assert_eq!(doc.new_task_id(), "2");
    }

    #[test]
    fn tasks_excludes_done_all_tasks_includes() {
        let doc = sample();
        assert_eq!(doc.tasks().len(), 1);
        assert_eq!(doc.all_tasks().len(), 2);
        assert_eq!(doc.tasks()[0].id(), "aaa");
    }

    #[test]
    fn todays_tasks_filters_by_tag() {
        let doc = sample();
        let today = doc.todays_tasks();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].id(), "aaa");
        assert!(doc.tasks_with_tag("URGENT").is_empty());
    }

    #[test]
    fn project_lookup_is_case_insensitive_by_default() {
        let doc = sample();
        let project = doc.project_by_name("work", true).unwrap();
        assert_eq!(project.id(), "P1");
        assert_eq!(project.title(), "Work");

        assert!(doc.project_by_name("work", false).is_err());
        let err = doc.project_by_name("nonexistent", true).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound { .. }));
    }

    #[test]
    fn find_task_by_title_matches_trimmed_not_done_titles() {
        let doc = sample();
        // Titles compare trimmed; done tasks are excluded.
        assert!(doc.find_task_by_title("Write report").is_some());
        assert!(doc.find_task_by_title("Old chore").is_none());
    }

    #[test]
    fn insert_task_wires_project_and_today() {
        let mut doc = sample();
        let id = doc.insert_task(&NewTask::new("Buy milk")).unwrap();
        assert_eq!(id, "1");

        let record = &doc.task.entities[&id];
        assert_eq!(record.title, "Buy milk");
        assert!(!record.is_done);
        assert_eq!(record.project_id.as_deref(), Some("P1"));
        assert_eq!(record.tag_ids, vec!["TODAY"]);

        assert!(doc.task.ids.contains(&id));
        assert!(doc.project.entities["P1"].task_ids.contains(&id));
        assert!(doc.tag.entities["TODAY"].task_ids.contains(&id));
    }

    #[test]
    fn insert_task_without_today_skips_tag() {
        let mut doc = sample();
        let id = doc.insert_task(&NewTask::new("Later").today(false)).unwrap();
        assert!(doc.task.entities[&id].tag_ids.is_empty());
        assert!(!doc.tag.entities["TODAY"].task_ids.contains(&id));
    }

    #[test]
    fn insert_task_without_any_project_forces_today() {
        let mut doc = sample();
        doc.global_config.misc.default_project_id = None;
        let id = doc.insert_task(&NewTask::new("Orphan").today(false)).unwrap();
        let record = &doc.task.entities[&id];
        assert_eq!(record.project_id, None);
        assert_eq!(record.tag_ids, vec!["TODAY"]);
    }

    #[test]
    fn insert_task_rejects_dangling_default_project() {
        let mut doc = sample();
        doc.global_config.misc.default_project_id = Some("GONE".to_string());

        let err = doc.insert_task(&NewTask::new("Buy milk")).unwrap_err();
        assert!(matches!(err, Error::MissingEntity { kind: "project", .. }));

        // Nothing was wired: no new id, no stray membership anywhere.
        assert_eq!(doc.task.ids, vec!["aaa", "bbb"]);
        assert!(doc.project.entities.values().all(|p| !p.task_ids.contains(&"1".to_string())));
        assert_eq!(doc.tag.entities["TODAY"].task_ids, vec!["aaa"]);
    }

    #[test]
    fn insert_task_rejects_missing_today_tag() {
        let mut doc = sample();
        doc.tag.entities.remove(TODAY_TAG);

        let err = doc.insert_task(&NewTask::new("Buy milk")).unwrap_err();
        assert!(matches!(err, Error::MissingEntity { kind: "tag", .. }));
        assert_eq!(doc.task.ids, vec!["aaa", "bbb"]);

        // Without the TODAY wiring requested, the same document is fine.
        let id = doc.insert_task(&NewTask::new("Buy milk").today(false)).unwrap();
        assert!(doc.task.ids.contains(&id));
    }

    #[test]
    fn empty_default_project_id_counts_as_unset() {
        let mut doc = sample();
        doc.global_config.misc.default_project_id = Some(String::new());
        assert_eq!(doc.default_project_id(), None);
    }

    #[test]
    fn explicit_project_overrides_default() {
        let mut doc = sample();
        let id = doc.insert_task(&NewTask::new("Inbox item").project(DEFAULT_PROJECT_ID)).unwrap();
        assert!(doc.project.entities["DEFAULT"].task_ids.contains(&id));
        assert!(!doc.project.entities["P1"].task_ids.contains(&id));
    }

    #[test]
    fn remove_generated_tasks_prunes_numeric_ids_only() {
        let mut doc = sample();
        doc.insert_task(&NewTask::new("One").project(DEFAULT_PROJECT_ID)).unwrap();
        doc.insert_task(&NewTask::new("Two").project(DEFAULT_PROJECT_ID)).unwrap();

        let removed = doc.remove_generated_tasks();
        assert_eq!(removed, vec!["1", "2"]);

        assert_eq!(doc.task.ids, vec!["aaa", "bbb"]);
        assert!(!doc.task.entities.contains_key("1"));
        assert!(doc.project.entities["DEFAULT"].task_ids.is_empty());
        assert_eq!(doc.tag.entities["TODAY"].task_ids, vec!["aaa"]);
    }

    #[test]
    fn set_today_color_sets_primary_and_accent() {
        let mut doc = sample();
        doc.set_today_color("#123456");
        let theme = &doc.tag.entities["TODAY"].theme;
        assert_eq!(theme.primary, "#123456");
        assert_eq!(theme.accent, "#123456");
    }

    #[test]
    fn unknown_fields_survive_round_trip() {
        let doc = sample();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["hostOwned"]["keep"], true);
        assert_eq!(json["globalConfig"]["misc"]["defaultProjectId"], "P1");
        // And the typed parts render camelCase.
        assert_eq!(json["task"]["entities"]["bbb"]["isDone"], true);
        assert_eq!(json["task"]["entities"]["bbb"]["doneOn"], 1_700_000_000_000i64);
    }

    #[test]
    fn document_without_task_section_fails_to_parse() {
        let err = serde_json::from_value::<Document>(serde_json::json!({"project": {}, "tag": {}}));
        assert!(err.is_err());
    }
}
