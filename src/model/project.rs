//! Borrowed read view over one project record.

use crate::model::document::{Document, ProjectRecord};
use crate::model::task::Task;

/// Read view over a project: its identity plus task filtering by
/// project id. Constructed on demand, discarded after use.
#[derive(Debug, Clone, Copy)]
pub struct Project<'a> {
    doc: &'a Document,
    id: &'a str,
    record: &'a ProjectRecord,
}

impl<'a> Project<'a> {
    pub(crate) fn new(doc: &'a Document, id: &'a str, record: &'a ProjectRecord) -> Self {
        Self { doc, id, record }
    }

    #[must_use]
    pub fn id(&self) -> &'a str {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.record.title
    }

    /// Not-done tasks belonging to this project, in stored order.
    #[must_use]
    pub fn tasks(&self) -> Vec<Task<'a>> {
        self.doc
            .tasks()
            .into_iter()
            .filter(|t| t.project_id() == Some(self.id))
            .collect()
    }

    /// All tasks belonging to this project, completed ones included.
    #[must_use]
    pub fn all_tasks(&self) -> Vec<Task<'a>> {
        self.doc
            .all_tasks()
            .into_iter()
            .filter(|t| t.project_id() == Some(self.id))
            .collect()
    }
}
