//! The document accessor: owns the remote store, the lazily-fetched
//! cached document, and every mutation entry point.
//!
//! Every write is a whole-document overwrite with no version check:
//! two concurrent writers (or this tool racing the host application's
//! own sync) silently clobber each other. That is the documented
//! contract of the underlying store, not something this client papers
//! over.

use crate::error::{Error, Result};
use crate::model::{Document, NewTask, Project, Task};
use crate::remote::FileStore;
use tracing::debug;

/// Client over one remote document.
///
/// The document is fetched on first access and cached for the client's
/// lifetime; [`Client::invalidate`] drops the cache so the next access
/// refetches.
pub struct Client<S: FileStore> {
    store: S,
    file_path: String,
    document: Option<Document>,
}

impl<S: FileStore> Client<S> {
    pub fn new(store: S, file_path: impl Into<String>) -> Self {
        Self {
            store,
            file_path: file_path.into(),
            document: None,
        }
    }

    // ── Fetch / push cycle ────────────────────────────────────

    /// The cached document, fetched on first access.
    pub fn document(&mut self) -> Result<&Document> {
        self.document_mut().map(|doc| &*doc)
    }

    fn document_mut(&mut self) -> Result<&mut Document> {
        let doc = match self.document.take() {
            Some(doc) => doc,
            None => self.fetch()?,
        };
        Ok(self.document.insert(doc))
    }

    fn fetch(&mut self) -> Result<Document> {
        let bytes = self.store.download(&self.file_path)?;
        debug!(bytes = bytes.len(), path = %self.file_path, "fetched document");
        serde_json::from_slice(&bytes).map_err(Error::Format)
    }

    /// Drop the cached document; the next access refetches.
    pub fn invalidate(&mut self) {
        self.document = None;
    }

    /// Stamp `lastLocalSyncModelChange` and upload the whole document.
    ///
    /// Unconditional overwrite, last writer wins. When nothing has
    /// been fetched yet there is no state to write back, so the call
    /// is a logged no-op rather than an error.
    pub fn push(&mut self) -> Result<()> {
        let Some(doc) = self.document.as_mut() else {
            debug!(path = %self.file_path, "push without a cached document, nothing to upload");
            return Ok(());
        };
        doc.last_local_sync_model_change = chrono::Utc::now().timestamp_millis();
        let body = serde_json::to_vec(doc).map_err(Error::Format)?;
        self.store.upload(&self.file_path, &body)?;
        debug!(bytes = body.len(), path = %self.file_path, "pushed document");
        Ok(())
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Create a task and push.
    ///
    /// Returns the new id, or `None` when `unique` is set and a
    /// not-done task with the same title already exists (silent no-op,
    /// nothing uploaded).
    pub fn create_task(&mut self, new: &NewTask) -> Result<Option<String>> {
        let doc = self.document_mut()?;
        if new.unique && doc.find_task_by_title(&new.title).is_some() {
            debug!(title = %new.title, "task already exists, skipping");
            return Ok(None);
        }
        let id = doc.insert_task(new)?;
        self.push()?;
        Ok(Some(id))
    }

    /// Create one task per title with default parameters.
    ///
    /// Mirrors the reference behavior: each title is an independent
    /// mutate-and-push cycle against the shared cached document, so a
    /// failure mid-batch leaves earlier tasks created.
    pub fn create_tasks<I, T>(&mut self, titles: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut ids = Vec::new();
        for title in titles {
            if let Some(id) = self.create_task(&NewTask::new(title))? {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Remove every generated (integer-id) task and push.
    ///
    /// See [`crate::model::DEFAULT_PROJECT_ID`] for which project the
    /// removed ids are detached from. Returns the removed ids.
    pub fn cleanup_manual(&mut self) -> Result<Vec<String>> {
        let removed = self.document_mut()?.remove_generated_tasks();
        self.push()?;
        Ok(removed)
    }

    /// Set the TODAY tag theme primary and accent colors and push.
    pub fn set_color(&mut self, color: &str) -> Result<()> {
        self.document_mut()?.set_today_color(color);
        self.push()
    }

    // ── Derived views ─────────────────────────────────────────

    /// Not-done tasks in stored order.
    pub fn tasks(&mut self) -> Result<Vec<Task<'_>>> {
        Ok(self.document()?.tasks())
    }

    /// All tasks, completed ones included.
    pub fn all_tasks(&mut self) -> Result<Vec<Task<'_>>> {
        Ok(self.document()?.all_tasks())
    }

    /// Not-done tasks tagged TODAY.
    pub fn todays_tasks(&mut self) -> Result<Vec<Task<'_>>> {
        Ok(self.document()?.todays_tasks())
    }

    /// Not-done tasks carrying `tag`.
    pub fn tasks_with_tag(&mut self, tag: &str) -> Result<Vec<Task<'_>>> {
        Ok(self.document()?.tasks_with_tag(tag))
    }

    /// First not-done task with this exact (trimmed) title.
    pub fn task_by_title(&mut self, title: &str) -> Result<Option<Task<'_>>> {
        Ok(self.document()?.find_task_by_title(title))
    }

    /// Project lookup by title, case-insensitive by default.
    pub fn project_by_name(&mut self, name: &str, case_insensitive: bool) -> Result<Project<'_>> {
        self.document()?.project_by_name(name, case_insensitive)
    }
}
