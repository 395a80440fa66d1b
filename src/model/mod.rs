//! Data types for the Super Productivity document.
//!
//! The document is one JSON blob owned by the host application; this
//! module types the parts the CLI touches and carries everything else
//! through flattened extras maps so a round-trip never drops data.

mod attachment;
mod document;
mod project;
mod task;

pub use attachment::{Attachment, AttachmentRecord, LINK_KIND};
pub use document::{
    Document, EntityState, GlobalConfig, MiscConfig, ProjectRecord, TagRecord, TagTheme,
    DEFAULT_PROJECT_ID, TODAY_TAG,
};
pub use project::Project;
pub use task::{NewTask, Task, TaskRecord};

#[cfg(test)]
pub(crate) use document::fixtures;
