//! Task attachment value type and its stored record form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attachment kind for plain links; the only kind the CLI inspects.
pub const LINK_KIND: &str = "LINK";

/// A link or file reference attached to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub path: String,
    pub title: String,
    pub kind: String,
}

/// Stored form of an attachment inside a task record.
///
/// The `id` is minted from wall-clock time on every conversion from
/// [`Attachment`], so re-serializing the same logical attachment twice
/// produces two different ids. Nothing else references attachment ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachmentRecord {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub id: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Attachment {
    /// Create a LINK attachment.
    pub fn link(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            kind: LINK_KIND.to_string(),
        }
    }

    /// Read the logical value out of a stored record.
    #[must_use]
    pub fn from_record(record: &AttachmentRecord) -> Self {
        Self {
            path: record.path.clone(),
            title: record.title.clone(),
            kind: record.kind.clone(),
        }
    }

    /// Convert to the stored form, minting a fresh wall-clock id.
    #[must_use]
    pub fn to_record(&self) -> AttachmentRecord {
        AttachmentRecord {
            kind: self.kind.clone(),
            path: self.path.clone(),
            title: self.title.clone(),
            id: chrono::Utc::now().timestamp_millis().to_string(),
            extra: Map::new(),
        }
    }
}
