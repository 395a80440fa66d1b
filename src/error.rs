//! Error types for the sp CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=auth, 4=transport, ...)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sp operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigMissing,
    ConfigInvalid,

    // Auth (exit 3)
    AuthFailed,

    // Transport (exit 4)
    RemoteFileMissing,
    TransportError,

    // Format (exit 5)
    DocumentInvalid,

    // Not Found (exit 6)
    ProjectNotFound,

    // I/O (exit 8)
    IoError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigMissing => "CONFIG_MISSING",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::AuthFailed => "AUTH_FAILED",
            Self::RemoteFileMissing => "REMOTE_FILE_MISSING",
            Self::TransportError => "TRANSPORT_ERROR",
            Self::DocumentInvalid => "DOCUMENT_INVALID",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::IoError => "IO_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigMissing | Self::ConfigInvalid => 2,
            Self::AuthFailed => 3,
            Self::RemoteFileMissing | Self::TransportError => 4,
            Self::DocumentInvalid => 5,
            Self::ProjectNotFound => 6,
            Self::IoError => 8,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in sp CLI operations.
///
/// None of these are retried or recovered locally: every error
/// propagates to `main`, which prints a diagnostic and exits with
/// the category code.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Config file not found: {path}")]
    ConfigMissing { path: PathBuf },

    #[error("Invalid config file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Dropbox token exchange failed: {0}")]
    Auth(String),

    #[error("Remote file not found: {path}")]
    RemoteFileMissing { path: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote document is not a valid Super Productivity export: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Document missing expected {kind} entity: {id}")]
    MissingEntity { kind: &'static str, id: String },

    #[error("Project not found: {name}")]
    ProjectNotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::ConfigMissing { .. } => ErrorCode::ConfigMissing,
            Self::ConfigInvalid { .. } => ErrorCode::ConfigInvalid,
            Self::Auth(_) => ErrorCode::AuthFailed,
            Self::RemoteFileMissing { .. } => ErrorCode::RemoteFileMissing,
            Self::Transport(_) => ErrorCode::TransportError,
            Self::Format(_) | Self::MissingEntity { .. } => ErrorCode::DocumentInvalid,
            Self::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            Self::Io(_) => ErrorCode::IoError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::ConfigMissing { path } => Some(format!(
                "Create {} with {{\"api_key\": \"...\", \"refresh_token\": \"...\"}} \
                 or point --config / SP_CONFIG at an existing file.",
                path.display()
            )),

            Self::Auth(_) => Some(
                "Check that api_key matches your Dropbox app key and that the \
                 refresh token has not been revoked."
                    .to_string(),
            ),

            Self::RemoteFileMissing { path } => Some(format!(
                "No file at '{path}' in the linked Dropbox. Sync once from the \
                 Super Productivity app, or set file_path in the config."
            )),

            Self::ProjectNotFound { name } => Some(format!(
                "No project titled '{name}' (matched case-insensitively). \
                 Check the title in the Super Productivity app."
            )),

            Self::MissingEntity { kind, id } => Some(format!(
                "The document references {kind} '{id}' but carries no such \
                 entity. Repair the reference in the Super Productivity app \
                 before retrying."
            )),

            Self::ConfigInvalid { .. }
            | Self::Transport(_)
            | Self::Format(_)
            | Self::Io(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, exit code, and optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(
            Error::ConfigMissing { path: PathBuf::from("/tmp/x") }.exit_code(),
            2
        );
        assert_eq!(Error::Auth("denied".into()).exit_code(), 3);
        assert_eq!(
            Error::RemoteFileMissing { path: "/sp.json".into() }.exit_code(),
            4
        );
        assert_eq!(Error::Transport("timeout".into()).exit_code(), 4);
        assert_eq!(
            Error::ProjectNotFound { name: "Work".into() }.exit_code(),
            6
        );
    }

    #[test]
    fn structured_json_carries_code_and_hint() {
        let err = Error::ProjectNotFound { name: "Work".into() };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "PROJECT_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 6);
        assert!(json["error"]["hint"].as_str().unwrap().contains("Work"));
    }

    #[test]
    fn format_error_maps_to_document_invalid() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::Format(parse_err);
        assert_eq!(err.error_code(), ErrorCode::DocumentInvalid);
        assert_eq!(err.exit_code(), 5);
    }
}
