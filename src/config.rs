//! Configuration loading.
//!
//! The CLI reads a single JSON config file with the Dropbox app key,
//! the OAuth2 refresh token, and optionally the remote document path.
//! Resolution order for the file location:
//!
//! 1. Explicit `--config` flag
//! 2. `SP_CONFIG` environment variable (handled by clap's `env` feature)
//! 3. `<config_dir>/super-productivity-cli/config.json`
//!
//! Absence or malformed content is a fatal startup error; there is no
//! interactive setup flow.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Remote path of the Super Productivity export when the config
/// does not override it. This is where the app's Dropbox sync
/// writes its state.
pub const DEFAULT_FILE_PATH: &str = "/Apps/super_productivity/super_productivity/sp.json";

/// Credentials and remote location for the Dropbox-hosted document.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Dropbox app key, used as `client_id` in the token exchange.
    pub api_key: String,

    /// Long-lived OAuth2 refresh token for the linked account.
    pub refresh_token: String,

    /// Remote path of the document. Defaults to the app's sync location.
    #[serde(default = "default_file_path")]
    pub file_path: String,
}

fn default_file_path() -> String {
    DEFAULT_FILE_PATH.to_string()
}

impl Config {
    /// Load the config from `explicit_path`, or from the default
    /// per-user location when none is given.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()
                .ok_or_else(|| Error::ConfigInvalid {
                    path: PathBuf::from("<none>"),
                    reason: "could not determine the user config directory".to_string(),
                })?,
        };

        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigMissing { path: path.to_path_buf() });
        }

        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| Error::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Default config file location: `<config_dir>/super-productivity-cli/config.json`
/// (e.g. `~/.config/super-productivity-cli/config.json` on Linux).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|b| b.config_dir().join("super-productivity-cli").join("config.json"))
}
