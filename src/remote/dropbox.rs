//! Dropbox-backed [`FileStore`].
//!
//! Authenticates with an OAuth2 refresh-token exchange (lazily, once
//! per process) and moves whole files through the content endpoints.
//! Blocking requests throughout; the tool is single-threaded and every
//! call is one shot.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::remote::FileStore;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::Deserialize;
use tracing::debug;

const TOKEN_URL: &str = "https://api.dropboxapi.com/oauth2/token";
const DOWNLOAD_URL: &str = "https://content.dropboxapi.com/2/files/download";
const UPLOAD_URL: &str = "https://content.dropboxapi.com/2/files/upload";

/// Dropbox file store for a single app-keyed account.
pub struct DropboxStore {
    http: HttpClient,
    app_key: String,
    refresh_token: String,
    /// Short-lived bearer token, exchanged on first use and cached
    /// for the process lifetime.
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl DropboxStore {
    #[must_use]
    pub fn new(app_key: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            app_key: app_key.into(),
            refresh_token: refresh_token.into(),
            access_token: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key, &config.refresh_token)
    }

    /// Exchange the refresh token for a bearer token, once.
    fn access_token(&mut self) -> Result<String> {
        if let Some(token) = &self.access_token {
            return Ok(token.clone());
        }

        debug!("exchanging refresh token for access token");
        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", self.refresh_token.as_str()),
                ("client_id", self.app_key.as_str()),
            ])
            .send()
            .map_err(|e| Error::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Auth(format!("HTTP {status}: {body}")));
        }

        let token: TokenResponse = response.json().map_err(|e| Error::Auth(e.to_string()))?;
        self.access_token = Some(token.access_token.clone());
        Ok(token.access_token)
    }
}

/// `Dropbox-API-Arg` header value for a download.
fn download_arg(path: &str) -> String {
    serde_json::json!({ "path": path }).to_string()
}

/// `Dropbox-API-Arg` header value for an overwriting upload.
fn upload_arg(path: &str) -> String {
    serde_json::json!({ "path": path, "mode": "overwrite", "mute": true }).to_string()
}

impl FileStore for DropboxStore {
    fn download(&mut self, path: &str) -> Result<Vec<u8>> {
        let token = self.access_token()?;
        let response = self
            .http
            .post(DOWNLOAD_URL)
            .bearer_auth(&token)
            .header("Dropbox-API-Arg", download_arg(path))
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        // Dropbox reports path lookup failures as 409 with a JSON body.
        if response.status() == StatusCode::CONFLICT {
            return Err(Error::RemoteFileMissing { path: path.to_string() });
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Transport(format!("download failed: HTTP {status}: {body}")));
        }

        let bytes = response.bytes().map_err(|e| Error::Transport(e.to_string()))?;
        debug!(bytes = bytes.len(), path, "downloaded file");
        Ok(bytes.to_vec())
    }

    fn upload(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let token = self.access_token()?;
        debug!(bytes = bytes.len(), path, "uploading file");
        let response = self
            .http
            .post(UPLOAD_URL)
            .bearer_auth(&token)
            .header("Dropbox-API-Arg", upload_arg(path))
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(Error::Transport(format!("upload failed: HTTP {status}: {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_arg_is_path_only() {
        assert_eq!(download_arg("/a/sp.json"), r#"{"path":"/a/sp.json"}"#);
    }

    #[test]
    fn upload_arg_requests_overwrite() {
        let arg: serde_json::Value = serde_json::from_str(&upload_arg("/a/sp.json")).unwrap();
        assert_eq!(arg["path"], "/a/sp.json");
        assert_eq!(arg["mode"], "overwrite");
        assert_eq!(arg["mute"], true);
    }

    #[test]
    fn store_starts_without_a_cached_token() {
        let store = DropboxStore::new("key", "refresh");
        assert!(store.access_token.is_none());
    }
}
