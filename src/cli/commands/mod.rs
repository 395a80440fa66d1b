//! Command implementations.

pub mod add;
pub mod cleanup;
pub mod color;
pub mod completions;
pub mod list;
pub mod urls;

use crate::cli::FilterArgs;
use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::model::{Document, Task, TODAY_TAG};
use crate::remote::DropboxStore;
use std::path::Path;

/// Build a Dropbox-backed client from the resolved config.
pub fn open_client(config_path: Option<&Path>) -> Result<Client<DropboxStore>> {
    let config = Config::load(config_path)?;
    let store = DropboxStore::from_config(&config);
    Ok(Client::new(store, config.file_path))
}

/// Select not-done tasks per the shared filter flags, newest first
/// (reverse of stored order).
pub(crate) fn select_tasks<'a>(doc: &'a Document, args: &FilterArgs) -> Result<Vec<Task<'a>>> {
    let mut tasks = match &args.project_title {
        Some(title) => doc.project_by_name(title, true)?.tasks(),
        None => doc.tasks(),
    };

    if args.today {
        tasks.retain(|t| t.tags().iter().any(|tag| tag == TODAY_TAG));
    }

    tasks.reverse();
    Ok(tasks)
}
