//! `sp urls` — print link attachments of matching tasks, newest first.

use crate::cli::FilterArgs;
use crate::client::Client;
use crate::error::Result;
use crate::model::{Task, LINK_KIND};
use crate::remote::FileStore;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct UrlOutput {
    path: String,
    title: String,
    task: String,
}

/// One row per LINK-kind attachment, in task order; other attachment
/// kinds are skipped.
fn link_rows(tasks: &[Task<'_>]) -> Vec<UrlOutput> {
    let mut rows = Vec::new();
    for task in tasks {
        for attachment in task.attachments() {
            if attachment.kind == LINK_KIND {
                rows.push(UrlOutput {
                    path: attachment.path,
                    title: attachment.title,
                    task: task.title().to_string(),
                });
            }
        }
    }
    rows
}

pub fn execute<S: FileStore>(client: &mut Client<S>, args: &FilterArgs, json: bool) -> Result<()> {
    let doc = client.document()?;
    let tasks = super::select_tasks(doc, args)?;
    let rows = link_rows(&tasks);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in rows {
            println!("{}\t{}", row.path, row.task);
        }
    }

    Ok(())
}
