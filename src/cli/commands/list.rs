//! `sp list` — print task titles, newest first.

use crate::cli::FilterArgs;
use crate::client::Client;
use crate::error::Result;
use crate::remote::FileStore;
use serde::Serialize;

#[derive(Serialize)]
struct TaskOutput {
    id: String,
    title: String,
    project_id: Option<String>,
    tags: Vec<String>,
}

pub fn execute<S: FileStore>(client: &mut Client<S>, args: &FilterArgs, json: bool) -> Result<()> {
    let doc = client.document()?;
    let tasks = super::select_tasks(doc, args)?;

    if json {
        let rows: Vec<TaskOutput> = tasks
            .iter()
            .map(|t| TaskOutput {
                id: t.id().to_string(),
                title: t.title().to_string(),
                project_id: t.project_id().map(String::from),
                tags: t.tags().to_vec(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for task in tasks {
            println!("{}", task.title());
        }
    }

    Ok(())
}
