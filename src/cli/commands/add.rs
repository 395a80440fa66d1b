//! `sp add` — create one task per title.

use crate::cli::AddArgs;
use crate::client::Client;
use crate::error::Result;
use crate::model::{Attachment, NewTask};
use crate::remote::FileStore;
use serde::Serialize;

#[derive(Serialize)]
struct AddOutput {
    created: Vec<CreatedTask>,
    skipped: Vec<String>,
}

#[derive(Serialize)]
struct CreatedTask {
    id: String,
    title: String,
}

pub fn execute<S: FileStore>(client: &mut Client<S>, args: &AddArgs, json: bool) -> Result<()> {
    // Resolve the project title up front so a typo fails before any write.
    let project_id = match &args.project_title {
        Some(title) => Some(client.project_by_name(title, true)?.id().to_string()),
        None => None,
    };

    let attachments: Vec<Attachment> = args
        .links
        .iter()
        .map(|url| Attachment::link(url, url))
        .collect();

    let mut created = Vec::new();
    let mut skipped = Vec::new();

    for title in &args.titles {
        let mut new = NewTask::new(title)
            .today(!args.no_today)
            .unique(args.unique)
            .time_estimate(args.time_estimate)
            .attachments(attachments.clone());
        if let Some(id) = &project_id {
            new = new.project(id);
        }

        match client.create_task(&new)? {
            Some(id) => created.push(CreatedTask { id, title: title.clone() }),
            None => skipped.push(title.clone()),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&AddOutput { created, skipped })?);
    } else {
        for task in &created {
            println!("Created task {} \"{}\"", task.id, task.title);
        }
        for title in &skipped {
            println!("Skipped \"{title}\" (already exists)");
        }
    }

    Ok(())
}
