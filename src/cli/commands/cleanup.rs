//! `sp cleanup` — prune every task with a generated (integer) id.

use crate::client::Client;
use crate::error::Result;
use crate::remote::FileStore;
use serde::Serialize;

#[derive(Serialize)]
struct CleanupOutput {
    removed: Vec<String>,
    count: usize,
}

pub fn execute<S: FileStore>(client: &mut Client<S>, json: bool) -> Result<()> {
    let removed = client.cleanup_manual()?;

    if json {
        let count = removed.len();
        println!("{}", serde_json::to_string_pretty(&CleanupOutput { removed, count })?);
    } else {
        println!("Removed {} generated task(s)", removed.len());
    }

    Ok(())
}
