//! `sp set-color` — set the TODAY tag theme color.

use crate::client::Client;
use crate::error::Result;
use crate::remote::FileStore;

pub fn execute<S: FileStore>(client: &mut Client<S>, color: &str, json: bool) -> Result<()> {
    client.set_color(color)?;

    if json {
        println!("{}", serde_json::json!({ "color": color }));
    } else {
        println!("Set TODAY theme color to {color}");
    }

    Ok(())
}
