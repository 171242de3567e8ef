use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalOpts, StatusArgs};
use crate::commands::common::build_switcher;

#[derive(Debug, Serialize)]
struct StatusInfo {
    value: u32,
    name: String,
}

pub async fn cmd_status(opts: &GlobalOpts, args: StatusArgs) -> Result<()> {
    let switcher = build_switcher(opts).await?;

    // Let any in-flight switch settle before reading, as the UI does
    switcher.lock().wait_until_free().await?;

    let current = switcher.store().read_current().await?;
    let mode = switcher.registry().get(current)?;

    if args.json {
        let info = StatusInfo {
            value: mode.id.0,
            name: mode.name.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{} ({})", mode.name, mode.id);
    }

    Ok(())
}
