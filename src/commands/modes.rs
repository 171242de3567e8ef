use anyhow::Result;
use serde::Serialize;

use crate::cli::{GlobalOpts, ModesArgs};
use crate::commands::common::load_registry;

#[derive(Debug, Serialize)]
struct ModeInfo {
    value: u32,
    name: String,
    start_command: Option<String>,
    stop_command: Option<String>,
    restart_command: Option<String>,
    wait_for: Option<String>,
}

pub async fn cmd_modes(opts: &GlobalOpts, args: ModesArgs) -> Result<()> {
    let (_, registry) = load_registry(opts).await?;

    let infos: Vec<ModeInfo> = registry
        .modes()
        .iter()
        .map(|mode| ModeInfo {
            value: mode.id.0,
            name: mode.name.clone(),
            start_command: mode.start_command.clone(),
            stop_command: mode.stop_command.clone(),
            restart_command: mode.restart_command.clone(),
            wait_for: mode.readiness.as_ref().map(|spec| spec.to_string()),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    println!(
        "{:<8} {:<12} {:<7} {:<7} {:<9} {:<30}",
        "VALUE", "NAME", "START", "STOP", "RESTART", "WAIT_FOR"
    );
    println!("{}", "-".repeat(76));
    for info in infos {
        let defined = |command: &Option<String>| if command.is_some() { "yes" } else { "-" };
        println!(
            "{:<8} {:<12} {:<7} {:<7} {:<9} {:<30}",
            info.value,
            info.name,
            defined(&info.start_command),
            defined(&info.stop_command),
            defined(&info.restart_command),
            info.wait_for.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
