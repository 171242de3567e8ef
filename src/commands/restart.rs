use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::commands::common::build_switcher;

pub async fn cmd_restart(opts: &GlobalOpts) -> Result<()> {
    let switcher = build_switcher(opts).await?;
    switcher.restart_current_mode().await
}

pub async fn cmd_reload(opts: &GlobalOpts) -> Result<()> {
    let switcher = build_switcher(opts).await?;
    switcher.reload_current_mode().await
}
