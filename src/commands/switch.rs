use anyhow::Result;

use crate::cli::{GlobalOpts, SwitchArgs};
use crate::commands::common::build_switcher;

pub async fn cmd_switch(opts: &GlobalOpts, args: SwitchArgs) -> Result<()> {
    let switcher = build_switcher(opts).await?;
    let target = switcher.registry().resolve(&args.mode)?.id;
    switcher.switch_mode(target, !args.force).await
}
