use anyhow::Result;
use tracing::info;

use crate::cli::{GlobalOpts, InitArgs};
use crate::commands::common::{load_registry, store_dir};
use crate::store::ModeStore;

pub async fn cmd_init(opts: &GlobalOpts, args: InitArgs) -> Result<()> {
    let (_, registry) = load_registry(opts).await?;
    let mode = registry.by_name(&args.mode)?;

    let store = ModeStore::new(store_dir(opts));
    store.init(mode.id).await?;

    info!(mode = %mode.name, value = %mode.id, "mode store provisioned");
    Ok(())
}
