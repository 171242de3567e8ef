use anyhow::Result;
use tracing::info;

use crate::cli::{GlobalOpts, ReportArgs};
use crate::commands::common::{load_registry, store_dir};
use crate::store::ModeStore;

/// Write the store record directly. This is the reporting surface mode
/// processes use to signal which mode they have entered; it takes no lock,
/// the coordinator already holds it for the duration of the switch.
pub async fn cmd_report(opts: &GlobalOpts, args: ReportArgs) -> Result<()> {
    let (_, registry) = load_registry(opts).await?;
    let mode = registry.resolve(&args.mode)?;

    let store = ModeStore::new(store_dir(opts));
    store.write_current(mode.id).await?;

    info!(mode = %mode.name, value = %mode.id, "current mode recorded");
    Ok(())
}
