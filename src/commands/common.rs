//! Shared construction of the pieces commands operate on.
//!
//! Every command loads the configuration once and builds an explicit object
//! graph from it; nothing is stashed in process-wide state.

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::lock::ModeLock;
use crate::paths;
use crate::registry::ModeRegistry;
use crate::store::ModeStore;
use crate::switcher::ModeSwitcher;

pub fn config_path(opts: &GlobalOpts) -> PathBuf {
    opts.config
        .clone()
        .unwrap_or_else(paths::default_config_path)
}

pub fn store_dir(opts: &GlobalOpts) -> PathBuf {
    opts.store_dir
        .clone()
        .unwrap_or_else(paths::default_store_dir)
}

pub async fn load_registry(opts: &GlobalOpts) -> Result<(Config, ModeRegistry)> {
    let config = Config::load(&config_path(opts)).await?;
    let registry = ModeRegistry::from_config(&config)?;
    Ok((config, registry))
}

/// Build a fully wired coordinator from the configuration and CLI options.
pub async fn build_switcher(opts: &GlobalOpts) -> Result<ModeSwitcher> {
    let (config, registry) = load_registry(opts).await?;
    let control = &config.control;
    let lock = ModeLock::new(
        ModeLock::lock_file_from_env(),
        control.lock_commands.clone(),
        control.query_interval(),
        control.switch_timeout(),
    );
    let store = ModeStore::new(store_dir(opts));
    Ok(ModeSwitcher::new(
        registry,
        store,
        lock,
        control.query_interval(),
        control.switch_timeout(),
    ))
}
