//! Configuration file loading.
//!
//! The whole configuration is read once at startup into an owned [`Config`]
//! that is passed into the components that need it. Nothing in here is
//! consulted ambiently after load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Top-level contents of the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Mode definitions, keyed by mode name
    pub modes: HashMap<String, ModeConfig>,
    pub control: ControlConfig,
}

/// One mode entry as written in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeConfig {
    /// Unique integer id, as persisted in the mode store
    pub value: u32,
    #[serde(default)]
    pub start_command: Option<String>,
    #[serde(default)]
    pub stop_command: Option<String>,
    #[serde(default)]
    pub restart_command: Option<String>,
    /// Readiness requirement, "file=<path-or-envvar>" or
    /// "socket=<host-or-envvar>:<port-or-envvar>"
    #[serde(default)]
    pub wait_for: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Poll granularity in seconds
    pub file_query_interval: f64,
    /// Ceiling for any wait during a switch, in seconds
    pub mode_switch_timeout: f64,
    pub lock_commands: LockCommands,
}

/// Shell commands the lock manager delegates acquisition and release to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockCommands {
    pub acquire: String,
    pub release: String,
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

impl ControlConfig {
    pub fn query_interval(&self) -> Duration {
        Duration::from_secs_f64(self.file_query_interval)
    }

    pub fn switch_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.mode_switch_timeout)
    }
}
