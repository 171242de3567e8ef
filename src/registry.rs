//! Static table of mode definitions.
//!
//! Built once from the loaded configuration and never mutated afterwards.
//! All lookups are pure; malformed configuration surfaces as an error at
//! build time, before any switch can run.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::Config;
use crate::readiness::{parse_readiness, ReadinessSpec};

/// Name of the designated safe/idle mode
pub const STANDBY_MODE: &str = "standby";

/// Identifier of a configured mode, as persisted in the mode store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ModeId(pub u32);

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable definition of one operating mode
#[derive(Debug, Clone)]
pub struct Mode {
    pub id: ModeId,
    pub name: String,
    pub start_command: Option<String>,
    pub stop_command: Option<String>,
    pub restart_command: Option<String>,
    pub readiness: Option<ReadinessSpec>,
}

/// Lookup table over the configured modes, ordered by id
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: Vec<Mode>,
    standby: ModeId,
}

impl ModeRegistry {
    /// Build the registry from loaded configuration. Duplicate ids, a
    /// missing standby mode and malformed wait_for entries are all errors.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut modes = Vec::with_capacity(config.modes.len());
        for (name, entry) in &config.modes {
            let readiness = match &entry.wait_for {
                Some(raw) => {
                    Some(parse_readiness(raw).with_context(|| format!("mode '{}'", name))?)
                }
                None => None,
            };
            modes.push(Mode {
                id: ModeId(entry.value),
                name: name.clone(),
                start_command: entry.start_command.clone(),
                stop_command: entry.stop_command.clone(),
                restart_command: entry.restart_command.clone(),
                readiness,
            });
        }
        modes.sort_by_key(|mode| mode.id);

        for pair in modes.windows(2) {
            if pair[0].id == pair[1].id {
                bail!(
                    "modes '{}' and '{}' share value {}",
                    pair[0].name,
                    pair[1].name,
                    pair[0].id
                );
            }
        }

        let standby = modes
            .iter()
            .find(|mode| mode.name == STANDBY_MODE)
            .map(|mode| mode.id)
            .with_context(|| format!("no '{}' mode configured", STANDBY_MODE))?;

        Ok(Self { modes, standby })
    }

    pub fn get(&self, id: ModeId) -> Result<&Mode> {
        self.modes
            .iter()
            .find(|mode| mode.id == id)
            .with_context(|| format!("no mode with value {}", id))
    }

    pub fn by_name(&self, name: &str) -> Result<&Mode> {
        self.modes
            .iter()
            .find(|mode| mode.name == name)
            .with_context(|| format!("no mode named '{}'", name))
    }

    /// Resolve a user-supplied mode argument: a configured name, or a
    /// numeric id.
    pub fn resolve(&self, arg: &str) -> Result<&Mode> {
        if let Some(mode) = self.modes.iter().find(|mode| mode.name == arg) {
            return Ok(mode);
        }
        if let Ok(value) = arg.parse::<u32>() {
            if let Some(mode) = self.modes.iter().find(|mode| mode.id == ModeId(value)) {
                return Ok(mode);
            }
        }
        bail!("unknown mode '{}'", arg)
    }

    pub fn standby_id(&self) -> ModeId {
        self.standby
    }

    /// All modes in id order.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Look up a single attribute of one mode, post-processed by `select`.
    pub fn attribute<T>(&self, id: ModeId, select: impl Fn(&Mode) -> T) -> Result<T> {
        Ok(select(self.get(id)?))
    }

    /// Bulk form: the selected attribute of every configured mode, keyed by
    /// mode id.
    pub fn attribute_map<T>(&self, select: impl Fn(&Mode) -> T) -> HashMap<ModeId, T> {
        self.modes
            .iter()
            .map(|mode| (mode.id, select(mode)))
            .collect()
    }
}
