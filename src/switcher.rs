//! The mode-switch coordinator.
//!
//! Serializes mode transitions behind the cross-process lock and drives the
//! stop -> wait-standby -> start -> wait-target -> readiness sequence. Any
//! convergence timeout forces the store back to standby and releases the
//! lock before the error surfaces, so the device is never left half-switched
//! or holding the lock.

use anyhow::{bail, Result};
use std::time::Duration;
use tracing::{info, warn};

use crate::command::run_checked;
use crate::lock::ModeLock;
use crate::readiness::{wait_for_update, ReadinessSpec, WaitOutcome};
use crate::registry::{ModeId, ModeRegistry};
use crate::store::ModeStore;

pub struct ModeSwitcher {
    registry: ModeRegistry,
    store: ModeStore,
    lock: ModeLock,
    interval: Duration,
    timeout: Duration,
}

impl ModeSwitcher {
    pub fn new(
        registry: ModeRegistry,
        store: ModeStore,
        lock: ModeLock,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            store,
            lock,
            interval,
            timeout,
        }
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn store(&self) -> &ModeStore {
        &self.store
    }

    pub fn lock(&self) -> &ModeLock {
        &self.lock
    }

    /// Switch the device to `target`.
    ///
    /// With `skip_if_same`, a request for the mode the device is already in
    /// is a no-op: no commands run, the lock is never touched. Standby
    /// always no-ops, even without `skip_if_same`, so restarting from
    /// standby stays inert.
    pub async fn switch_mode(&self, target: ModeId, skip_if_same: bool) -> Result<()> {
        let current = self.store.read_current().await?;
        if current == target && (skip_if_same || current == self.registry.standby_id()) {
            info!(mode = %target, "already in requested mode");
            return Ok(());
        }
        let current_mode = self.registry.get(current)?;
        let target_mode = self.registry.get(target)?;
        info!(from = %current_mode.name, to = %target_mode.name, "switching mode");

        self.lock.acquire().await?;

        if let Some(command) = &current_mode.stop_command {
            self.run_mode_command("mode stop", command).await?;
        }
        self.wait_or_fall_back(self.registry.standby_id(), "wait for standby")
            .await?;

        if let Some(command) = &target_mode.start_command {
            self.run_mode_command("mode start", command).await?;
        }
        self.wait_or_fall_back(target, "mode switch").await?;

        if let Some(readiness) = &target_mode.readiness {
            match readiness {
                ReadinessSpec::File { path } => {
                    // A readiness timeout is a warning, not a failed switch
                    wait_for_update(path, self.interval, self.timeout).await;
                }
                ReadinessSpec::Socket { host, port } => {
                    warn!(
                        host = %host,
                        port = port,
                        "socket readiness is not checked during switching, skipping"
                    );
                }
            }
        }

        self.lock.release().await?;
        info!(mode = %target_mode.name, "mode switch complete");
        Ok(())
    }

    /// Force a full stop/start cycle of the current mode. Standby no-ops.
    pub async fn restart_current_mode(&self) -> Result<()> {
        let current = self.store.read_current().await?;
        self.switch_mode(current, false).await
    }

    /// Run the current mode's dedicated restart command under the lock.
    /// Modes without one (standby included) have nothing to reload.
    pub async fn reload_current_mode(&self) -> Result<()> {
        let current = self.store.read_current().await?;
        let mode = self.registry.get(current)?;
        let Some(command) = &mode.restart_command else {
            warn!(mode = %mode.name, "mode has no restart command, nothing to reload");
            return Ok(());
        };

        self.lock.acquire().await?;
        self.run_mode_command("mode restart", command).await?;
        self.lock.release().await?;
        info!(mode = %mode.name, "mode reloaded");
        Ok(())
    }

    /// Run a stop/start/restart command, releasing the lock before the
    /// error surfaces on non-zero exit.
    async fn run_mode_command(&self, label: &str, command: &str) -> Result<()> {
        if let Err(e) = run_checked(label, command, &[]).await {
            self.release_quietly().await;
            return Err(e);
        }
        Ok(())
    }

    /// Wait for the store to report `expected`; on timeout force standby
    /// into the store, release the lock once, and fail.
    async fn wait_or_fall_back(&self, expected: ModeId, what: &str) -> Result<()> {
        let outcome = self
            .store
            .wait_for_mode(expected, self.interval, self.timeout)
            .await;
        if outcome == WaitOutcome::TimedOut {
            let standby = self.registry.standby_id();
            if let Err(e) = self.store.write_current(standby).await {
                warn!(
                    error = %format!("{:#}", e),
                    "failed to force standby after timeout"
                );
            }
            self.release_quietly().await;
            bail!("{} timed out, fell back to standby", what);
        }
        Ok(())
    }

    async fn release_quietly(&self) {
        if let Err(e) = self.lock.release().await {
            warn!(
                error = %format!("{:#}", e),
                "failed to release mode lock while aborting"
            );
        }
    }
}
