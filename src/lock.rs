//! Cross-process mode-switch lock.
//!
//! The lock is a file whose existence means "a switch is in progress".
//! Taking and dropping it is delegated to configured shell commands; this
//! module watches the file and sequences the commands. The lock file path is
//! exported to the commands as DPF_MODE_LOCK_FILE.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::command::run_checked;
use crate::config::LockCommands;
use crate::readiness::{wait_for_absence, WaitOutcome};

/// Environment variable naming the lock file
pub const LOCK_FILE_ENV: &str = "DPF_MODE_LOCK_FILE";

pub struct ModeLock {
    lock_file: PathBuf,
    commands: LockCommands,
    interval: Duration,
    timeout: Duration,
}

impl ModeLock {
    pub fn new(
        lock_file: PathBuf,
        commands: LockCommands,
        interval: Duration,
        timeout: Duration,
    ) -> Self {
        Self {
            lock_file,
            commands,
            interval,
            timeout,
        }
    }

    /// Lock file path from the environment, falling back to the packaged
    /// default location.
    pub fn lock_file_from_env() -> PathBuf {
        std::env::var(LOCK_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::paths::default_lock_file())
    }

    fn command_env(&self) -> [(&'static str, String); 1] {
        [(LOCK_FILE_ENV, self.lock_file.display().to_string())]
    }

    /// Wait for the lock file to be gone, then run the acquire command.
    /// A failed acquire command still attempts a release before the error
    /// surfaces.
    pub async fn acquire(&self) -> Result<()> {
        self.wait_until_free().await?;
        if let Err(e) = run_checked("lock acquisition", &self.commands.acquire, &self.command_env())
            .await
        {
            if let Err(release_err) = self.release().await {
                warn!(
                    error = %format!("{:#}", release_err),
                    "lock release after failed acquisition also failed"
                );
            }
            return Err(e);
        }
        Ok(())
    }

    /// Run the release command.
    pub async fn release(&self) -> Result<()> {
        run_checked("lock release", &self.commands.release, &self.command_env()).await
    }

    /// Block until no lock file is present. A timed-out wait is treated as a
    /// stale lock left behind by a crashed switch: the release command is
    /// forced and acquisition proceeds. A holder that is merely slow gets
    /// its lock broken.
    pub async fn wait_until_free(&self) -> Result<()> {
        let outcome = wait_for_absence(&self.lock_file, self.interval, self.timeout).await;
        if outcome == WaitOutcome::TimedOut {
            warn!(
                lock_file = %self.lock_file.display(),
                timeout_secs = self.timeout.as_secs_f64(),
                "mode lock still present after timeout, forcing release"
            );
            self.release()
                .await
                .context("forcing release of stale mode lock")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lock_in(dir: &TempDir) -> (ModeLock, PathBuf) {
        let lock_file = dir.path().join("mode.lock");
        let lock = ModeLock::new(
            lock_file.clone(),
            LockCommands {
                acquire: "touch \"$DPF_MODE_LOCK_FILE\"".to_string(),
                release: "rm -f \"$DPF_MODE_LOCK_FILE\"".to_string(),
            },
            Duration::from_millis(10),
            Duration::from_millis(60),
        );
        (lock, lock_file)
    }

    #[tokio::test]
    async fn test_acquire_creates_lock_file() {
        let dir = TempDir::new().unwrap();
        let (lock, lock_file) = lock_in(&dir);

        lock.acquire().await.unwrap();
        assert!(lock_file.exists());

        lock.release().await.unwrap();
        assert!(!lock_file.exists());
    }

    #[tokio::test]
    async fn test_stale_lock_is_force_released() {
        let dir = TempDir::new().unwrap();
        let (lock, lock_file) = lock_in(&dir);

        std::fs::write(&lock_file, "").unwrap();
        lock.acquire().await.unwrap();
        // The stale file was broken and the acquire command re-created it
        assert!(lock_file.exists());
        lock.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_acquire_command_surfaces_error() {
        let dir = TempDir::new().unwrap();
        let lock = ModeLock::new(
            dir.path().join("mode.lock"),
            LockCommands {
                acquire: "exit 2".to_string(),
                release: "true".to_string(),
            },
            Duration::from_millis(10),
            Duration::from_millis(60),
        );
        let err = lock.acquire().await.unwrap_err();
        assert!(format!("{:#}", err).contains("lock acquisition"));
    }
}
