//! Persistent record of the current mode.
//!
//! A single JSON file holds the one logical row the coordinator writes and
//! the UI reads. Mode processes report their own transitions through the
//! same record, so reads stay tolerant of minimal externally written JSON.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, warn};

use crate::readiness::WaitOutcome;
use crate::registry::ModeId;

pub const STORE_SCHEMA_VERSION: u32 = 1;

/// The persisted current-mode record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRecord {
    pub schema_version: u32,
    pub current: ModeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Manages the current-mode record on disk
pub struct ModeStore {
    store_dir: PathBuf,
}

impl ModeStore {
    pub fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    pub fn record_path(&self) -> PathBuf {
        self.store_dir.join("modes.json")
    }

    /// Provision the store with an initial current mode.
    pub async fn init(&self, initial: ModeId) -> Result<()> {
        fs::create_dir_all(&self.store_dir)
            .await
            .context("creating store directory")?;
        self.write_current(initial).await
    }

    pub async fn read(&self) -> Result<ModeRecord> {
        let path = self.record_path();
        let text = fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading mode store {}", path.display()))?;
        let record: ModeRecord = serde_json::from_str(&text)
            .with_context(|| format!("parsing mode store {}", path.display()))?;
        Ok(record)
    }

    /// The single-row read every status query makes.
    pub async fn read_current(&self) -> Result<ModeId> {
        Ok(self.read().await?.current)
    }

    /// Rewrite the record with a fresh update stamp.
    pub async fn write_current(&self, id: ModeId) -> Result<()> {
        let record = ModeRecord {
            schema_version: STORE_SCHEMA_VERSION,
            current: id,
            updated_at: Some(Utc::now()),
        };
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(self.record_path(), json)
            .await
            .context("writing mode store")?;
        Ok(())
    }

    /// Poll until the store reports `expected`. Unreadable records during
    /// polling count as not-yet-converged, since mode processes rewrite the
    /// file while we watch it.
    pub async fn wait_for_mode(
        &self,
        expected: ModeId,
        interval: Duration,
        timeout: Duration,
    ) -> WaitOutcome {
        let mut elapsed = Duration::ZERO;
        loop {
            match self.read_current().await {
                Ok(current) if current == expected => return WaitOutcome::Ok,
                Ok(_) => {}
                Err(e) => debug!(error = %format!("{:#}", e), "mode store not readable yet"),
            }
            tokio::time::sleep(interval).await;
            elapsed += interval;
            if elapsed > timeout {
                warn!(expected = %expected, "wait for mode switch timed out");
                return WaitOutcome::TimedOut;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_and_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModeStore::new(temp_dir.path().to_path_buf());

        store.init(ModeId(0)).await.unwrap();
        assert_eq!(store.read_current().await.unwrap(), ModeId(0));

        store.write_current(ModeId(1)).await.unwrap();
        let record = store.read().await.unwrap();
        assert_eq!(record.current, ModeId(1));
        assert_eq!(record.schema_version, STORE_SCHEMA_VERSION);
        assert!(record.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_reads_minimal_external_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModeStore::new(temp_dir.path().to_path_buf());

        // Mode processes write the record without an update stamp
        std::fs::write(
            store.record_path(),
            r#"{"schema_version":1,"current":2}"#,
        )
        .unwrap();

        assert_eq!(store.read_current().await.unwrap(), ModeId(2));
    }

    #[tokio::test]
    async fn test_read_missing_store_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModeStore::new(temp_dir.path().to_path_buf());
        assert!(store.read_current().await.is_err());
    }

    #[tokio::test]
    async fn test_wait_for_mode_converges_on_external_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModeStore::new(temp_dir.path().to_path_buf());
        store.init(ModeId(0)).await.unwrap();

        let record_path = store.record_path();
        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            std::fs::write(&record_path, r#"{"schema_version":1,"current":1}"#).unwrap();
        });

        let outcome = store
            .wait_for_mode(ModeId(1), Duration::from_millis(10), Duration::from_secs(1))
            .await;
        writer.await.unwrap();
        assert_eq!(outcome, WaitOutcome::Ok);
    }

    #[tokio::test]
    async fn test_wait_for_mode_times_out() {
        let temp_dir = TempDir::new().unwrap();
        let store = ModeStore::new(temp_dir.path().to_path_buf());
        store.init(ModeId(0)).await.unwrap();

        let outcome = store
            .wait_for_mode(
                ModeId(1),
                Duration::from_millis(10),
                Duration::from_millis(50),
            )
            .await;
        assert_eq!(outcome, WaitOutcome::TimedOut);
    }
}
