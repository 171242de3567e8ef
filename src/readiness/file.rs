//! File-based readiness polling.
//!
//! The external mode processes give no push notification, so readiness is
//! observed by polling the filesystem at a fixed interval with a hard
//! ceiling. Timeouts are reported to the caller, not treated as fatal here.

use std::path::Path;
use std::time::{Duration, SystemTime};
use tokio::time::sleep;
use tracing::warn;

use super::WaitOutcome;

/// Poll until `path` exists, checking every `interval`, giving up once the
/// accumulated wait exceeds `timeout`. A path that already exists returns
/// immediately without sleeping.
pub async fn wait_for_existence(path: &Path, interval: Duration, timeout: Duration) -> WaitOutcome {
    let mut elapsed = Duration::ZERO;
    while !path.exists() {
        sleep(interval).await;
        elapsed += interval;
        if elapsed > timeout {
            warn!(path = %path.display(), "wait for creation timed out");
            return WaitOutcome::TimedOut;
        }
    }
    WaitOutcome::Ok
}

/// Poll until `path` exists with a modification time strictly after the
/// moment this call was made. A file last written before the call does not
/// satisfy the wait; it has to be touched again.
pub async fn wait_for_update(path: &Path, interval: Duration, timeout: Duration) -> WaitOutcome {
    let baseline = SystemTime::now();
    let mut elapsed = Duration::ZERO;
    while !modified_after(path, baseline) {
        sleep(interval).await;
        elapsed += interval;
        if elapsed > timeout {
            warn!(path = %path.display(), "wait for update timed out");
            return WaitOutcome::TimedOut;
        }
    }
    WaitOutcome::Ok
}

/// Poll until `path` no longer exists. Same cadence and ceiling as the
/// existence wait; used for watching the mode lock file go away.
pub async fn wait_for_absence(path: &Path, interval: Duration, timeout: Duration) -> WaitOutcome {
    let mut elapsed = Duration::ZERO;
    while path.exists() {
        sleep(interval).await;
        elapsed += interval;
        if elapsed > timeout {
            warn!(path = %path.display(), "wait for removal timed out");
            return WaitOutcome::TimedOut;
        }
    }
    WaitOutcome::Ok
}

fn modified_after(path: &Path, baseline: SystemTime) -> bool {
    match std::fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(mtime) => mtime > baseline,
        Err(_) => false,
    }
}
