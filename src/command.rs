//! Shell command execution with captured output.
//!
//! All mode lifecycle actions are external commands; the exit code and the
//! captured output are the only feedback channel.

use anyhow::{bail, Context, Result};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Run a shell command line, capturing its output. `envs` are exported into
/// the child environment.
pub async fn run_shell(command: &str, envs: &[(&str, String)]) -> Result<Output> {
    debug!(command, "running shell command");
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd.output()
        .await
        .with_context(|| format!("executing '{}'", command))
}

/// Run a shell command line and fail on non-zero exit. The error message
/// carries the exit code and whatever the command printed.
pub async fn run_checked(label: &str, command: &str, envs: &[(&str, String)]) -> Result<()> {
    let output = run_shell(command, envs).await?;
    if output.status.success() {
        return Ok(());
    }
    let code = output
        .status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    bail!(
        "{} command failed with exit code {}:\n{}{}",
        label,
        code,
        stdout,
        stderr
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_checked_success() {
        run_checked("test", "true", &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_checked_failure_carries_exit_code() {
        let err = run_checked("test", "echo oops; exit 3", &[])
            .await
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("exit code 3"), "got: {}", message);
        assert!(message.contains("oops"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_run_shell_env_passthrough() {
        let envs = [("FRAMECTL_TEST_VALUE", "marker".to_string())];
        let output = run_shell("printf '%s' \"$FRAMECTL_TEST_VALUE\"", &envs)
            .await
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout), "marker");
    }
}
