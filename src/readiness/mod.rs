pub mod file;

pub use file::{wait_for_absence, wait_for_existence, wait_for_update};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Outcome of a bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ok,
    TimedOut,
}

/// Readiness requirement of a mode: an externally observable condition
/// indicating the mode process has finished starting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReadinessSpec {
    File { path: PathBuf },
    Socket { host: String, port: u16 },
}

impl fmt::Display for ReadinessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessSpec::File { path } => write!(f, "file={}", path.display()),
            ReadinessSpec::Socket { host, port } => write!(f, "socket={}:{}", host, port),
        }
    }
}

/// Resolve one content segment of a wait_for entry: the environment
/// variable's value if the segment names one that is set, else the literal.
fn resolve_env(segment: &str) -> String {
    std::env::var(segment).unwrap_or_else(|_| segment.to_string())
}

/// Parse a `wait_for` entry of the form "type=content".
///
/// Content segments are env-resolved at parse time, so a configuration can
/// say `file=DPF_IMAGE_LIST_FILE` and follow the deployment's environment.
pub fn parse_readiness(raw: &str) -> Result<ReadinessSpec> {
    let Some((kind, content)) = raw.split_once('=') else {
        bail!("invalid wait_for entry '{}': expected type=content", raw);
    };
    match kind {
        "file" => Ok(ReadinessSpec::File {
            path: PathBuf::from(resolve_env(content)),
        }),
        "socket" => {
            let Some((host, port)) = content.split_once(':') else {
                bail!("invalid wait_for entry '{}': expected socket=host:port", raw);
            };
            let host = resolve_env(host);
            let port = resolve_env(port);
            let port: u16 = port
                .parse()
                .with_context(|| format!("invalid port '{}' in wait_for entry '{}'", port, raw))?;
            Ok(ReadinessSpec::Socket { host, port })
        }
        other => bail!("invalid wait_for type '{}' in entry '{}'", other, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file_literal() {
        let spec = parse_readiness("file=/tmp/filelist.txt").unwrap();
        assert_eq!(
            spec,
            ReadinessSpec::File {
                path: PathBuf::from("/tmp/filelist.txt")
            }
        );
    }

    #[test]
    fn test_parse_file_resolves_env_var() {
        std::env::set_var("FRAMECTL_TEST_FILELIST", "/run/framectl/filelist.txt");
        let spec = parse_readiness("file=FRAMECTL_TEST_FILELIST").unwrap();
        assert_eq!(
            spec,
            ReadinessSpec::File {
                path: PathBuf::from("/run/framectl/filelist.txt")
            }
        );
    }

    #[test]
    fn test_parse_file_unset_env_var_falls_back_to_literal() {
        let spec = parse_readiness("file=FRAMECTL_TEST_UNSET_VAR").unwrap();
        assert_eq!(
            spec,
            ReadinessSpec::File {
                path: PathBuf::from("FRAMECTL_TEST_UNSET_VAR")
            }
        );
    }

    #[test]
    fn test_parse_socket() {
        let spec = parse_readiness("socket=127.0.0.1:8080").unwrap();
        assert_eq!(
            spec,
            ReadinessSpec::Socket {
                host: "127.0.0.1".to_string(),
                port: 8080
            }
        );
    }

    #[test]
    fn test_parse_socket_resolves_env_parts() {
        std::env::set_var("FRAMECTL_TEST_HOST", "frame.local");
        std::env::set_var("FRAMECTL_TEST_PORT", "9090");
        let spec = parse_readiness("socket=FRAMECTL_TEST_HOST:FRAMECTL_TEST_PORT").unwrap();
        assert_eq!(
            spec,
            ReadinessSpec::Socket {
                host: "frame.local".to_string(),
                port: 9090
            }
        );
    }

    #[test]
    fn test_parse_socket_without_port_is_rejected() {
        assert!(parse_readiness("socket=frame.local").is_err());
    }

    #[test]
    fn test_parse_unknown_type_is_rejected() {
        assert!(parse_readiness("pipe=/tmp/ready").is_err());
    }

    #[test]
    fn test_parse_missing_separator_is_rejected() {
        assert!(parse_readiness("file").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let spec = parse_readiness("socket=localhost:80").unwrap();
        assert_eq!(spec.to_string(), "socket=localhost:80");
    }
}
