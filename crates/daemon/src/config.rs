// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, assembled from environment variables
//! (spec.md §6 "Configuration (recognized options)").

use std::path::PathBuf;

/// Resolve the state directory: `AGENTCORE_STATE_DIR` >
/// `XDG_STATE_HOME/agentcore` > `~/.local/state/agentcore`.
fn state_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("AGENTCORE_STATE_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join("agentcore");
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/state/agentcore")
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// The options enumerated in spec.md §6's "Configuration" block, plus
/// the on-disk location of the Schema Registry's WAL.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the Schema Registry's write-ahead log lives.
    pub registry_wal_path: PathBuf,
    /// Name of the durable log stream (spec.md §4.H).
    pub log_stream_name: String,
    /// Soft upper bound on retained log events before older ones age out.
    pub log_stream_max_len: usize,
    /// Default task wall-clock ceiling, used when a schema omits
    /// `limits.max_execution_time_s`.
    pub max_execution_time_s: u64,
    /// Pipeline-level retry default applied when a schema's pipeline
    /// omits `max_retries`.
    pub pipeline_default_retries: u32,
    /// Pipeline-level timeout default applied when a schema's pipeline
    /// omits `timeout_seconds`.
    pub pipeline_default_timeout_s: u64,
    /// Default for the migrator's `confirm_destructive` parameter when
    /// a caller does not supply one explicitly.
    pub migrator_confirm_destructive_default: bool,
    /// Grace window given to in-flight tool calls after a cancellation
    /// is requested before the executor gives up waiting on them.
    pub executor_cancel_grace_s: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Config {
    /// Load configuration from the environment, falling back to the
    /// defaults documented in spec.md §6.
    pub fn from_env() -> Self {
        Self {
            registry_wal_path: std::env::var("AGENTCORE_REGISTRY_WAL")
                .map(PathBuf::from)
                .unwrap_or_else(|_| state_dir().join("registry.wal")),
            log_stream_name: std::env::var("AGENTCORE_LOG_STREAM_NAME")
                .unwrap_or_else(|_| "agentcore".to_string()),
            log_stream_max_len: env_u64("AGENTCORE_LOG_STREAM_MAX_LEN", 10_000) as usize,
            max_execution_time_s: env_u64("AGENTCORE_MAX_EXECUTION_TIME_S", 300),
            pipeline_default_retries: env_u64("AGENTCORE_PIPELINE_DEFAULT_RETRIES", 0) as u32,
            pipeline_default_timeout_s: env_u64("AGENTCORE_PIPELINE_DEFAULT_TIMEOUT_S", 30),
            migrator_confirm_destructive_default: env_bool(
                "AGENTCORE_MIGRATOR_CONFIRM_DESTRUCTIVE_DEFAULT",
                false,
            ),
            executor_cancel_grace_s: env_u64("AGENTCORE_EXECUTOR_CANCEL_GRACE_S", 5),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
