// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn defaults_apply_when_env_is_unset() {
    for key in [
        "AGENTCORE_STATE_DIR",
        "AGENTCORE_REGISTRY_WAL",
        "AGENTCORE_LOG_STREAM_NAME",
        "AGENTCORE_LOG_STREAM_MAX_LEN",
        "AGENTCORE_MAX_EXECUTION_TIME_S",
        "AGENTCORE_PIPELINE_DEFAULT_RETRIES",
        "AGENTCORE_PIPELINE_DEFAULT_TIMEOUT_S",
        "AGENTCORE_MIGRATOR_CONFIRM_DESTRUCTIVE_DEFAULT",
        "AGENTCORE_EXECUTOR_CANCEL_GRACE_S",
    ] {
        std::env::remove_var(key);
    }

    let config = Config::from_env();
    assert_eq!(config.log_stream_name, "agentcore");
    assert_eq!(config.log_stream_max_len, 10_000);
    assert_eq!(config.pipeline_default_retries, 0);
    assert!(!config.migrator_confirm_destructive_default);
}

#[test]
#[serial]
fn explicit_env_vars_override_defaults() {
    std::env::set_var("AGENTCORE_LOG_STREAM_NAME", "custom-stream");
    std::env::set_var("AGENTCORE_LOG_STREAM_MAX_LEN", "42");
    std::env::set_var("AGENTCORE_MIGRATOR_CONFIRM_DESTRUCTIVE_DEFAULT", "true");

    let config = Config::from_env();
    assert_eq!(config.log_stream_name, "custom-stream");
    assert_eq!(config.log_stream_max_len, 42);
    assert!(config.migrator_confirm_destructive_default);

    std::env::remove_var("AGENTCORE_LOG_STREAM_NAME");
    std::env::remove_var("AGENTCORE_LOG_STREAM_MAX_LEN");
    std::env::remove_var("AGENTCORE_MIGRATOR_CONFIRM_DESTRUCTIVE_DEFAULT");
}
