// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors an Agent Runner invocation can surface to its caller (spec.md
//! §7 "Propagation policy": validation and lookup errors return to the
//! caller at the Runner boundary; pipeline-internal errors are captured
//! in the per-step log and surfaced as a single terminal outcome).

use agentcore_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("unknown agent type '{type_name}' version {version:?}")]
    UnknownType {
        type_name: String,
        version: Option<String>,
    },
    #[error("input invalid: {0}")]
    InputInvalid(String),
    #[error("output invalid: {0}")]
    OutputInvalid(String),
    #[error("failed to build tool '{tool}': {message}")]
    ToolBuildFailed { tool: String, message: String },
    #[error(transparent)]
    Core(#[from] CoreError),
}
