// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Tool contract (spec.md §6).

use agentcore_core::ExecutionContext;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A tool-raised failure. `kind` is the tool's own error tag (not a core
/// [`agentcore_core::ErrorKind`] — the executor wraps this into one at the
/// step boundary). `retriable` lets a tool override the default
/// retry-on-`tool_error` policy (original_source's explicit
/// retryable-vs-fatal distinction). `denied` marks a pre-call policy
/// rejection (rate limit, domain allowlist) rather than a raise from the
/// tool's own logic — the executor maps only this case to spec.md §7's
/// `denied` kind; any other fatal raise stays `tool_error`, just not
/// retried.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct ToolError {
    pub kind: String,
    pub message: String,
    #[serde(default = "default_retriable")]
    pub retriable: bool,
    #[serde(default)]
    pub denied: bool,
}

fn default_retriable() -> bool {
    true
}

impl ToolError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            retriable: true,
            denied: false,
        }
    }

    /// A fatal raise from the tool itself: not retried, but still a
    /// `tool_error`, not a policy `denied`.
    pub fn fatal(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            retriable: false,
            denied: false,
        }
    }

    /// A pre-call policy rejection (spec.md §7 `denied`): never retried,
    /// and never reaches the wrapped tool.
    pub fn denied(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            retriable: false,
            denied: true,
        }
    }
}

/// JSON-schema-style declaration of a tool's shape, used for documentation
/// and for per-step configuration validation at schema admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub input_fields: Value,
    pub output_fields: Value,
    pub config_fields: Value,
}

/// A pluggable capability invoked by a pipeline step. Instances are
/// constructed fresh per pipeline execution (spec.md §5) and are owned
/// exclusively by the executor for the duration of one task.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Run the tool against the merged step input (context data + step
    /// config). Returns a map or scalar value; a map is merged key-wise
    /// into `ctx.data` by the caller.
    async fn execute(&self, input: Value, ctx: &ExecutionContext) -> Result<Value, ToolError>;

    fn describe(&self) -> ToolSchema;

    /// Default: passthrough. Tools that need stricter input checking can
    /// override.
    fn validate_input(&self, input: Value) -> Result<Value, ToolError> {
        Ok(input)
    }

    /// Invoked after the task terminates, regardless of outcome. Default:
    /// no-op.
    async fn cleanup(&self) {}
}

#[cfg(test)]
#[path = "tool_tests.rs"]
mod tests;
