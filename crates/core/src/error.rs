// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Discriminated error kinds shared across the core (spec §7).
//!
//! Every component raises one of these variants rather than a bare string,
//! so callers can match on `kind()` instead of parsing messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The stable, matchable tag for a [`CoreError`]. Kept separate from the
/// error itself so it can be serialized into a [`crate::LogEvent`] without
/// dragging the (possibly large) message/context along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SchemaInvalid,
    IdentifierUnsafe,
    VersionExists,
    IncompatibleSchemaChange,
    MigrationDestructive,
    MigrationFailed,
    UnknownType,
    InputInvalid,
    OutputInvalid,
    ToolError,
    Timeout,
    Denied,
    StepFailed,
    Cancelled,
    Internal,
}

impl ErrorKind {
    /// Whether a step failure of this kind should be retried (spec.md §4.G:
    /// `timeout` and `tool_error` are retriable; `denied` and `internal` are not).
    pub fn is_retriable(self) -> bool {
        matches!(self, ErrorKind::Timeout | ErrorKind::ToolError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::SchemaInvalid => "schema_invalid",
            ErrorKind::IdentifierUnsafe => "identifier_unsafe",
            ErrorKind::VersionExists => "version_exists",
            ErrorKind::IncompatibleSchemaChange => "incompatible_schema_change",
            ErrorKind::MigrationDestructive => "migration_destructive",
            ErrorKind::MigrationFailed => "migration_failed",
            ErrorKind::UnknownType => "unknown_type",
            ErrorKind::InputInvalid => "input_invalid",
            ErrorKind::OutputInvalid => "output_invalid",
            ErrorKind::ToolError => "tool_error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Denied => "denied",
            ErrorKind::StepFailed => "step_failed",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// A core error: a stable [`ErrorKind`] plus a human-readable message and,
/// for pipeline failures, the offending step name.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct CoreError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_name: Option<String>,
}

impl CoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            step_name: None,
        }
    }

    pub fn with_step(mut self, step_name: impl Into<String>) -> Self {
        self.step_name = Some(step_name.into());
        self
    }

    pub fn schema_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SchemaInvalid, message)
    }

    pub fn identifier_unsafe(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IdentifierUnsafe, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
