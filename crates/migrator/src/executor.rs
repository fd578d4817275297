// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`MigrationExecutor`]: the seam between planned DDL operations and a
//! live database (spec.md §1 scope note, SPEC_FULL §4.D). The migrator
//! itself never assumes a live SQL connection; a deployment wires in an
//! executor backed by `sqlx`/`tokio-postgres`.

use crate::types::MigrationOp;
use async_trait::async_trait;
use parking_lot::Mutex;

/// Raised by a [`MigrationExecutor`] when a single operation within an
/// `apply` transaction fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("operation {index} against table '{table}' failed: {message}")]
pub struct ExecutorError {
    pub index: usize,
    pub table: String,
    pub message: String,
}

/// Runs a batch of [`MigrationOp`]s inside one transaction boundary.
/// Implementations MUST apply operations in order and stop at the first
/// failure (spec.md §4.D: "Operations execute in order inside a single
/// transaction").
#[async_trait]
pub trait MigrationExecutor: Send + Sync {
    async fn apply(&self, ops: &[MigrationOp]) -> Result<(), ExecutorError>;

    /// Row count affected by the last successful `apply`, used to
    /// populate `MigrationResult::rows_affected`. Default: `0`.
    fn rows_affected(&self) -> u64 {
        0
    }
}

/// Dry-run executor: records every operation it was asked to run and
/// always succeeds. Used in tests and on hosts with no database
/// (spec.md SPEC_FULL §4.D).
#[derive(Default)]
pub struct NullMigrationExecutor {
    applied: Mutex<Vec<MigrationOp>>,
}

impl NullMigrationExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied_ops(&self) -> Vec<MigrationOp> {
        self.applied.lock().clone()
    }
}

#[async_trait]
impl MigrationExecutor for NullMigrationExecutor {
    async fn apply(&self, ops: &[MigrationOp]) -> Result<(), ExecutorError> {
        self.applied.lock().extend_from_slice(ops);
        Ok(())
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
