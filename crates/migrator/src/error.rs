// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigratorError {
    #[error("migration contains destructive operations; retry with confirm=true")]
    Destructive,
    #[error("migration failed: {message} (rollback_performed={rollback_performed})")]
    Failed {
        message: String,
        rollback_performed: bool,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
