// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `apply()` / `drop_for_agent()` (spec.md §4.D).

use crate::error::MigratorError;
use crate::executor::MigrationExecutor;
use crate::locks::AdvisoryLocks;
use crate::plan::MigrationPlan;
use crate::types::MigrationOp;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    pub applied: Vec<MigrationOp>,
    pub rollback_performed: bool,
    pub rows_affected: u64,
}

/// Apply `plan` via `executor`, serialized per `agent_type_id` through
/// `locks` (spec.md §5). Refuses to run when the plan has destructive
/// operations and `confirm_destructive` is false.
pub async fn apply(
    plan: &MigrationPlan,
    confirm_destructive: bool,
    executor: &dyn MigrationExecutor,
    locks: &AdvisoryLocks,
) -> Result<MigrationResult, MigratorError> {
    if plan.has_destructive_ops() && !confirm_destructive {
        return Err(MigratorError::Destructive);
    }

    let _guard = locks.acquire(&plan.agent_type_id).await;

    match executor.apply(&plan.operations).await {
        Ok(()) => Ok(MigrationResult {
            applied: plan.operations.clone(),
            rollback_performed: false,
            rows_affected: executor.rows_affected(),
        }),
        Err(failed) => {
            error!(
                agent_type_id = %plan.agent_type_id,
                index = failed.index,
                table = %failed.table,
                "migration operation failed"
            );

            let completed = &plan.operations[..failed.index];
            if completed.iter().any(|op| matches!(op, MigrationOp::DropTable { .. })) {
                warn!(
                    agent_type_id = %plan.agent_type_id,
                    "rollback impossible: a drop_table already executed"
                );
                return Err(MigratorError::Failed {
                    message: failed.message,
                    rollback_performed: false,
                });
            }

            let rollback_ops: Vec<MigrationOp> =
                completed.iter().rev().filter_map(MigrationOp::inverse).collect();
            let rollback_performed = executor.apply(&rollback_ops).await.is_ok();

            Err(MigratorError::Failed {
                message: failed.message,
                rollback_performed,
            })
        }
    }
}

/// Drop every managed table for `agent_type_id` (spec.md §4.D
/// `drop_for_agent`).
pub async fn drop_for_agent(
    agent_type_id: &str,
    tables: &[String],
    confirm: bool,
    executor: &dyn MigrationExecutor,
    locks: &AdvisoryLocks,
) -> Result<MigrationResult, MigratorError> {
    if !confirm && !tables.is_empty() {
        return Err(MigratorError::Destructive);
    }
    let plan = MigrationPlan {
        agent_type_id: agent_type_id.to_string(),
        operations: tables
            .iter()
            .map(|table| MigrationOp::DropTable {
                table: table.clone(),
            })
            .collect(),
        warnings: Vec::new(),
    };
    apply(&plan, confirm, executor, locks).await
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
