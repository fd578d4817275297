// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn null_executor_records_and_succeeds() {
    let executor = NullMigrationExecutor::new();
    let ops = vec![MigrationOp::CreateTable {
        table: "widgets".into(),
        columns: vec![],
    }];
    executor.apply(&ops).await.unwrap();
    assert_eq!(executor.applied_ops(), ops);
}
