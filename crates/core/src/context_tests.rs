// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn merge_data_is_last_writer_wins() {
    let mut ctx = ExecutionContext::new("t1", "a1", "greeter", 0);
    ctx.merge_data(Map::from_iter([("k".to_string(), json!(1))]));
    ctx.merge_data(Map::from_iter([("k".to_string(), json!(2))]));
    assert_eq!(ctx.data.get("k"), Some(&json!(2)));
}

#[test]
fn step_record_starts_unfinished() {
    let record = StepRecord::started("extract", 10);
    assert_eq!(record.attempts, 0);
    assert!(!record.success);
    assert!(record.ended_at.is_none());
}
