// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ExecutionContext` and `StepRecord` (spec.md §3), the per-task state
//! threaded through the Pipeline Executor and the Tool contract. Lives in
//! `agentcore-core` (rather than the engine) because both
//! `agentcore-tools` and `agentcore-engine` need it without a circular
//! dependency.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record of a single step's execution (spec.md §3 "StepRecord").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step_name: String,
    pub started_at: u64,
    pub ended_at: Option<u64>,
    pub success: bool,
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CoreError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl StepRecord {
    pub fn started(step_name: impl Into<String>, started_at: u64) -> Self {
        Self {
            step_name: step_name.into(),
            started_at,
            ended_at: None,
            success: false,
            attempts: 0,
            error: None,
            result: None,
        }
    }
}

/// Per-task execution state (spec.md §3 "ExecutionContext").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub task_id: String,
    pub agent_id: String,
    pub agent_type: String,
    pub start_time: u64,
    pub data: Map<String, Value>,
    pub step_log: Vec<StepRecord>,
}

impl ExecutionContext {
    pub fn new(
        task_id: impl Into<String>,
        agent_id: impl Into<String>,
        agent_type: impl Into<String>,
        start_time: u64,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            agent_id: agent_id.into(),
            agent_type: agent_type.into(),
            start_time,
            data: Map::new(),
            step_log: Vec::new(),
        }
    }

    /// Merge `updates` into `self.data`, last-writer-wins per key
    /// (spec.md §4.G: "merged key-wise ... last-writer-wins within a level").
    pub fn merge_data(&mut self, updates: Map<String, Value>) {
        for (k, v) in updates {
            self.data.insert(k, v);
        }
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
