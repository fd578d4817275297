// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline Executor (spec.md §4.G): drives a [`PipelinePlan`] level by
//! level, running each level concurrently (via `JoinSet`) when the
//! pipeline allows it, retrying retriable step failures with backoff,
//! and honoring a [`CancellationToken`] threaded down from the Agent
//! Runner.

use crate::planner::PipelinePlan;
use agentcore_core::{CoreError, ErrorKind, ExecutionContext, StepRecord};
use agentcore_schema::{Pipeline, RetryConfig, StepDef};
use agentcore_tools::{Tool, ToolError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// How a pipeline run ended (spec.md §4.G "State machine per step" and
/// §7's `step_failed`/`cancelled` terminal kinds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed { step_name: String },
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ExecuteOutcome {
    pub step_results: Map<String, Value>,
    pub execution_log: Vec<StepRecord>,
    pub final_data: Map<String, Value>,
    pub total_time_s: f64,
    pub outcome: RunOutcome,
}

struct StepOutcome {
    record: StepRecord,
    result: Option<Value>,
}

fn merged_input(data: &Map<String, Value>, step: &StepDef) -> Value {
    let mut merged = data.clone();
    for (k, v) in &step.config {
        merged.insert(k.clone(), v.clone());
    }
    Value::Object(merged)
}

/// Maps a tool-raised error onto its core kind plus whether *this
/// occurrence* should be retried. `denied` (a pre-call policy rejection —
/// spec.md §7) is the only case that becomes `ErrorKind::Denied`; any
/// other raise stays `ErrorKind::ToolError`, retried only if the tool
/// marked it `retriable`.
fn classify_tool_error(err: &ToolError) -> (ErrorKind, bool) {
    if err.denied {
        (ErrorKind::Denied, false)
    } else {
        (ErrorKind::ToolError, err.retriable)
    }
}

/// Run one step to exhaustion of its retry budget, honoring `cancel`. A
/// step already in flight when `cancel` fires is given up to
/// `cancel_grace` to finish cooperatively (spec.md §4.G) before being
/// force-marked `Cancelled`.
async fn run_step(
    step: StepDef,
    pipeline_defaults: (u32, Option<Duration>),
    tool: Arc<dyn Tool>,
    data: Map<String, Value>,
    ctx_meta: ExecutionContext,
    now_s: impl Fn() -> u64 + Send + 'static,
    cancel: CancellationToken,
    cancel_grace: Duration,
) -> StepOutcome {
    let retry = step.retry_config.unwrap_or(RetryConfig {
        max_retries: pipeline_defaults.0,
        delay_s: 0.0,
        exponential_backoff: false,
    });
    let timeout = step
        .timeout_seconds
        .map(Duration::from_secs)
        .or(pipeline_defaults.1);

    let mut record = StepRecord::started(step.name.clone(), now_s());
    let input = merged_input(&data, &step);

    for attempt in 1..=(retry.max_retries + 1) {
        record.attempts = attempt;

        if cancel.is_cancelled() {
            record.ended_at = Some(now_s());
            record.success = false;
            record.error = Some(CoreError::new(ErrorKind::Cancelled, "cancelled before start")
                .with_step(step.name.clone()));
            return StepOutcome { record, result: None };
        }

        let invocation = tool.execute(input.clone(), &ctx_meta);
        let mut invocation = Box::pin(run_with_optional_timeout(invocation, timeout));
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                match tokio::time::timeout(cancel_grace, &mut invocation).await {
                    Ok(res) => res,
                    Err(_) => Err((CoreError::new(ErrorKind::Cancelled, "cancelled mid-flight; exceeded grace period").with_step(step.name.clone()), false)),
                }
            }
            res = &mut invocation => res,
        };

        match outcome {
            Ok(value) => {
                record.ended_at = Some(now_s());
                record.success = true;
                record.error = None;
                return StepOutcome {
                    record,
                    result: Some(value),
                };
            }
            Err((err, retriable)) => {
                let is_last_attempt = attempt == retry.max_retries + 1;
                if !retriable || is_last_attempt {
                    record.ended_at = Some(now_s());
                    record.success = false;
                    record.error = Some(err);
                    return StepOutcome { record, result: None };
                }

                let backoff = if retry.exponential_backoff {
                    retry.delay_s * 2f64.powi(attempt as i32)
                } else {
                    retry.delay_s
                };
                if backoff > 0.0 {
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            record.ended_at = Some(now_s());
                            record.success = false;
                            record.error = Some(CoreError::new(ErrorKind::Cancelled, "cancelled during retry backoff").with_step(step.name.clone()));
                            return StepOutcome { record, result: None };
                        }
                        _ = tokio::time::sleep(Duration::from_secs_f64(backoff)) => {}
                    }
                }
            }
        }
    }

    unreachable!("loop always returns by the final attempt")
}

/// Merge one step's outcome into the running `data`/`step_results`/
/// `execution_log`, returning `Some((cancelled, step_name))` if the step
/// failed and the pipeline must stop.
fn apply_step_outcome(
    outcome: StepOutcome,
    data: &mut Map<String, Value>,
    step_results: &mut Map<String, Value>,
    execution_log: &mut Vec<StepRecord>,
) -> Option<(bool, String)> {
    let name = outcome.record.step_name.clone();
    let failed = !outcome.record.success;
    let cancelled = outcome
        .record
        .error
        .as_ref()
        .map(|e| e.kind == ErrorKind::Cancelled)
        .unwrap_or(false);

    if let Some(result) = &outcome.result {
        step_results.insert(name.clone(), result.clone());
        if let Value::Object(writes) = result {
            for (k, v) in writes {
                data.insert(k.clone(), v.clone());
            }
        }
    }
    execution_log.push(outcome.record);

    if failed {
        Some((cancelled, name))
    } else {
        None
    }
}

/// Runs `fut` with an optional timeout. The `bool` alongside an `Err` is
/// whether this specific occurrence should be retried — timeouts always
/// are (per spec.md §7); tool raises follow [`classify_tool_error`], which
/// a fatal-but-not-denied raise can override to `false` even though
/// `tool_error` is retriable in general.
async fn run_with_optional_timeout(
    fut: impl std::future::Future<Output = Result<Value, ToolError>>,
    timeout: Option<Duration>,
) -> Result<Value, (CoreError, bool)> {
    match timeout {
        Some(d) => match tokio::time::timeout(d, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => {
                let (kind, retriable) = classify_tool_error(&e);
                Err((CoreError::new(kind, e.message), retriable))
            }
            Err(_) => Err((CoreError::new(ErrorKind::Timeout, "step exceeded its timeout"), true)),
        },
        None => fut.await.map_err(|e| {
            let (kind, retriable) = classify_tool_error(&e);
            (CoreError::new(kind, e.message), retriable)
        }),
    }
}

/// Run `plan` to completion or to the first terminal failure/cancellation
/// (spec.md §4.G public contract: `execute(plan, input, context) ->
/// {step_results, execution_log, final_data, total_time_s}`).
pub async fn execute(
    plan: &PipelinePlan,
    pipeline: &Pipeline,
    steps_by_name: &HashMap<String, StepDef>,
    tools: &HashMap<String, Arc<dyn Tool>>,
    initial_data: Map<String, Value>,
    ctx_meta: &ExecutionContext,
    now_s: impl Fn() -> u64 + Clone + Send + 'static,
    cancel: CancellationToken,
    cancel_grace: Duration,
) -> Result<ExecuteOutcome, CoreError> {
    let start = now_s();
    let mut data = initial_data;
    let mut step_results = Map::new();
    let mut execution_log = Vec::new();

    'levels: for level in &plan.levels {
        if cancel.is_cancelled() {
            return Ok(ExecuteOutcome {
                step_results,
                execution_log,
                final_data: data,
                total_time_s: (now_s().saturating_sub(start)) as f64,
                outcome: RunOutcome::Cancelled,
            });
        }

        // Steps run concurrently only observe each other's writes once the
        // whole level has finished (they raced off the same snapshot).
        // Steps run one after another in plan order have no such race, so
        // each one sees every earlier step's writes, including ones from
        // earlier in this same level.
        if pipeline.parallel_execution && level.len() > 1 {
            let mut join_set: JoinSet<StepOutcome> = JoinSet::new();
            for name in level {
                let step = steps_by_name
                    .get(name)
                    .ok_or_else(|| CoreError::new(ErrorKind::Internal, format!("plan references unknown step '{name}'")))?
                    .clone();
                let tool = tools
                    .get(&step.tool)
                    .ok_or_else(|| CoreError::new(ErrorKind::Internal, format!("step '{name}' references unknown tool '{}'", step.tool)))?
                    .clone();
                let defaults = (pipeline.max_retries, pipeline.timeout_seconds.map(Duration::from_secs));
                let data_snapshot = data.clone();
                let ctx_clone = ctx_meta.clone();
                let now_s = now_s.clone();
                let cancel = cancel.clone();
                join_set.spawn(run_step(step, defaults, tool, data_snapshot, ctx_clone, now_s, cancel, cancel_grace));
            }
            let mut level_outcomes = Vec::with_capacity(level.len());
            while let Some(joined) = join_set.join_next().await {
                let outcome = joined.map_err(|e| CoreError::new(ErrorKind::Internal, format!("step task panicked: {e}")))?;
                level_outcomes.push(outcome);
            }
            level_outcomes.sort_by(|a, b| a.record.step_name.cmp(&b.record.step_name));

            for outcome in level_outcomes {
                if let Some((cancelled, step_name)) = apply_step_outcome(outcome, &mut data, &mut step_results, &mut execution_log) {
                    let total_time_s = (now_s().saturating_sub(start)) as f64;
                    return Ok(ExecuteOutcome {
                        step_results,
                        execution_log,
                        final_data: data,
                        total_time_s,
                        outcome: if cancelled { RunOutcome::Cancelled } else { RunOutcome::Failed { step_name } },
                    });
                }
            }
        } else {
            for name in level {
                let step = steps_by_name
                    .get(name)
                    .ok_or_else(|| CoreError::new(ErrorKind::Internal, format!("plan references unknown step '{name}'")))?
                    .clone();
                let tool = tools
                    .get(&step.tool)
                    .ok_or_else(|| CoreError::new(ErrorKind::Internal, format!("step '{name}' references unknown tool '{}'", step.tool)))?
                    .clone();
                let defaults = (pipeline.max_retries, pipeline.timeout_seconds.map(Duration::from_secs));
                let outcome = run_step(step, defaults, tool, data.clone(), ctx_meta.clone(), now_s.clone(), cancel.clone(), cancel_grace).await;

                if let Some((cancelled, step_name)) = apply_step_outcome(outcome, &mut data, &mut step_results, &mut execution_log) {
                    let total_time_s = (now_s().saturating_sub(start)) as f64;
                    return Ok(ExecuteOutcome {
                        step_results,
                        execution_log,
                        final_data: data,
                        total_time_s,
                        outcome: if cancelled { RunOutcome::Cancelled } else { RunOutcome::Failed { step_name } },
                    });
                }
            }
        }

        if cancel.is_cancelled() {
            break 'levels;
        }
    }

    let total_time_s = (now_s().saturating_sub(start)) as f64;
    let outcome = if cancel.is_cancelled() {
        RunOutcome::Cancelled
    } else {
        RunOutcome::Completed
    };
    Ok(ExecuteOutcome {
        step_results,
        execution_log,
        final_data: data,
        total_time_s,
        outcome,
    })
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
