// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent Runner (spec.md §4.I): binds a concrete task to a registered
//! schema, running steps 1-8 of the spec in order.

use crate::error::RunnerError;
use crate::executor::{self, RunOutcome};
use crate::logbus::{LogBus, LogEvent};
use crate::planner;
use agentcore_core::{CoreError, ErrorKind, ExecutionContext, StepRecord};
use agentcore_registry::SchemaRegistry;
use agentcore_schema::validate_fields;
use agentcore_tools::{RateLimitedTool, RateLimiter, Tool, ToolRegistry};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Optional collaborator invoked at Runner step 7 (spec.md §6
/// "Persistence collaborator"). Failures here are logged, never fail
/// the task.
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn save(&self, agent_type_id: &str, model_name: &str, rows: Vec<Value>) -> Result<(), String>;
}

pub struct NullPersistenceSink;

#[async_trait]
impl PersistenceSink for NullPersistenceSink {
    async fn save(&self, _agent_type_id: &str, _model_name: &str, _rows: Vec<Value>) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum TaskResult {
    Ok {
        output: Value,
        per_step_log: Vec<StepRecord>,
    },
    Err {
        error: CoreError,
        step_name: Option<String>,
        per_step_log: Vec<StepRecord>,
    },
}

pub struct AgentRunner<'a> {
    pub registry: &'a SchemaRegistry,
    pub tool_registry: &'a ToolRegistry,
    pub log_bus: &'a LogBus,
    pub persistence: &'a dyn PersistenceSink,
    /// Grace window an in-flight step is given to finish cooperatively
    /// after cancellation before being force-marked `Cancelled`
    /// (spec.md §4.G, `Config::executor_cancel_grace_s`).
    pub cancel_grace: Duration,
}

impl<'a> AgentRunner<'a> {
    fn build_tools(
        &self,
        schema: &agentcore_schema::Schema,
        tool_overrides: &HashMap<String, Map<String, Value>>,
    ) -> Result<HashMap<String, Arc<dyn Tool>>, RunnerError> {
        let mut built = HashMap::new();
        for (name, tool_def) in &schema.tools {
            let overrides = tool_overrides.get(name);
            let tool = self
                .tool_registry
                .build(tool_def, overrides)
                .map_err(|e| RunnerError::ToolBuildFailed {
                    tool: name.clone(),
                    message: e.to_string(),
                })?;

            let tool: Arc<dyn Tool> = match tool_def.rate_limit.as_deref().and_then(agentcore_tools::parse_rate_limit) {
                Some(limit) => Arc::new(RateLimitedTool::new(tool, RateLimiter::new(limit))),
                None => tool,
            };
            built.insert(name.clone(), tool);
        }
        Ok(built)
    }

    /// Run steps 1-8 of spec.md §4.I for one task.
    #[allow(clippy::too_many_arguments)]
    pub async fn run(
        &self,
        type_name: &str,
        version: Option<&str>,
        task_id: String,
        agent_id: String,
        user_id: Option<String>,
        input: Value,
        tool_overrides: HashMap<String, Map<String, Value>>,
        now_s: impl Fn() -> u64 + Clone + Send + 'static,
        cancel: CancellationToken,
    ) -> Result<TaskResult, RunnerError> {
        // 1. Look up schema.
        let agent_type = self
            .registry
            .get(type_name, version)
            .await
            .ok_or_else(|| RunnerError::UnknownType {
                type_name: type_name.to_string(),
                version: version.map(str::to_string),
            })?;
        let schema = &agent_type.schema;

        // 2. Build tools.
        let tools = self.build_tools(schema, &tool_overrides)?;

        // 3. Validate input.
        let input_map = match input {
            Value::Object(m) => m,
            other => {
                let mut m = Map::new();
                m.insert("value".to_string(), other);
                m
            }
        };
        let validated_input = validate_fields(&schema.input_fields, &input_map)
            .map_err(|errors| RunnerError::InputInvalid(errors.join("; ")))?;

        // 4. Build ExecutionContext.
        let start_time = now_s();
        let mut ctx = ExecutionContext::new(task_id.clone(), agent_id.clone(), type_name.to_string(), start_time);
        ctx.data = validated_input;
        ctx.data.insert("agent_id".to_string(), Value::String(agent_id.clone()));
        ctx.data.insert("task_id".to_string(), Value::String(task_id.clone()));
        ctx.data.insert("agent_type".to_string(), Value::String(type_name.to_string()));
        ctx.data.insert("start_time".to_string(), Value::from(start_time));

        // 5. Execute pipeline.
        let plan = planner::plan(&schema.pipeline)?;
        let steps_by_name: HashMap<String, _> = schema
            .pipeline
            .steps
            .iter()
            .map(|s| (s.name.clone(), s.clone()))
            .collect();

        let outcome = executor::execute(
            &plan,
            &schema.pipeline,
            &steps_by_name,
            &tools,
            ctx.data.clone(),
            &ctx,
            now_s.clone(),
            cancel,
            self.cancel_grace,
        )
        .await?;

        for tool in tools.values() {
            tool.cleanup().await;
        }

        let result = match outcome.outcome {
            RunOutcome::Completed => {
                // 6. Validate combined output (final_data already folds in
                // every step's map-shaped result, since the executor merges
                // those as it goes).
                let output_map = validate_fields(&schema.output_fields, &outcome.final_data)
                    .map_err(|errors| RunnerError::OutputInvalid(errors.join("; ")))?;

                // 7. Offer to the persistence collaborator.
                if !schema.data_models.is_empty() {
                    let row = Value::Object(output_map.clone());
                    for model_name in schema.data_models.keys() {
                        if let Err(e) = self
                            .persistence
                            .save(&agent_type.type_name, model_name, vec![row.clone()])
                            .await
                        {
                            warn!(type_name = %type_name, model_name, error = %e, "persistence failed; task outcome unaffected");
                        }
                    }
                }

                TaskResult::Ok {
                    output: Value::Object(output_map),
                    per_step_log: outcome.execution_log,
                }
            }
            RunOutcome::Failed { step_name } => {
                let error = outcome
                    .execution_log
                    .iter()
                    .rev()
                    .find(|r| r.step_name == step_name)
                    .and_then(|r| r.error.clone())
                    .unwrap_or_else(|| CoreError::new(ErrorKind::StepFailed, "step failed").with_step(step_name.clone()));
                TaskResult::Err {
                    error,
                    step_name: Some(step_name),
                    per_step_log: outcome.execution_log,
                }
            }
            RunOutcome::Cancelled => TaskResult::Err {
                error: CoreError::new(ErrorKind::Cancelled, "task cancelled"),
                step_name: None,
                per_step_log: outcome.execution_log,
            },
        };

        // 8. Emit a terminal event through the log bus.
        let (kind, payload) = match &result {
            TaskResult::Ok { output, .. } => (
                "task_completed",
                serde_json::json!({"task_id": task_id, "agent_type": type_name, "output": output}),
            ),
            TaskResult::Err { error, step_name, .. } => (
                if error.kind == ErrorKind::Cancelled { "task_cancelled" } else { "task_failed" },
                serde_json::json!({"task_id": task_id, "agent_type": type_name, "error": error.to_string(), "step_name": step_name}),
            ),
        };
        self.log_bus.publish(
            LogEvent {
                stream_id: 0,
                user_id,
                scope: "task".to_string(),
                kind: kind.to_string(),
                payload,
                published_at: 0,
            },
            now_s(),
        );

        Ok(result)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
