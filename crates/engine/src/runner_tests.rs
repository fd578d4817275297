// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use agentcore_schema::{
    DataModelDef, FieldDef, FieldType, Metadata, Pipeline, Schema, StepDef, ToolDef,
};
use agentcore_tools::{ToolError, ToolFactory, ToolSchema};
use serde_json::json;
use tempfile::tempdir;

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    async fn execute(&self, input: Value, _ctx: &ExecutionContext) -> Result<Value, ToolError> {
        Ok(input)
    }
    fn describe(&self) -> ToolSchema {
        ToolSchema {
            name: "echo".into(),
            description: String::new(),
            input_fields: json!({}),
            output_fields: json!({}),
            config_fields: json!({}),
        }
    }
}

struct EchoFactory;

impl ToolFactory for EchoFactory {
    fn build(&self, _tool_def: &agentcore_schema::ToolDef, _merged_config: Value) -> Result<Arc<dyn Tool>, String> {
        Ok(Arc::new(EchoTool))
    }
    fn describe(&self) -> ToolSchema {
        EchoTool.describe()
    }
}

fn greeter_schema() -> Schema {
    let mut input_fields = indexmap::IndexMap::new();
    input_fields.insert("name".to_string(), FieldDef::required(FieldType::String));

    let mut output_fields = indexmap::IndexMap::new();
    let mut greeting = FieldDef::required(FieldType::String);
    greeting.required = false;
    output_fields.insert("name".to_string(), greeting);

    let mut tools = indexmap::IndexMap::new();
    tools.insert(
        "echo".to_string(),
        ToolDef {
            type_tag: "echo".to_string(),
            config: Default::default(),
            auth_config: None,
            rate_limit: None,
            timeout_seconds: None,
            retry_config: None,
        },
    );

    Schema {
        metadata: Metadata {
            name: "greeter".to_string(),
            description: String::new(),
            category: "demo".to_string(),
            version: "1.0.0".to_string(),
            author: None,
            tags: None,
        },
        input_fields,
        output_fields,
        data_models: indexmap::IndexMap::new(),
        tools,
        pipeline: Pipeline {
            steps: vec![StepDef {
                name: "greet".to_string(),
                tool: "echo".to_string(),
                depends_on: Vec::new(),
                config: Default::default(),
                timeout_seconds: None,
                retry_config: None,
            }],
            parallel_execution: false,
            max_retries: 0,
            timeout_seconds: None,
        },
        limits: Default::default(),
    }
}

async fn setup() -> (tempfile::TempDir, SchemaRegistry, ToolRegistry, LogBus) {
    let dir = tempdir().unwrap();
    let registry = SchemaRegistry::open(&dir.path().join("registry.wal")).await.unwrap();
    registry
        .register(greeter_schema(), None, "2026-01-01T00:00:00Z")
        .await
        .unwrap();

    let mut tool_registry = ToolRegistry::new();
    tool_registry.register("echo", Arc::new(EchoFactory));

    let log_bus = LogBus::new(100);
    (dir, registry, tool_registry, log_bus)
}

#[tokio::test]
async fn successful_run_produces_ok_and_publishes_task_completed() {
    let (_dir, registry, tool_registry, log_bus) = setup().await;
    let persistence = NullPersistenceSink;
    let runner = AgentRunner {
        registry: &registry,
        tool_registry: &tool_registry,
        log_bus: &log_bus,
        persistence: &persistence,
        cancel_grace: Duration::from_secs(5),
    };

    let result = runner
        .run(
            "greeter",
            None,
            "task-1".to_string(),
            "agent-1".to_string(),
            Some("alice".to_string()),
            json!({"name": "Ada"}),
            HashMap::new(),
            || 0u64,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    match result {
        TaskResult::Ok { output, per_step_log } => {
            assert_eq!(output.get("name"), Some(&json!("Ada")));
            assert_eq!(per_step_log.len(), 1);
        }
        TaskResult::Err { .. } => panic!("expected success"),
    }

    let handle = log_bus.subscribe("observers", "c1", crate::logbus::Filter::default());
    let consumed = log_bus.consume(&handle, 10);
    assert_eq!(consumed.events.len(), 1);
    assert_eq!(consumed.events[0].kind, "task_completed");
}

#[tokio::test]
async fn missing_required_input_is_rejected_before_execution() {
    let (_dir, registry, tool_registry, log_bus) = setup().await;
    let persistence = NullPersistenceSink;
    let runner = AgentRunner {
        registry: &registry,
        tool_registry: &tool_registry,
        log_bus: &log_bus,
        persistence: &persistence,
        cancel_grace: Duration::from_secs(5),
    };

    let err = runner
        .run(
            "greeter",
            None,
            "task-1".to_string(),
            "agent-1".to_string(),
            None,
            json!({}),
            HashMap::new(),
            || 0u64,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::InputInvalid(_)));
}

#[tokio::test]
async fn unknown_agent_type_is_rejected() {
    let (_dir, registry, tool_registry, log_bus) = setup().await;
    let persistence = NullPersistenceSink;
    let runner = AgentRunner {
        registry: &registry,
        tool_registry: &tool_registry,
        log_bus: &log_bus,
        persistence: &persistence,
        cancel_grace: Duration::from_secs(5),
    };

    let err = runner
        .run(
            "does-not-exist",
            None,
            "task-1".to_string(),
            "agent-1".to_string(),
            None,
            json!({}),
            HashMap::new(),
            || 0u64,
            CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RunnerError::UnknownType { .. }));
}

#[tokio::test]
async fn data_model_declaration_triggers_a_persistence_call() {
    struct RecordingSink {
        calls: std::sync::Mutex<Vec<String>>,
    }
    #[async_trait]
    impl PersistenceSink for RecordingSink {
        async fn save(&self, _agent_type_id: &str, model_name: &str, _rows: Vec<Value>) -> Result<(), String> {
            self.calls.lock().unwrap().push(model_name.to_string());
            Ok(())
        }
    }

    let (_dir, registry, tool_registry, log_bus) = setup().await;
    let mut schema_with_model = greeter_schema();
    schema_with_model.metadata.version = "2.0.0".to_string();
    schema_with_model.data_models.insert(
        "greetings".to_string(),
        DataModelDef {
            table_name: "greetings".to_string(),
            fields: indexmap::IndexMap::new(),
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    registry
        .register(schema_with_model, None, "2026-01-02T00:00:00Z")
        .await
        .unwrap();

    let sink = RecordingSink {
        calls: std::sync::Mutex::new(Vec::new()),
    };
    let runner = AgentRunner {
        registry: &registry,
        tool_registry: &tool_registry,
        log_bus: &log_bus,
        persistence: &sink,
        cancel_grace: Duration::from_secs(5),
    };

    runner
        .run(
            "greeter",
            None,
            "task-1".to_string(),
            "agent-1".to_string(),
            None,
            json!({"name": "Ada"}),
            HashMap::new(),
            || 0u64,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(sink.calls.lock().unwrap().as_slice(), ["greetings"]);
}
