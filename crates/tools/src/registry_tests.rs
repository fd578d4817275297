// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::tool::ToolError;
use agentcore_core::ExecutionContext;
use async_trait::async_trait;
use serde_json::json;

struct EchoTool {
    config: Value,
}

#[async_trait]
impl Tool for EchoTool {
    async fn execute(&self, input: Value, _ctx: &ExecutionContext) -> Result<Value, ToolError> {
        Ok(json!({"input": input, "config": self.config}))
    }

    fn describe(&self) -> ToolSchema {
        ToolSchema {
            name: "echo".into(),
            description: "returns its input".into(),
            input_fields: Value::Null,
            output_fields: Value::Null,
            config_fields: Value::Null,
        }
    }
}

struct EchoFactory;

impl ToolFactory for EchoFactory {
    fn build(&self, _tool_def: &ToolDef, merged_config: Value) -> Result<Arc<dyn Tool>, String> {
        Ok(Arc::new(EchoTool {
            config: merged_config,
        }))
    }

    fn describe(&self) -> ToolSchema {
        EchoTool {
            config: Value::Null,
        }
        .describe()
    }
}

fn tool_def() -> ToolDef {
    ToolDef {
        type_tag: "echo".into(),
        config: Map::from_iter([("greeting".to_string(), json!("hi"))]),
        auth_config: None,
        rate_limit: None,
        timeout_seconds: None,
        retry_config: None,
    }
}

#[test]
fn unknown_type_tag_errors() {
    let registry = ToolRegistry::new();
    let err = registry.build(&tool_def(), None).unwrap_err();
    assert!(matches!(err, ToolRegistryError::UnknownTypeTag(_)));
}

#[test]
fn build_merges_overrides_over_declared_config() {
    let mut registry = ToolRegistry::new();
    registry.register("echo", Arc::new(EchoFactory));

    let overrides = Map::from_iter([("greeting".to_string(), json!("override"))]);
    let tool = registry.build(&tool_def(), Some(&overrides)).unwrap();
    assert_eq!(tool.describe().name, "echo");
}

#[test]
fn describe_returns_none_for_unknown_tag() {
    let registry = ToolRegistry::new();
    assert!(registry.describe("missing").is_none());
}
