// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool Registry (spec.md §4.E): a capability lookup from a type tag to a
//! tool factory. The registry does not know the semantics of any specific
//! tool.

use crate::tool::{Tool, ToolSchema};
use agentcore_schema::ToolDef;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ToolRegistryError {
    #[error("no tool factory registered for type tag '{0}'")]
    UnknownTypeTag(String),
    #[error("failed to build tool '{type_tag}': {message}")]
    BuildFailed { type_tag: String, message: String },
}

/// Builds [`Tool`] instances for a single `type_tag`. Implemented by
/// whatever crate owns the concrete tool (an external collaborator per
/// spec.md §6); the core only sees this narrow interface.
pub trait ToolFactory: Send + Sync {
    fn build(&self, tool_def: &ToolDef, merged_config: Value) -> Result<Arc<dyn Tool>, String>;
    fn describe(&self) -> ToolSchema;
}

/// Simple capability lookup from type tag to factory (spec.md §4.E).
#[derive(Default)]
pub struct ToolRegistry {
    factories: HashMap<String, Arc<dyn ToolFactory>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `type_tag`. Overriding an existing entry
    /// is allowed but logged as a warning.
    pub fn register(&mut self, type_tag: impl Into<String>, factory: Arc<dyn ToolFactory>) {
        let type_tag = type_tag.into();
        if self.factories.contains_key(&type_tag) {
            warn!(type_tag = %type_tag, "overriding existing tool factory");
        }
        self.factories.insert(type_tag, factory);
    }

    /// Build a fresh [`Tool`] instance for `tool_def`, merging
    /// caller-provided overrides over the schema's declared config
    /// (last-writer-wins, matching `ExecutionContext::merge_data`).
    pub fn build(
        &self,
        tool_def: &ToolDef,
        overrides: Option<&Map<String, Value>>,
    ) -> Result<Arc<dyn Tool>, ToolRegistryError> {
        let factory = self
            .factories
            .get(&tool_def.type_tag)
            .ok_or_else(|| ToolRegistryError::UnknownTypeTag(tool_def.type_tag.clone()))?;

        let mut merged = tool_def.config.clone();
        if let Some(overrides) = overrides {
            for (k, v) in overrides {
                merged.insert(k.clone(), v.clone());
            }
        }

        factory
            .build(tool_def, Value::Object(merged))
            .map_err(|message| ToolRegistryError::BuildFailed {
                type_tag: tool_def.type_tag.clone(),
                message,
            })
    }

    pub fn describe(&self, type_tag: &str) -> Option<ToolSchema> {
        self.factories.get(type_tag).map(|f| f.describe())
    }

    pub fn is_registered(&self, type_tag: &str) -> bool {
        self.factories.contains_key(type_tag)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
