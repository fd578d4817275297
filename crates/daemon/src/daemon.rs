// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the Schema Registry, Log Bus, Tool Registry, and Dynamic Table
//! Migrator into one process-wide set of singletons (spec.md §5 "Shared
//! resources"), and bridges the registry's narrow [`TableDropper`] seam
//! to the migrator so `delete(..., Hard | Purge)` can drop managed
//! tables without the registry crate depending on the migrator crate.

use crate::config::Config;
use crate::error::DaemonError;
use agentcore_engine::{AgentRunner, LogBus, NullPersistenceSink, PersistenceSink};
use agentcore_migrator::{
    drop_for_agent, AdvisoryLocks, MigrationExecutor, NullMigrationExecutor,
};
use agentcore_registry::{CleanupReport, SchemaRegistry, TableDropper};
use agentcore_schema::Schema;
use agentcore_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

/// Bridges [`TableDropper`] (owned by the registry crate) to
/// [`MigrationExecutor`] (owned by the migrator crate).
pub struct MigratorTableDropper {
    executor: Arc<dyn MigrationExecutor>,
    locks: Arc<AdvisoryLocks>,
    confirm_destructive: bool,
}

#[async_trait]
impl TableDropper for MigratorTableDropper {
    async fn drop_tables_for(&self, type_name: &str, schema: &Schema) -> CleanupReport {
        let tables: Vec<String> = schema.data_models.values().map(|m| m.table_name.clone()).collect();
        if tables.is_empty() {
            return CleanupReport {
                type_name: type_name.to_string(),
                ..Default::default()
            };
        }

        match drop_for_agent(type_name, &tables, self.confirm_destructive, self.executor.as_ref(), &self.locks).await {
            Ok(result) => CleanupReport {
                type_name: type_name.to_string(),
                tables_dropped: tables.len() as u64,
                rows_affected: result.rows_affected,
                registry_row_removed: false,
            },
            Err(e) => {
                warn!(type_name, error = %e, "failed to drop managed tables for deleted agent type");
                CleanupReport {
                    type_name: type_name.to_string(),
                    ..Default::default()
                }
            }
        }
    }
}

/// Owns the long-lived components a running agent execution core needs:
/// the Schema Registry, the Tool Registry, the Log Bus, and the
/// migrator's advisory locks and execution seam.
pub struct Daemon {
    pub config: Config,
    pub registry: SchemaRegistry,
    pub tool_registry: ToolRegistry,
    pub log_bus: LogBus,
    pub locks: Arc<AdvisoryLocks>,
    pub migration_executor: Arc<dyn MigrationExecutor>,
    default_persistence: NullPersistenceSink,
}

impl Daemon {
    /// Open or create every on-disk singleton under `config`'s paths.
    pub async fn start(config: Config) -> Result<Self, DaemonError> {
        if let Some(parent) = config.registry_wal_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let registry = SchemaRegistry::open(&config.registry_wal_path).await?;
        let log_bus = LogBus::new(config.log_stream_max_len);

        Ok(Self {
            tool_registry: ToolRegistry::new(),
            log_bus,
            locks: Arc::new(AdvisoryLocks::new()),
            migration_executor: Arc::new(NullMigrationExecutor::new()),
            default_persistence: NullPersistenceSink,
            registry,
            config,
        })
    }

    /// A [`TableDropper`] wired to this daemon's migrator components,
    /// for passing to [`SchemaRegistry::delete`].
    pub fn table_dropper(&self) -> MigratorTableDropper {
        MigratorTableDropper {
            executor: Arc::clone(&self.migration_executor),
            locks: Arc::clone(&self.locks),
            confirm_destructive: self.config.migrator_confirm_destructive_default,
        }
    }

    /// An [`AgentRunner`] bound to this daemon's registry, tools, and
    /// log bus, with no persistence collaborator wired in.
    pub fn runner(&self) -> AgentRunner<'_> {
        AgentRunner {
            registry: &self.registry,
            tool_registry: &self.tool_registry,
            log_bus: &self.log_bus,
            persistence: &self.default_persistence,
            cancel_grace: std::time::Duration::from_secs(self.config.executor_cancel_grace_s),
        }
    }

    /// An [`AgentRunner`] bound to this daemon's registry, tools, and
    /// log bus, backed by the given persistence collaborator.
    pub fn runner_with_persistence<'a>(&'a self, persistence: &'a dyn PersistenceSink) -> AgentRunner<'a> {
        AgentRunner {
            registry: &self.registry,
            tool_registry: &self.tool_registry,
            log_bus: &self.log_bus,
            persistence,
            cancel_grace: std::time::Duration::from_secs(self.config.executor_cancel_grace_s),
        }
    }
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
