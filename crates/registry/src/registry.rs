// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema Registry (spec.md §4.C): persists [`AgentType`] rows behind a
//! durable WAL.

use crate::event::RegistryEvent;
use crate::error::RegistryError;
use crate::types::{
    AgentType, AgentTypeStatus, CleanupReport, DeleteMode, DeletionImpact, ListFilters,
};
use crate::wal::Wal;
use agentcore_schema::{check_compatibility, validate, Schema};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Narrow collaborator the registry calls into on `delete(..., mode=hard|purge)`
/// (spec.md §4.C). Kept as a trait here, rather than a direct dependency
/// on `agentcore-migrator`, so the registry does not need to know how
/// tables are dropped — only that something can.
#[async_trait]
pub trait TableDropper: Send + Sync {
    async fn drop_tables_for(&self, type_name: &str, schema: &Schema) -> CleanupReport;
}

/// Drops nothing; used when no migrator is wired in (tests, dry runs).
pub struct NullTableDropper;

#[async_trait]
impl TableDropper for NullTableDropper {
    async fn drop_tables_for(&self, type_name: &str, _schema: &Schema) -> CleanupReport {
        CleanupReport {
            type_name: type_name.to_string(),
            ..Default::default()
        }
    }
}

struct State {
    rows: IndexMap<(String, String), AgentType>,
}

impl State {
    fn active_row(&self, type_name: &str) -> Option<&AgentType> {
        self.rows
            .values()
            .filter(|row| row.type_name == type_name && row.status == AgentTypeStatus::Active)
            .max_by(|a, b| compare_semver(&a.version, &b.version))
    }

    fn apply(&mut self, event: &RegistryEvent) {
        match event {
            RegistryEvent::Registered { agent_type } => {
                if agent_type.status == AgentTypeStatus::Active {
                    for row in self.rows.values_mut() {
                        if row.type_name == agent_type.type_name
                            && row.status == AgentTypeStatus::Active
                        {
                            row.status = AgentTypeStatus::Deprecated;
                        }
                    }
                }
                self.rows.insert(
                    (agent_type.type_name.clone(), agent_type.version.clone()),
                    agent_type.clone(),
                );
            }
            RegistryEvent::StatusChanged {
                type_name,
                version,
                status,
            } => {
                if let Some(row) = self
                    .rows
                    .get_mut(&(type_name.clone(), version.clone()))
                {
                    row.status = *status;
                }
            }
            RegistryEvent::Purged { type_name, version } => {
                self.rows.remove(&(type_name.clone(), version.clone()));
            }
        }
    }
}

/// Byte-naive semver compare: numeric dotted components, falling back to
/// string compare for non-numeric pieces (no `semver` dependency needed
/// for the tie-break this registry actually performs).
fn compare_semver(a: &str, b: &str) -> std::cmp::Ordering {
    let parse = |s: &str| -> Vec<u64> { s.split('.').map(|p| p.parse().unwrap_or(0)).collect() };
    parse(a).cmp(&parse(b))
}

pub struct SchemaRegistry {
    state: RwLock<State>,
    wal: tokio::sync::Mutex<Wal>,
}

impl SchemaRegistry {
    /// Open (or create) a registry backed by a WAL at `path`, replaying
    /// any existing entries into memory.
    pub async fn open(path: &Path) -> Result<Self, RegistryError> {
        let wal = Wal::open(path)?;
        let mut state = State {
            rows: IndexMap::new(),
        };
        for entry in wal.replay()? {
            state.apply(&entry.event);
        }
        Ok(Self {
            state: RwLock::new(state),
            wal: tokio::sync::Mutex::new(wal),
        })
    }

    pub async fn register(
        &self,
        schema: Schema,
        created_by: Option<String>,
        created_at: impl Into<String>,
    ) -> Result<AgentType, RegistryError> {
        let report = validate(&schema);
        if !report.ok {
            return Err(RegistryError::SchemaInvalid(report.errors.join("; ")));
        }

        let type_name = schema.metadata.name.clone();
        let version = schema.metadata.version.clone();

        let state = self.state.read().await;
        if state
            .rows
            .contains_key(&(type_name.clone(), version.clone()))
        {
            return Err(RegistryError::VersionExists { type_name, version });
        }

        let mut status = AgentTypeStatus::Active;
        if let Some(active) = state.active_row(&type_name) {
            let compat = check_compatibility(&active.schema, &schema);
            if compat.is_breaking() {
                return Err(RegistryError::IncompatibleSchemaChange(
                    compat.breaking.join("; "),
                ));
            }
            if compat.migration_required() {
                info!(type_name = %type_name, version = %version, "registration requires a migration");
            }
            // Non-breaking: still admitted, demoting the old active row.
            let _ = &mut status;
        }
        drop(state);

        let agent_type = AgentType {
            type_name: type_name.clone(),
            version: version.clone(),
            schema_hash: schema.hash(),
            status,
            created_at: created_at.into(),
            created_by,
            schema,
        };

        let event = RegistryEvent::Registered {
            agent_type: agent_type.clone(),
        };
        self.wal.lock().await.append(&event)?;

        let mut state = self.state.write().await;
        state.apply(&event);
        Ok(agent_type)
    }

    pub async fn get(&self, type_name: &str, version: Option<&str>) -> Option<AgentType> {
        let state = self.state.read().await;
        match version {
            Some(v) => state.rows.get(&(type_name.to_string(), v.to_string())).cloned(),
            None => state.active_row(type_name).cloned(),
        }
    }

    pub async fn list(&self, filters: &ListFilters) -> Vec<AgentType> {
        let state = self.state.read().await;
        state
            .rows
            .values()
            .filter(|row| filters.status.is_none_or(|s| s == row.status))
            .filter(|row| {
                filters
                    .category
                    .as_deref()
                    .is_none_or(|c| row.schema.metadata.category == c)
            })
            .filter(|row| {
                filters
                    .name_contains
                    .as_deref()
                    .is_none_or(|needle| row.type_name.contains(needle))
            })
            .cloned()
            .collect()
    }

    pub async fn deprecate(
        &self,
        type_name: &str,
        version: Option<&str>,
    ) -> Result<(), RegistryError> {
        let target_version = match version {
            Some(v) => v.to_string(),
            None => {
                self.get(type_name, None)
                    .await
                    .ok_or_else(|| RegistryError::NotFound {
                        type_name: type_name.to_string(),
                        version: None,
                    })?
                    .version
            }
        };

        let event = RegistryEvent::StatusChanged {
            type_name: type_name.to_string(),
            version: target_version,
            status: AgentTypeStatus::Deprecated,
        };
        self.wal.lock().await.append(&event)?;
        self.state.write().await.apply(&event);
        Ok(())
    }

    pub async fn delete(
        &self,
        type_name: &str,
        version: Option<&str>,
        mode: DeleteMode,
        table_dropper: &dyn TableDropper,
    ) -> Result<CleanupReport, RegistryError> {
        let row = self
            .get(type_name, version)
            .await
            .ok_or_else(|| RegistryError::NotFound {
                type_name: type_name.to_string(),
                version: version.map(str::to_string),
            })?;

        let mut report = CleanupReport {
            type_name: type_name.to_string(),
            ..Default::default()
        };

        if mode == DeleteMode::Hard || mode == DeleteMode::Purge {
            let drop_report = table_dropper.drop_tables_for(type_name, &row.schema).await;
            report.tables_dropped = drop_report.tables_dropped;
            report.rows_affected = drop_report.rows_affected;
        } else {
            warn!(type_name = %type_name, "soft delete: tables left in place");
        }

        let status_event = RegistryEvent::StatusChanged {
            type_name: type_name.to_string(),
            version: row.version.clone(),
            status: AgentTypeStatus::Deleted,
        };
        self.wal.lock().await.append(&status_event)?;
        self.state.write().await.apply(&status_event);

        if mode == DeleteMode::Purge {
            let purge_event = RegistryEvent::Purged {
                type_name: type_name.to_string(),
                version: row.version,
            };
            self.wal.lock().await.append(&purge_event)?;
            self.state.write().await.apply(&purge_event);
            report.registry_row_removed = true;
        }

        Ok(report)
    }

    pub async fn preview_deletion_impact(&self, type_name: &str) -> DeletionImpact {
        // The core does not own agent-instance/task tables (out of scope,
        // spec.md §1); a deployment's persistence collaborator supplies
        // those counts. Absent one, this reports zeros.
        let _ = type_name;
        DeletionImpact::default()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
