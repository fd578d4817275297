// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry record types (spec.md §3 "AgentType").

use agentcore_schema::Schema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTypeStatus {
    Active,
    Deprecated,
    Deleted,
}

/// A registered, versioned schema (spec.md §3 "AgentType (schema
/// record)"). `(type_name, version)` is unique; at most one `active` row
/// per `type_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentType {
    pub type_name: String,
    pub version: String,
    pub schema_hash: String,
    pub status: AgentTypeStatus,
    pub created_at: String,
    pub created_by: Option<String>,
    pub schema: Schema,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilters {
    pub status: Option<AgentTypeStatus>,
    pub category: Option<String>,
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Soft,
    Hard,
    Purge,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanupReport {
    pub type_name: String,
    pub tables_dropped: Vec<String>,
    pub rows_affected: u64,
    pub registry_row_removed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletionImpact {
    pub agent_instances: u64,
    pub tasks: u64,
    pub per_table_row_counts: std::collections::BTreeMap<String, u64>,
}
