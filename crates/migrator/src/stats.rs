// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `stats()` (spec.md §4.D): per-table row counts and sizes. Sourced
//! through the same [`crate::MigrationExecutor`] seam rather than a
//! hardcoded SQL dialect.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStats {
    pub row_count: u64,
    pub table_size_bytes: u64,
    pub last_analyzed: Option<String>,
}

/// Narrow collaborator for reading table statistics, kept separate from
/// [`crate::MigrationExecutor`] since stats gathering needs no
/// transaction boundary.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn table_stats(&self, table_name: &str) -> TableStats;
}

/// Always reports empty stats; used for tests and hosts with no database.
pub struct NullStatsSource;

#[async_trait]
impl StatsSource for NullStatsSource {
    async fn table_stats(&self, _table_name: &str) -> TableStats {
        TableStats {
            row_count: 0,
            table_size_bytes: 0,
            last_analyzed: None,
        }
    }
}

pub async fn stats(
    tables: &IndexMap<String, String>,
    source: &dyn StatsSource,
) -> IndexMap<String, TableStats> {
    let mut out = IndexMap::new();
    for (model_name, table_name) in tables {
        out.insert(model_name.clone(), source.table_stats(table_name).await);
    }
    out
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
