// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative DDL operations and the FieldType -> SQL column type mapping
//! (spec.md §4.D).

use agentcore_schema::FieldType;
use serde::{Deserialize, Serialize};

/// Synthetic columns every managed table carries regardless of the
/// schema's declared fields (spec.md §4.D). Invariant across schema
/// changes; never exposed through schema manipulation.
pub const SYNTHETIC_COLUMNS: &[&str] = &["id", "agent_id", "task_id", "created_at", "updated_at"];

/// Render a [`FieldDef`](agentcore_schema::FieldDef)'s SQL column type.
pub fn sql_column_type(field_type: FieldType, max_length: Option<u64>) -> String {
    match field_type {
        FieldType::String => format!("VARCHAR({})", max_length.unwrap_or(255)),
        FieldType::Integer => "INTEGER".to_string(),
        FieldType::Float => "DOUBLE".to_string(),
        FieldType::Boolean => "BOOLEAN".to_string(),
        FieldType::Text => "TEXT".to_string(),
        FieldType::Json => "JSONB".to_string(),
        FieldType::Uuid => "UUID".to_string(),
        FieldType::Datetime => "TIMESTAMP WITH TIMEZONE".to_string(),
        FieldType::Date => "DATE".to_string(),
        FieldType::Array => "ARRAY".to_string(),
        FieldType::Enum => "VARCHAR".to_string(),
    }
}

/// A single column as it will be created/altered, with the CHECK
/// constraints spec.md §4.D derives from `range`/`min_length`/enum
/// `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// A single declarative migration step (spec.md §4.D).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MigrationOp {
    CreateTable {
        table: String,
        columns: Vec<ColumnSpec>,
    },
    DropTable {
        table: String,
    },
    AddColumn {
        table: String,
        column: ColumnSpec,
    },
    DropColumn {
        table: String,
        column: String,
    },
    AlterColumnType {
        table: String,
        column: String,
        new_sql_type: String,
        narrowing: bool,
    },
    AddIndex {
        index: IndexSpec,
    },
    DropIndex {
        table: String,
        index: String,
    },
}

impl MigrationOp {
    /// Whether this operation can remove data (spec.md §9 "Destructive
    /// operation").
    pub fn is_destructive(&self) -> bool {
        match self {
            MigrationOp::DropTable { .. } | MigrationOp::DropColumn { .. } => true,
            MigrationOp::AlterColumnType { narrowing, .. } => *narrowing,
            _ => false,
        }
    }

    pub fn table(&self) -> &str {
        match self {
            MigrationOp::CreateTable { table, .. }
            | MigrationOp::DropTable { table }
            | MigrationOp::AddColumn { table, .. }
            | MigrationOp::DropColumn { table, .. }
            | MigrationOp::AlterColumnType { table, .. }
            | MigrationOp::DropIndex { table, .. } => table,
            MigrationOp::AddIndex { index } => &index.table,
        }
    }

    /// The inverse operation, when one exists. `drop_table` has no
    /// inverse (spec.md §4.D, §9).
    pub fn inverse(&self) -> Option<MigrationOp> {
        match self {
            MigrationOp::CreateTable { table, .. } => Some(MigrationOp::DropTable {
                table: table.clone(),
            }),
            MigrationOp::AddColumn { table, column } => Some(MigrationOp::DropColumn {
                table: table.clone(),
                column: column.name.clone(),
            }),
            MigrationOp::AddIndex { index } => Some(MigrationOp::DropIndex {
                table: index.table.clone(),
                index: index.name.clone(),
            }),
            MigrationOp::DropTable { .. } => None,
            MigrationOp::DropColumn { .. } => None,
            MigrationOp::AlterColumnType { .. } => None,
            MigrationOp::DropIndex { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
