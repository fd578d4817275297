// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `plan()`: diff current managed tables against a schema's data models
//! (spec.md §4.D).

use crate::types::{sql_column_type, ColumnSpec, IndexSpec, MigrationOp};
use agentcore_schema::{DataModelDef, FieldType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub agent_type_id: String,
    pub operations: Vec<MigrationOp>,
    pub warnings: Vec<String>,
}

impl MigrationPlan {
    pub fn has_destructive_ops(&self) -> bool {
        self.operations.iter().any(MigrationOp::is_destructive)
    }
}

fn columns_for(model: &DataModelDef) -> Vec<ColumnSpec> {
    model
        .fields
        .iter()
        .map(|(name, field)| {
            let check_constraint = field_check_constraint(name, field);
            ColumnSpec {
                name: name.clone(),
                sql_type: sql_column_type(field.field_type, field.max_length),
                nullable: !field.required,
                check_constraint,
            }
        })
        .collect()
}

fn field_check_constraint(name: &str, field: &agentcore_schema::FieldDef) -> Option<String> {
    match field.field_type {
        FieldType::Integer | FieldType::Float => field
            .range
            .map(|(min, max)| format!("{name} >= {min} AND {name} <= {max}")),
        FieldType::String if field.min_length.is_some() => {
            field.min_length.map(|min| format!("length({name}) >= {min}"))
        }
        FieldType::Enum => field.values.as_ref().map(|values| {
            let quoted = values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{name} IN ({quoted})")
        }),
        _ => None,
    }
}

/// Diff `current` (the tables currently managed for this agent type, keyed
/// by model name — empty on first registration) against `new_models`.
pub fn plan(
    agent_type_id: impl Into<String>,
    current: &IndexMap<String, DataModelDef>,
    new_models: &IndexMap<String, DataModelDef>,
) -> MigrationPlan {
    let mut operations = Vec::new();
    let mut warnings = Vec::new();

    for (model_name, new_model) in new_models {
        match current.get(model_name) {
            None => {
                operations.push(MigrationOp::CreateTable {
                    table: new_model.table_name.clone(),
                    columns: columns_for(new_model),
                });
                for index in &new_model.indexes {
                    operations.push(MigrationOp::AddIndex {
                        index: IndexSpec {
                            name: index.name.clone(),
                            table: new_model.table_name.clone(),
                            columns: index.fields.clone(),
                            unique: index.unique,
                        },
                    });
                }
            }
            Some(old_model) => {
                for (field_name, new_field) in &new_model.fields {
                    match old_model.fields.get(field_name) {
                        None => operations.push(MigrationOp::AddColumn {
                            table: new_model.table_name.clone(),
                            column: ColumnSpec {
                                name: field_name.clone(),
                                sql_type: sql_column_type(
                                    new_field.field_type,
                                    new_field.max_length,
                                ),
                                nullable: !new_field.required,
                                check_constraint: field_check_constraint(field_name, new_field),
                            },
                        }),
                        Some(old_field) => {
                            if old_field.field_type != new_field.field_type {
                                let narrowing = is_narrowing(old_field, new_field);
                                operations.push(MigrationOp::AlterColumnType {
                                    table: new_model.table_name.clone(),
                                    column: field_name.clone(),
                                    new_sql_type: sql_column_type(
                                        new_field.field_type,
                                        new_field.max_length,
                                    ),
                                    narrowing,
                                });
                                if narrowing {
                                    warnings.push(format!(
                                        "narrowing column '{field_name}' on table '{}' may truncate data",
                                        new_model.table_name
                                    ));
                                }
                            }
                        }
                    }
                }
                for field_name in old_model.fields.keys() {
                    if !new_model.fields.contains_key(field_name) {
                        operations.push(MigrationOp::DropColumn {
                            table: new_model.table_name.clone(),
                            column: field_name.clone(),
                        });
                        warnings.push(format!(
                            "dropping column '{field_name}' on table '{}' discards its data",
                            new_model.table_name
                        ));
                    }
                }

                for new_index in &new_model.indexes {
                    let to_index_spec = |index: &agentcore_schema::IndexDef| IndexSpec {
                        name: index.name.clone(),
                        table: new_model.table_name.clone(),
                        columns: index.fields.clone(),
                        unique: index.unique,
                    };
                    match old_model.indexes.iter().find(|i| i.name == new_index.name) {
                        None => operations.push(MigrationOp::AddIndex {
                            index: to_index_spec(new_index),
                        }),
                        Some(old_index) => {
                            if old_index.fields != new_index.fields || old_index.unique != new_index.unique {
                                operations.push(MigrationOp::DropIndex {
                                    table: new_model.table_name.clone(),
                                    index: old_index.name.clone(),
                                });
                                operations.push(MigrationOp::AddIndex {
                                    index: to_index_spec(new_index),
                                });
                            }
                        }
                    }
                }
                for old_index in &old_model.indexes {
                    if !new_model.indexes.iter().any(|i| i.name == old_index.name) {
                        operations.push(MigrationOp::DropIndex {
                            table: new_model.table_name.clone(),
                            index: old_index.name.clone(),
                        });
                    }
                }
            }
        }
    }

    for (model_name, old_model) in current {
        if !new_models.contains_key(model_name) {
            operations.push(MigrationOp::DropTable {
                table: old_model.table_name.clone(),
            });
            warnings.push(format!(
                "dropping table '{}' discards all its rows",
                old_model.table_name
            ));
        }
    }

    MigrationPlan {
        agent_type_id: agent_type_id.into(),
        operations,
        warnings,
    }
}

fn is_narrowing(old: &agentcore_schema::FieldDef, new: &agentcore_schema::FieldDef) -> bool {
    use FieldType::*;
    match (old.field_type, new.field_type) {
        (Text, String) | (Json, String) | (Float, Integer) => true,
        (String, String) => {
            new.max_length.unwrap_or(u64::MAX) < old.max_length.unwrap_or(u64::MAX)
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
