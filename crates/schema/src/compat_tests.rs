// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::model::*;
use indexmap::IndexMap;

fn schema_with_model(fields: IndexMap<String, FieldDef>) -> Schema {
    let mut data_models = IndexMap::new();
    data_models.insert(
        "m".to_string(),
        DataModelDef {
            table_name: "m".into(),
            fields,
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    Schema {
        metadata: Metadata {
            name: "s".into(),
            description: String::new(),
            category: "demo".into(),
            version: "1".into(),
            author: None,
            tags: None,
        },
        input_fields: IndexMap::new(),
        output_fields: IndexMap::new(),
        data_models,
        tools: IndexMap::new(),
        pipeline: Pipeline {
            steps: Vec::new(),
            parallel_execution: false,
            max_retries: 0,
            timeout_seconds: None,
        },
        limits: Limits::default(),
    }
}

#[test]
fn adding_column_is_non_breaking_but_requires_migration() {
    let old = schema_with_model(IndexMap::from([(
        "a".into(),
        FieldDef::required(FieldType::Integer),
    )]));
    let mut new_fields = IndexMap::from([("a".into(), FieldDef::required(FieldType::Integer))]);
    new_fields.insert("b".into(), FieldDef::required(FieldType::String));
    let new = schema_with_model(new_fields);

    let report = check_compatibility(&old, &new);
    assert!(!report.is_breaking());
    assert!(report.migration_required());
}

#[test]
fn removing_required_field_is_breaking() {
    let old = schema_with_model(IndexMap::from([(
        "a".into(),
        FieldDef::required(FieldType::Integer),
    )]));
    let new = schema_with_model(IndexMap::new());

    let report = check_compatibility(&old, &new);
    assert!(report.is_breaking());
}

#[test]
fn renaming_table_is_breaking() {
    let old = schema_with_model(IndexMap::from([(
        "a".into(),
        FieldDef::required(FieldType::Integer),
    )]));
    let mut new = old.clone();
    new.data_models.get_mut("m").unwrap().table_name = "m2".into();

    let report = check_compatibility(&old, &new);
    assert!(report.breaking.iter().any(|c| c.contains("renamed table")));
}
