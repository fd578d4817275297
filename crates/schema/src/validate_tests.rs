// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::model::*;
use indexmap::IndexMap;

fn base_schema() -> Schema {
    Schema {
        metadata: Metadata {
            name: "greeter".into(),
            description: String::new(),
            category: "demo".into(),
            version: "1.0.0".into(),
            author: None,
            tags: None,
        },
        input_fields: IndexMap::new(),
        output_fields: IndexMap::new(),
        data_models: IndexMap::new(),
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
fn empty_pipeline_schema_is_valid() {
    let report = validate(&base_schema());
    assert!(report.ok, "{:?}", report.errors);
}

#[test]
fn reserved_word_table_name_rejected() {
    let mut schema = base_schema();
    schema.data_models.insert(
        "m".into(),
        DataModelDef {
            table_name: "select".into(),
            fields: IndexMap::from([("a".into(), FieldDef::required(FieldType::Integer))]),
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    let report = validate(&schema);
    assert!(!report.ok);
    assert!(report.errors.iter().any(|e| e.contains("reserved word")));
}

#[test]
fn pg_prefixed_identifier_rejected() {
    let mut schema = base_schema();
    schema.data_models.insert(
        "m".into(),
        DataModelDef {
            table_name: "pg_widgets".into(),
            fields: IndexMap::from([("a".into(), FieldDef::required(FieldType::Integer))]),
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    let report = validate(&schema);
    assert!(report.errors.iter().any(|e| e.contains("pg_")));
}

#[test]
fn data_model_with_all_optional_fields_no_default_is_rejected() {
    let mut schema = base_schema();
    let mut field = FieldDef::required(FieldType::Integer);
    field.required = false;
    schema.data_models.insert(
        "m".into(),
        DataModelDef {
            table_name: "widgets".into(),
            fields: IndexMap::from([("a".into(), field)]),
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    let report = validate(&schema);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("required or have a default")));
}

#[test]
fn enum_without_values_is_rejected() {
    let mut schema = base_schema();
    schema
        .input_fields
        .insert("status".into(), FieldDef::required(FieldType::Enum));
    let report = validate(&schema);
    assert!(report.errors.iter().any(|e| e.contains("enum")));
}

#[test]
fn array_without_items_is_rejected() {
    let mut schema = base_schema();
    schema
        .input_fields
        .insert("tags".into(), FieldDef::required(FieldType::Array));
    let report = validate(&schema);
    assert!(report.errors.iter().any(|e| e.contains("items")));
}

#[test]
fn step_referencing_unknown_tool_is_rejected() {
    let mut schema = base_schema();
    schema.pipeline.steps.push(StepDef {
        name: "extract".into(),
        tool: "missing".into(),
        depends_on: Vec::new(),
        config: Default::default(),
        timeout_seconds: None,
        retry_config: None,
    });
    let report = validate(&schema);
    assert!(report
        .errors
        .iter()
        .any(|e| e.contains("not declared in schema.tools")));
}

#[test]
fn cyclic_pipeline_is_rejected_and_names_a_participant() {
    let mut schema = base_schema();
    schema.tools.insert(
        "noop".into(),
        ToolDef {
            type_tag: "noop".into(),
            config: Default::default(),
            auth_config: None,
            rate_limit: None,
            timeout_seconds: None,
            retry_config: None,
        },
    );
    schema.pipeline.steps.push(StepDef {
        name: "a".into(),
        tool: "noop".into(),
        depends_on: vec!["b".into()],
        config: Default::default(),
        timeout_seconds: None,
        retry_config: None,
    });
    schema.pipeline.steps.push(StepDef {
        name: "b".into(),
        tool: "noop".into(),
        depends_on: vec!["a".into()],
        config: Default::default(),
        timeout_seconds: None,
        retry_config: None,
    });
    let report = validate(&schema);
    assert!(!report.ok);
    assert!(report.errors.iter().any(|e| e.contains("cycle")));
}

#[test]
fn bad_rate_limit_format_is_rejected() {
    let mut schema = base_schema();
    schema.tools.insert(
        "http".into(),
        ToolDef {
            type_tag: "http".into(),
            config: Default::default(),
            auth_config: None,
            rate_limit: Some("five/minute".into()),
            timeout_seconds: None,
            retry_config: None,
        },
    );
    let report = validate(&schema);
    assert!(report.errors.iter().any(|e| e.contains("rate_limit")));
}

#[test]
fn validation_is_deterministic() {
    let mut schema = base_schema();
    schema.pipeline.steps.push(StepDef {
        name: "x".into(),
        tool: "missing".into(),
        depends_on: Vec::new(),
        config: Default::default(),
        timeout_seconds: None,
        retry_config: None,
    });
    assert_eq!(validate(&schema), validate(&schema));
}
