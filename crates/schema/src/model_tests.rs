// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use indexmap::IndexMap;

fn minimal_schema() -> Schema {
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
fn hash_is_stable_across_clones() {
    let a = minimal_schema();
    let b = a.clone();
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn hash_is_64_hex_chars() {
    let h = minimal_schema().hash();
    assert_eq!(h.len(), 64);
    assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_changes_when_metadata_changes() {
    let a = minimal_schema();
    let mut b = a.clone();
    b.metadata.version = "1.0.1".into();
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn field_def_required_has_no_default() {
    let f = FieldDef::required(FieldType::String);
    assert!(f.required);
    assert!(!f.has_default());
}
