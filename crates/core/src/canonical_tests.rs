// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn object_keys_are_sorted() {
    let a = json!({"b": 1, "a": 2});
    let b = json!({"a": 2, "b": 1});
    assert_eq!(canonical_string(&a), canonical_string(&b));
    assert_eq!(canonical_string(&a), r#"{"a":2,"b":1}"#);
}

#[test]
fn nested_objects_sort_recursively() {
    let v = json!({"z": {"y": 1, "x": 2}, "a": 1});
    assert_eq!(canonical_string(&v), r#"{"a":1,"z":{"x":2,"y":1}}"#);
}

#[test]
fn array_order_is_preserved() {
    let v = json!([3, 1, 2]);
    assert_eq!(canonical_string(&v), "[3,1,2]");
}

#[test]
fn hash_is_stable_across_key_order() {
    let a = json!({"name": "x", "version": "1"});
    let b = json!({"version": "1", "name": "x"});
    assert_eq!(hash_value(&a), hash_value(&b));
}

#[test]
fn hash_is_64_hex_chars() {
    let h = hash_value(&json!({"a": 1}));
    assert_eq!(h.len(), 64);
    assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn different_values_hash_differently() {
    let h1 = hash_value(&json!({"a": 1}));
    let h2 = hash_value(&json!({"a": 2}));
    assert_ne!(h1, h2);
}
