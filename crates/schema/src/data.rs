// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validates a runtime input/output map against a schema's declared
//! fields (spec.md §4.I steps 3 and 6): "missing-required → error;
//! present-but-ill-typed → error; unknown fields pass through unchanged
//! (for forward compatibility)".

use crate::model::{FieldDef, FieldType};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use uuid::Uuid;

fn type_matches(field_type: FieldType, value: &Value) -> bool {
    match field_type {
        FieldType::String | FieldType::Text | FieldType::Datetime | FieldType::Date => value.is_string(),
        FieldType::Integer => value.is_i64() || value.is_u64(),
        FieldType::Float => value.is_f64() || value.is_i64() || value.is_u64(),
        FieldType::Boolean => value.is_boolean(),
        FieldType::Json => true,
        FieldType::Array => value.is_array(),
        FieldType::Enum => value.is_string(),
        FieldType::Uuid => value.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok()),
    }
}

fn validate_one(name: &str, def: &FieldDef, value: &Value) -> Result<(), String> {
    if !type_matches(def.field_type, value) {
        return Err(format!(
            "field '{name}': expected {}, got {value}",
            def.field_type.as_str()
        ));
    }
    if def.field_type == FieldType::Enum {
        if let Some(allowed) = &def.values {
            let s = value.as_str().unwrap_or_default();
            if !allowed.iter().any(|v| v == s) {
                return Err(format!("field '{name}': '{s}' is not one of {allowed:?}"));
            }
        }
    }
    if def.field_type == FieldType::String {
        if let Some(max_len) = def.max_length {
            if value.as_str().map(|s| s.len() as u64).unwrap_or(0) > max_len {
                return Err(format!("field '{name}': exceeds max_length {max_len}"));
            }
        }
        if let Some(min_len) = def.min_length {
            if value.as_str().map(|s| s.len() as u64).unwrap_or(0) < min_len {
                return Err(format!("field '{name}': shorter than min_length {min_len}"));
            }
        }
        if let Some(pattern) = &def.pattern {
            if let Ok(re) = regex::Regex::new(pattern) {
                if !value.as_str().map(|s| re.is_match(s)).unwrap_or(false) {
                    return Err(format!("field '{name}': does not match pattern {pattern}"));
                }
            }
        }
    }
    if matches!(def.field_type, FieldType::Integer | FieldType::Float) {
        if let Some((min, max)) = def.range {
            let n = value.as_f64().unwrap_or(0.0);
            if n < min || n > max {
                return Err(format!("field '{name}': {n} is outside range [{min}, {max}]"));
            }
        }
    }
    Ok(())
}

/// Validate `input` against `fields`, applying declared defaults for
/// absent optional fields and passing unknown keys through untouched.
pub fn validate_fields(
    fields: &IndexMap<String, FieldDef>,
    input: &Map<String, Value>,
) -> Result<Map<String, Value>, Vec<String>> {
    let mut errors = Vec::new();
    let mut output = input.clone();

    for (name, def) in fields {
        match input.get(name) {
            Some(value) => {
                if let Err(e) = validate_one(name, def, value) {
                    errors.push(e);
                }
            }
            None => {
                if def.required && !def.has_default() {
                    errors.push(format!("field '{name}' is required"));
                } else if let Some(default) = &def.default {
                    output.insert(name.clone(), default.clone());
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
