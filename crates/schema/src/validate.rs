// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Meta-validator (spec.md §4.B): `validate(schema) -> {ok, errors, warnings}`.
//!
//! Every rule below appends to a shared error list rather than returning
//! early — a schema author should see every problem in one pass.

use crate::keywords::{is_postgres_type, is_reserved};
use crate::model::{FieldDef, FieldType, Schema};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

const MAX_IDENTIFIER_LEN: usize = 63;
const MAX_STRING_LENGTH: u64 = 10_485_760;

fn identifier_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("static regex compiles"))
}

fn rate_limit_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d+/(second|minute|hour|day)$").expect("static regex compiles")
    })
}

/// Result of [`validate`]. `ok` is `errors.is_empty()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validate `schema` against every rule in spec.md §4.B. Deterministic:
/// the same schema always yields the same report.
pub fn validate(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();

    validate_identifier(&mut report, &schema.metadata.name, "schema name");

    for (name, field) in &schema.input_fields {
        validate_identifier(&mut report, name, "input field name");
        validate_field(&mut report, name, field);
    }
    for (name, field) in &schema.output_fields {
        validate_identifier(&mut report, name, "output field name");
        validate_field(&mut report, name, field);
    }

    validate_data_models(&mut report, schema);
    validate_tools(&mut report, schema);
    validate_pipeline(&mut report, schema);

    report.ok = report.errors.is_empty();
    report
}

fn validate_identifier(report: &mut ValidationReport, identifier: &str, context: &str) {
    if identifier.is_empty() {
        report.error(format!("{context} cannot be empty"));
        return;
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        report.error(format!(
            "{context} '{identifier}' exceeds {MAX_IDENTIFIER_LEN} characters"
        ));
    }
    if !identifier_pattern().is_match(identifier) {
        report.error(format!(
            "{context} '{identifier}' must match ^[A-Za-z_][A-Za-z0-9_]*$"
        ));
    }
    if is_reserved(identifier) {
        report.error(format!("{context} '{identifier}' is a SQL reserved word"));
    }
    if is_postgres_type(identifier) {
        report.error(format!(
            "{context} '{identifier}' is a PostgreSQL type keyword"
        ));
    }
    let lower = identifier.to_ascii_lowercase();
    if lower.starts_with("pg_") {
        report.error(format!("{context} '{identifier}' cannot start with 'pg_'"));
    }
    if lower.starts_with('_') {
        report.error(format!(
            "{context} '{identifier}' cannot start with an underscore"
        ));
    }
}

fn validate_field(report: &mut ValidationReport, name: &str, field: &FieldDef) {
    match field.field_type {
        FieldType::String | FieldType::Text => {
            if let Some(max_length) = field.max_length {
                if !(1..=MAX_STRING_LENGTH).contains(&max_length) {
                    report.error(format!(
                        "field '{name}': max_length must be within [1, {MAX_STRING_LENGTH}]"
                    ));
                }
                if let Some(min_length) = field.min_length {
                    if min_length > max_length {
                        report.error(format!(
                            "field '{name}': min_length exceeds max_length"
                        ));
                    }
                }
            }
        }
        _ => {
            if field.max_length.is_some() || field.min_length.is_some() {
                report.error(format!(
                    "field '{name}': max_length/min_length only apply to string/text fields"
                ));
            }
        }
    }

    if let Some(pattern) = &field.pattern {
        if !matches!(field.field_type, FieldType::String | FieldType::Text) {
            report.error(format!(
                "field '{name}': pattern is only allowed on string/text fields"
            ));
        } else if Regex::new(pattern).is_err() {
            report.error(format!("field '{name}': pattern '{pattern}' does not compile"));
        }
    }

    match field.field_type {
        FieldType::Integer | FieldType::Float => {
            if let Some((min, max)) = field.range {
                if !(min < max) {
                    report.error(format!("field '{name}': range must satisfy min < max"));
                }
            }
        }
        FieldType::Enum => match &field.values {
            None => report.error(format!("field '{name}': enum type requires non-empty values")),
            Some(values) => {
                if values.is_empty() {
                    report.error(format!("field '{name}': enum values must be non-empty"));
                }
                let mut seen = std::collections::HashSet::new();
                for v in values {
                    if !seen.insert(v) {
                        report.error(format!("field '{name}': enum values must be distinct, duplicate '{v}'"));
                    }
                }
            }
        },
        FieldType::Array => {
            if field.items.is_none() {
                report.error(format!("field '{name}': array type requires items"));
            }
        }
        _ => {}
    }
}

fn validate_data_models(report: &mut ValidationReport, schema: &Schema) {
    for (model_name, model) in &schema.data_models {
        validate_identifier(report, &model.table_name, "table name");

        let mut has_satisfiable_field = false;
        for (field_name, field) in &model.fields {
            validate_identifier(report, field_name, "field name");
            validate_field(report, field_name, field);
            if field.required || field.has_default() {
                has_satisfiable_field = true;
            }
        }
        if !has_satisfiable_field {
            report.error(format!(
                "data model '{model_name}': at least one field must be required or have a default"
            ));
        }

        for index in &model.indexes {
            validate_identifier(report, &index.name, "index name");
            for field in &index.fields {
                if !model.fields.contains_key(field) {
                    report.error(format!(
                        "data model '{model_name}': index '{}' references unknown field '{field}'",
                        index.name
                    ));
                }
            }
        }

        for rel in &model.relationships {
            if !schema.data_models.contains_key(&rel.target_model) {
                report.error(format!(
                    "data model '{model_name}': relationship references unknown model '{}'",
                    rel.target_model
                ));
            }
        }
    }
}

fn validate_tools(report: &mut ValidationReport, schema: &Schema) {
    for (tool_name, tool) in &schema.tools {
        validate_identifier(report, tool_name, "tool name");
        if let Some(rate_limit) = &tool.rate_limit {
            if !rate_limit_pattern().is_match(rate_limit) {
                report.error(format!(
                    "tool '{tool_name}': rate_limit '{rate_limit}' must match ^\\d+/(second|minute|hour|day)$"
                ));
            }
        }
        if let Some(timeout) = tool.timeout_seconds {
            if !(1..=3600).contains(&timeout) {
                report.error(format!(
                    "tool '{tool_name}': timeout_seconds must be within (0, 3600]"
                ));
            }
        }
    }
}

fn validate_pipeline(report: &mut ValidationReport, schema: &Schema) {
    let mut seen_names = std::collections::HashSet::new();
    for step in &schema.pipeline.steps {
        validate_identifier(report, &step.name, "step name");
        if !seen_names.insert(step.name.as_str()) {
            report.error(format!("step name '{}' is not unique", step.name));
        }
        if !schema.tools.contains_key(&step.tool) {
            report.error(format!(
                "step '{}': tool '{}' is not declared in schema.tools",
                step.name, step.tool
            ));
        }
        for dep in &step.depends_on {
            if !schema.pipeline.steps.iter().any(|s| &s.name == dep) {
                report.error(format!(
                    "step '{}': depends_on references unknown step '{dep}'",
                    step.name
                ));
            }
        }
    }

    detect_cycle(report, schema);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Three-color DFS cycle detection (spec.md §4.B, §9).
fn detect_cycle(report: &mut ValidationReport, schema: &Schema) {
    let mut deps: HashMap<&str, &Vec<String>> = HashMap::new();
    for step in &schema.pipeline.steps {
        deps.insert(step.name.as_str(), &step.depends_on);
    }

    let mut color: HashMap<&str, Color> = deps.keys().map(|k| (*k, Color::White)).collect();

    for step in &schema.pipeline.steps {
        if color.get(step.name.as_str()) == Some(&Color::White) {
            let mut stack = vec![step.name.as_str()];
            if let Some(cycle_node) = visit(step.name.as_str(), &deps, &mut color, &mut stack) {
                report.error(format!(
                    "pipeline dependency graph has a cycle involving step '{cycle_node}'"
                ));
            }
        }
    }
}

fn visit<'a>(
    node: &'a str,
    deps: &HashMap<&'a str, &'a Vec<String>>,
    color: &mut HashMap<&'a str, Color>,
    _stack: &mut Vec<&'a str>,
) -> Option<&'a str> {
    color.insert(node, Color::Gray);
    if let Some(children) = deps.get(node) {
        for child in children.iter() {
            let Some((child_key, _)) = deps.get_key_value(child.as_str()) else {
                continue;
            };
            match color.get(*child_key) {
                Some(Color::Gray) => return Some(child_key),
                Some(Color::White) => {
                    if let Some(found) = visit(child_key, deps, color, _stack) {
                        return Some(found);
                    }
                }
                _ => {}
            }
        }
    }
    color.insert(node, Color::Black);
    None
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
