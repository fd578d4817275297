// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema compatibility check (spec.md §4.C) between two versions of the
//! same `type_name`.

use crate::model::Schema;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityReport {
    pub breaking: Vec<String>,
    pub non_breaking: Vec<String>,
}

impl CompatibilityReport {
    pub fn is_breaking(&self) -> bool {
        !self.breaking.is_empty()
    }

    /// `migration_required` = any breaking change, or any change affecting
    /// a data model's columns (spec.md §4.C).
    pub fn migration_required(&self) -> bool {
        self.is_breaking()
            || self
                .non_breaking
                .iter()
                .any(|c| c.starts_with("data model"))
    }
}

pub fn check_compatibility(old: &Schema, new: &Schema) -> CompatibilityReport {
    let mut report = CompatibilityReport::default();

    for (name, old_field) in &old.input_fields {
        match new.input_fields.get(name) {
            None => {
                if old_field.required {
                    report
                        .breaking
                        .push(format!("removed required input field '{name}'"));
                }
            }
            Some(new_field) => {
                if new_field.field_type != old_field.field_type {
                    report
                        .breaking
                        .push(format!("input field '{name}' changed type"));
                }
            }
        }
    }
    for (name, new_field) in &new.input_fields {
        if !old.input_fields.contains_key(name) {
            if new_field.required && !new_field.has_default() {
                report
                    .breaking
                    .push(format!("added required input field '{name}' with no default"));
            } else {
                report
                    .non_breaking
                    .push(format!("added optional input field '{name}'"));
            }
        }
    }

    for (model_name, old_model) in &old.data_models {
        match new.data_models.get(model_name) {
            None => report
                .breaking
                .push(format!("removed data model '{model_name}'")),
            Some(new_model) => {
                if new_model.table_name != old_model.table_name {
                    report.breaking.push(format!(
                        "data model '{model_name}' renamed table '{}' -> '{}'",
                        old_model.table_name, new_model.table_name
                    ));
                }
                for (field_name, old_field) in &old_model.fields {
                    match new_model.fields.get(field_name) {
                        None => {
                            if old_field.required {
                                report.breaking.push(format!(
                                    "data model '{model_name}': removed required field '{field_name}'"
                                ));
                            } else {
                                report.non_breaking.push(format!(
                                    "data model '{model_name}': removed optional field '{field_name}'"
                                ));
                            }
                        }
                        Some(new_field) => {
                            if new_field.field_type != old_field.field_type {
                                report.breaking.push(format!(
                                    "data model '{model_name}': field '{field_name}' changed type"
                                ));
                            }
                            if new_field.max_length.unwrap_or(u64::MAX)
                                > old_field.max_length.unwrap_or(u64::MAX)
                            {
                                report.non_breaking.push(format!(
                                    "data model '{model_name}': field '{field_name}' widened max_length"
                                ));
                            }
                            if let (Some((_, old_max)), Some((_, new_max))) =
                                (old_field.range, new_field.range)
                            {
                                if new_max > old_max {
                                    report.non_breaking.push(format!(
                                        "data model '{model_name}': field '{field_name}' widened range"
                                    ));
                                }
                            }
                            if let (Some(old_values), Some(new_values)) =
                                (&old_field.values, &new_field.values)
                            {
                                if new_values.len() > old_values.len()
                                    && new_values.starts_with(old_values.as_slice())
                                {
                                    report.non_breaking.push(format!(
                                        "data model '{model_name}': field '{field_name}' gained enum values"
                                    ));
                                }
                            }
                        }
                    }
                }
                for field_name in new_model.fields.keys() {
                    if !old_model.fields.contains_key(field_name) {
                        report.non_breaking.push(format!(
                            "data model '{model_name}': added field '{field_name}'"
                        ));
                    }
                }
                if new_model.indexes.len() > old_model.indexes.len() {
                    report
                        .non_breaking
                        .push(format!("data model '{model_name}': added index"));
                }
            }
        }
    }
    for model_name in new.data_models.keys() {
        if !old.data_models.contains_key(model_name) {
            report
                .non_breaking
                .push(format!("added data model '{model_name}'"));
        }
    }

    report
}

#[cfg(test)]
#[path = "compat_tests.rs"]
mod tests;
