// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("schema_invalid: {0}")]
    SchemaInvalid(String),
    #[error("version_exists: {type_name}@{version}")]
    VersionExists { type_name: String, version: String },
    #[error("incompatible_schema_change: {0}")]
    IncompatibleSchemaChange(String),
    #[error("no agent type '{type_name}' version '{version:?}'")]
    NotFound {
        type_name: String,
        version: Option<String>,
    },
    #[error("storage error: {0}")]
    Storage(#[from] crate::wal::WalError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
