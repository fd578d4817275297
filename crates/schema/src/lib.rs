// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentcore-schema: the agent type schema tree and its meta-validator.

pub mod compat;
pub mod data;
pub mod keywords;
pub mod model;
pub mod validate;

pub use compat::{check_compatibility, CompatibilityReport};
pub use data::validate_fields;
pub use model::{
    AuthConfig, AuthKind, DataModelDef, FieldDef, FieldType, IndexDef, IndexType, Limits,
    Metadata, Pipeline, RelationshipDef, RetryConfig, Schema, StepDef, ToolDef,
};
pub use validate::{validate, ValidationReport};
