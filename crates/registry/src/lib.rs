// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentcore-registry: the Schema Registry (spec.md §4.C) — durable
//! storage and lookup of versioned [`AgentType`] rows.

pub mod error;
pub mod event;
pub mod registry;
pub mod types;
pub mod wal;

pub use error::RegistryError;
pub use event::RegistryEvent;
pub use registry::{NullTableDropper, SchemaRegistry, TableDropper};
pub use types::{
    AgentType, AgentTypeStatus, CleanupReport, DeleteMode, DeletionImpact, ListFilters,
};
pub use wal::{Wal, WalEntry, WalError};
