// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Durable registry mutation events (SPEC_FULL §4.C): every state change
//! is first appended to the WAL, then applied to the in-memory map, so a
//! restart can rebuild state by replay.

use crate::types::{AgentType, AgentTypeStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryEvent {
    Registered {
        agent_type: AgentType,
    },
    StatusChanged {
        type_name: String,
        version: String,
        status: AgentTypeStatus,
    },
    Purged {
        type_name: String,
        version: String,
    },
}
