// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("failed to open schema registry: {0}")]
    Registry(#[from] agentcore_registry::RegistryError),
    #[error("failed to create state directory: {0}")]
    StateDir(#[from] std::io::Error),
}
