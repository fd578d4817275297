// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named advisory locks keyed by `agent_type_id` (spec.md §5): `apply`
//! acquires one to prevent concurrent schema changes for the same agent
//! type.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Default)]
pub struct AdvisoryLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AdvisoryLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `agent_type_id`, suspending until it is free.
    pub async fn acquire(&self, agent_type_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(agent_type_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod tests;
