// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! agentcored: wires the Schema Registry, Tool Registry, Log Bus, and
//! Dynamic Table Migrator into one process-wide set of singletons
//! (spec.md §5), and exposes them as in-process Rust APIs. The HTTP
//! surface that would normally front these is out of scope (spec.md §1).

pub mod config;
pub mod daemon;
pub mod error;

pub use config::Config;
pub use daemon::{Daemon, MigratorTableDropper};
pub use error::DaemonError;
