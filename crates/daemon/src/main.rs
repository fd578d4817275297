// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! agentcored: long-lived process that owns the Schema Registry, Tool
//! Registry, Log Bus, and Dynamic Table Migrator singletons.
//!
//! This binary is a thin demonstration harness: everything it wires up
//! is equally usable by embedding `agentcored::Daemon` directly in a
//! host process, since spec.md §1 scopes the HTTP surface out.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use agentcored::{Config, Daemon};
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = Config::from_env();
    info!(
        registry_wal = %config.registry_wal_path.display(),
        log_stream = %config.log_stream_name,
        "starting agentcored"
    );

    let daemon = Daemon::start(config).await?;
    info!(
        agent_types = daemon.registry.list(&Default::default()).await.len(),
        "daemon ready"
    );

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    drop(daemon);
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer()).init();
}
