// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! agc - operator CLI for the agent execution core. Registers schemas,
//! runs ad-hoc tasks, tails the log bus for a run, and previews pending
//! migrations. Runs entirely in-process against the same components
//! `agentcored` wires up, since the HTTP surface is out of scope.

mod commands;

use agentcored::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "agc", version, about = "Operator CLI for the agent execution core")]
struct Cli {
    /// Override the Schema Registry's WAL path (default: $AGENTCORE_STATE_DIR or platform default)
    #[arg(long, global = true)]
    registry_wal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a schema document from a JSON file.
    Register(commands::register::RegisterArgs),
    /// Run an ad-hoc task against a registered agent type.
    Run(commands::run::RunArgs),
    /// Preview the migration plan a schema file would produce.
    MigrationPlan(commands::migration_plan::MigrationPlanArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(wal) = cli.registry_wal {
        config.registry_wal_path = wal;
    }

    match cli.command {
        Commands::Register(args) => commands::register::run(config, args).await,
        Commands::Run(args) => commands::run::run(config, args).await,
        Commands::MigrationPlan(args) => commands::migration_plan::run(config, args).await,
    }
}
