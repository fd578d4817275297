// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use agentcore_schema::Schema;
use agentcored::{Config, Daemon};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RegisterArgs {
    /// Path to a JSON schema document (spec.md §3).
    pub schema_path: PathBuf,

    /// Identifier of the human or system registering this schema.
    #[arg(long)]
    pub created_by: Option<String>,
}

pub async fn run(config: Config, args: RegisterArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.schema_path)
        .with_context(|| format!("reading {}", args.schema_path.display()))?;
    let schema: Schema = serde_json::from_str(&raw).context("parsing schema document")?;

    let daemon = Daemon::start(config).await?;
    let created_at = chrono::Utc::now().to_rfc3339();
    let agent_type = daemon
        .registry
        .register(schema, args.created_by, created_at)
        .await
        .context("registering schema")?;

    println!(
        "registered {}@{} (schema_hash={}, status={:?})",
        agent_type.type_name, agent_type.version, agent_type.schema_hash, agent_type.status
    );
    Ok(())
}
