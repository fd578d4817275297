// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use agentcore_migrator::plan_migration;
use agentcore_schema::Schema;
use agentcored::{Config, Daemon};
use anyhow::{Context, Result};
use clap::Args;
use indexmap::IndexMap;
use std::path::PathBuf;

#[derive(Args)]
pub struct MigrationPlanArgs {
    /// Path to a JSON schema document to preview as a new version.
    pub schema_path: PathBuf,
}

pub async fn run(config: Config, args: MigrationPlanArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.schema_path)
        .with_context(|| format!("reading {}", args.schema_path.display()))?;
    let new_schema: Schema = serde_json::from_str(&raw).context("parsing schema document")?;

    let daemon = Daemon::start(config).await?;
    let current_models: IndexMap<String, agentcore_schema::DataModelDef> = daemon
        .registry
        .get(&new_schema.metadata.name, None)
        .await
        .map(|agent_type| agent_type.schema.data_models)
        .unwrap_or_default();

    let plan = plan_migration(&new_schema.metadata.name, &current_models, &new_schema.data_models);

    println!("{}", serde_json::to_string_pretty(&plan)?);
    if plan.has_destructive_ops() {
        eprintln!("warning: this plan contains destructive operations (apply requires confirm=true)");
    }
    for warning in &plan.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}
