// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use agentcore_core::{IdGen, UuidIdGen};
use agentcore_engine::TaskResult;
use agentcored::{Config, Daemon};
use anyhow::{bail, Context, Result};
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio_util::sync::CancellationToken;

#[derive(Args)]
pub struct RunArgs {
    /// Registered agent type name.
    pub type_name: String,

    /// Path to a JSON file with the task's input fields.
    pub input_path: PathBuf,

    /// Exact schema version to bind to (default: highest active version).
    #[arg(long)]
    pub version: Option<String>,

    /// Print the events this run published to the log bus afterward.
    #[arg(long)]
    pub tail_log: bool,
}

pub async fn run(config: Config, args: RunArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.input_path)
        .with_context(|| format!("reading {}", args.input_path.display()))?;
    let input: serde_json::Value = serde_json::from_str(&raw).context("parsing task input")?;

    let daemon = Daemon::start(config).await?;

    let log_handle = args
        .tail_log
        .then(|| daemon.log_bus.subscribe("agc", "run", agentcore_engine::Filter::default()));

    let task_id = UuidIdGen.next();
    let agent_id = UuidIdGen.next();

    let runner = daemon.runner();
    let result = runner
        .run(
            &args.type_name,
            args.version.as_deref(),
            task_id,
            agent_id,
            None,
            input,
            HashMap::new(),
            now_s,
            CancellationToken::new(),
        )
        .await
        .context("running task")?;

    match result {
        TaskResult::Ok { output, per_step_log } => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            for record in &per_step_log {
                eprintln!(
                    "step {} attempts={} success={}",
                    record.step_name, record.attempts, record.success
                );
            }
        }
        TaskResult::Err { error, step_name, .. } => {
            if let Some(handle) = log_handle {
                print_tail(&daemon, &handle);
            }
            bail!("task failed{}: {error}", step_name.map(|s| format!(" at step '{s}'")).unwrap_or_default());
        }
    }

    if let Some(handle) = log_handle {
        print_tail(&daemon, &handle);
    }
    Ok(())
}

fn print_tail(daemon: &Daemon, handle: &agentcore_engine::SubscriptionHandle) {
    let consumed = daemon.log_bus.consume(handle, 100);
    for event in &consumed.events {
        eprintln!("log[{}] {} {}", event.stream_id, event.kind, event.payload);
    }
}

fn now_s() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}
