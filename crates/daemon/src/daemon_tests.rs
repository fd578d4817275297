// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use agentcore_schema::{DataModelDef, Metadata, Pipeline, Schema};
use tempfile::tempdir;

fn test_config(dir: &tempfile::TempDir) -> Config {
    Config {
        registry_wal_path: dir.path().join("registry.wal"),
        ..Config::from_env()
    }
}

fn schema_with_table(table_name: &str) -> Schema {
    let mut data_models = indexmap::IndexMap::new();
    data_models.insert(
        "widgets".to_string(),
        DataModelDef {
            table_name: table_name.to_string(),
            fields: indexmap::IndexMap::new(),
            indexes: Vec::new(),
            relationships: Vec::new(),
        },
    );
    Schema {
        metadata: Metadata {
            name: "widget_maker".to_string(),
            description: String::new(),
            category: "demo".to_string(),
            version: "1.0.0".to_string(),
            author: None,
            tags: None,
        },
        input_fields: indexmap::IndexMap::new(),
        output_fields: indexmap::IndexMap::new(),
        data_models,
        tools: indexmap::IndexMap::new(),
        pipeline: Pipeline {
            steps: Vec::new(),
            parallel_execution: false,
            max_retries: 0,
            timeout_seconds: None,
        },
        limits: Default::default(),
    }
}

#[tokio::test]
async fn start_creates_the_registry_wal_directory() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir);
    let daemon = Daemon::start(config).await.unwrap();
    assert!(daemon.registry.list(&Default::default()).await.is_empty());
}

#[tokio::test]
async fn table_dropper_reports_every_managed_table_when_confirmed() {
    let dir = tempdir().unwrap();
    let mut config = test_config(&dir);
    config.migrator_confirm_destructive_default = true;
    let daemon = Daemon::start(config).await.unwrap();

    let report = daemon
        .table_dropper()
        .drop_tables_for("widget_maker", &schema_with_table("widgets"))
        .await;
    assert_eq!(report.tables_dropped, 1);
}

#[tokio::test]
async fn table_dropper_refuses_without_confirmation() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir);
    let daemon = Daemon::start(config).await.unwrap();

    let report = daemon
        .table_dropper()
        .drop_tables_for("widget_maker", &schema_with_table("widgets"))
        .await;
    assert_eq!(report.tables_dropped, 0);
}
