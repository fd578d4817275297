// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box coverage for the `agc` binary surface (spec.md §6, §8 seed
//! scenarios S5/S6). Everything reachable through direct Rust calls —
//! planner ordering, executor retries, validator rejections, migration
//! apply/confirm semantics — is already covered by the owning crate's own
//! unit tests; this suite only exercises what only the process boundary
//! can: argument parsing, file I/O, and exit codes.

use assert_cmd::Command;
use std::path::Path;

fn fixture(name: &str) -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn agc() -> Command {
    Command::cargo_bin("agc").expect("agc binary is built")
}

#[test]
fn register_accepts_a_valid_schema_and_reports_its_hash() {
    let dir = tempfile::tempdir().unwrap();
    let wal = dir.path().join("registry.wal");

    let assert = agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("greeter_v1.json"))
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("registered greeter@1.0.0"));
    assert!(output.contains("schema_hash="));
    assert!(output.contains("Active"));
}

#[test]
fn register_rejects_a_schema_whose_step_references_an_undeclared_tool() {
    let dir = tempfile::tempdir().unwrap();
    let wal = dir.path().join("registry.wal");

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("invalid_schema.json"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("schema_invalid"));
}

#[test]
fn migration_plan_reports_an_additive_change_as_non_destructive() {
    let dir = tempfile::tempdir().unwrap();
    let wal = dir.path().join("registry.wal");

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("greeter_v1.json"))
        .assert()
        .success();

    let assert = agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("migration-plan")
        .arg(fixture("greeter_v2_add_column.json"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("add_column"));
    assert!(!stdout.contains("drop_column"));
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(!stderr.contains("destructive"));
}

#[test]
fn migration_plan_flags_a_dropped_column_as_destructive() {
    let dir = tempfile::tempdir().unwrap();
    let wal = dir.path().join("registry.wal");

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("greeter_v1.json"))
        .assert()
        .success();

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("migration-plan")
        .arg(fixture("greeter_v3_drop_column.json"))
        .assert()
        .success()
        .stdout(predicates::str::contains("drop_column"))
        .stderr(predicates::str::contains("destructive"));
}

#[test]
fn registering_the_same_version_twice_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let wal = dir.path().join("registry.wal");

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("greeter_v1.json"))
        .assert()
        .success();

    agc()
        .arg("--registry-wal")
        .arg(&wal)
        .arg("register")
        .arg(fixture("greeter_v1.json"))
        .assert()
        .failure()
        .stderr(predicates::str::contains("version_exists"));
}
