mod common;

use assert_cmd::Command;
use common::{seed_store, write_config};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Seeded database plus a config file pointing at it
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let db = tmp.path().join("nesql.db");
    seed_store(&db);
    let config_path = write_config(tmp.path(), &db, 20);
    (tmp, config_path)
}

/// Run the binary with NESQL_CONFIG_PATH pointing at `config_path`
fn nesql(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nesql-rust").unwrap();
    cmd.env("NESQL_CONFIG_PATH", config_path);
    cmd
}

// ==================== Tables ====================

#[test]
fn test_tables_lists_every_plugin() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("Base"))
        .stdout(predicate::str::contains("Thaumcraft Aspect Entry"))
        .stdout(predicate::str::contains("gregtechrecipe"));
}

#[test]
fn test_tables_json() {
    let (_tmp, config_path) = setup_test_env();
    let output = nesql(&config_path)
        .args(["tables", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[2]["tables"][0]["path"], "gregtechrecipe");
}

// ==================== Search ====================

#[test]
fn test_search_recipe_by_input() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .args(["search", "recipe", "-f", "inputItemId=iron_ingot", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("id,label,description,url\n"))
        .stdout(predicate::str::contains("/recipe/view/r1"))
        .stdout(predicate::str::contains("/recipe/view/r3"))
        .stdout(predicate::str::contains("/recipe/view/r2").not());
}

#[test]
fn test_search_json_page_clamped() {
    let (_tmp, config_path) = setup_test_env();
    let output = nesql(&config_path)
        .args(["search", "item", "--page", "99", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["page"], 1);
    assert_eq!(json["total_count"], 8);
}

#[test]
fn test_search_unknown_table_fails() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .args(["search", "dragons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown table 'dragons'"));
}

#[test]
fn test_search_malformed_filter_fails() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .args(["search", "item", "-f", "modId"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected key=value"));
}

// ==================== View ====================

#[test]
fn test_view_entity() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .args(["view", "fluidcontainer", "water_bucket"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"table\": \"fluidcontainer\""))
        .stdout(predicate::str::contains("Water Bucket"));
}

#[test]
fn test_view_missing_entity_fails() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .args(["view", "item", "unobtainium"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 'unobtainium' not found"));
}

// ==================== Status & Config ====================

#[test]
fn test_status_counts() {
    let (_tmp, config_path) = setup_test_env();
    nesql(&config_path)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("recipe_type"));
}

#[test]
fn test_explicit_config_flag() {
    let (tmp, config_path) = setup_test_env();
    Command::cargo_bin("nesql-rust")
        .unwrap()
        .env("NESQL_CONFIG_PATH", tmp.path().join("absent.yaml"))
        .args(["--config", config_path.to_str().unwrap(), "search", "quest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Getting Started"));
}

#[test]
fn test_missing_database_fails() {
    let tmp = tempdir().unwrap();
    let config_path = write_config(tmp.path(), &tmp.path().join("missing.db"), 20);
    nesql(&config_path)
        .args(["search", "item"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
}
