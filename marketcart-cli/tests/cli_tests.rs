//! End-to-end tests driving the `marketcart` binary against a scratch
//! storage file.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_marketcart"));
    cmd.arg("--storage")
        .arg(dir.join("storage.json"))
        .arg("--config")
        .arg(dir.join("config.json"))
        .args(["--format", "json", "--quiet"]);
    cmd
}

fn marketcart(dir: &Path, args: &[&str]) -> serde_json::Value {
    let assert = command(dir).args(args).assert().success();
    serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON")
}

fn add(dir: &Path, id: &str) -> serde_json::Value {
    marketcart(
        dir,
        &["add", "--id", id, "--title", "Mug", "--image-url", "https://img/m.png", "--price", "12.5"],
    )
}

#[test]
fn test_empty_cart_lists_nothing() {
    let dir = TempDir::new().unwrap();
    let cart = marketcart(dir.path(), &["list"]);
    assert_eq!(cart["lines"], 0);
}

#[test]
fn test_add_merges_across_runs() {
    let dir = TempDir::new().unwrap();
    assert_eq!(add(dir.path(), "42")["quantity"], 1);
    assert_eq!(add(dir.path(), "42")["quantity"], 2);
    add(dir.path(), "7");

    let cart = marketcart(dir.path(), &["list"]);
    assert_eq!(cart["lines"], 2);
    assert_eq!(cart["products"][0]["id"], "42");
    assert_eq!(cart["products"][0]["quantity"], 2);
    assert_eq!(cart["products"][1]["id"], "7");
}

#[test]
fn test_add_rejects_non_finite_price() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "42");

    for price in ["NaN", "inf"] {
        command(dir.path())
            .args(["add", "--id", "n", "--title", "Broken", "--image-url", "x", "--price", price])
            .assert()
            .failure()
            .stderr(predicate::str::contains("finite"));
    }

    let cart = marketcart(dir.path(), &["list"]);
    assert_eq!(cart["lines"], 1);
    assert_eq!(cart["products"][0]["id"], "42");
}

#[test]
fn test_decrement_stops_at_one() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "42");

    let result = marketcart(dir.path(), &["decrement", "42"]);
    assert_eq!(result["changed"], false);
    assert_eq!(result["quantity"], 1);

    marketcart(dir.path(), &["increment", "42"]);
    let result = marketcart(dir.path(), &["decrement", "42"]);
    assert_eq!(result["changed"], true);
    assert_eq!(result["quantity"], 1);
}

#[test]
fn test_unknown_id_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let result = marketcart(dir.path(), &["increment", "zzz"]);
    assert_eq!(result["changed"], false);
    assert!(result.get("quantity").is_none());
}

#[test]
fn test_clear_empties_cart() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "42");
    marketcart(dir.path(), &["clear"]);
    assert_eq!(marketcart(dir.path(), &["list"])["lines"], 0);
}

#[test]
fn test_bad_config_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{not json").unwrap();

    command(dir.path()).arg("list").assert().failure().code(1);
}

#[test]
fn test_snapshot_file_format() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "42");

    let raw = std::fs::read_to_string(dir.path().join("storage.json")).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let snapshot = map["@Marketplace:products"].as_str().unwrap();
    let entries: serde_json::Value = serde_json::from_str(snapshot).unwrap();
    assert_eq!(
        entries,
        serde_json::json!([{
            "id": "42",
            "title": "Mug",
            "imageUrl": "https://img/m.png",
            "price": 12.5,
            "quantity": 1
        }])
    );
}
