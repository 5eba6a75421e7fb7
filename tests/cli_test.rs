//! Integration tests for the checkout CLI.
//!
//! These tests run the actual binary and check what it prints.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Binary with configuration variables cleared so the builtins apply.
fn checkout_cmd() -> Command {
    let mut cmd = Command::cargo_bin("checkout").unwrap();
    cmd.env_remove("CHECKOUT_PRICE_LIST").env_remove("CHECKOUT_RULES");
    cmd
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_sample_basket_without_arguments() {
    checkout_cmd()
        .assert()
        .success()
        .stdout("2198.98\n");
}

#[test]
fn test_scans_arguments_in_order() {
    checkout_cmd()
        .args(["atv", "atv", "atv", "atv"])
        .assert()
        .success()
        .stdout("328.50\n");
}

#[test]
fn test_unknown_item_prints_zero() {
    checkout_cmd()
        .arg("xyz")
        .assert()
        .success()
        .stdout("0.00\n");
}

#[test]
fn test_receipt_output() {
    checkout_cmd()
        .args(["--receipt", "ipd", "ipd", "ipd", "ipd", "ipd", "vga"])
        .assert()
        .success()
        .stdout("sku,quantity,price\nipd,5,2499.95\nvga,1,30.00\ntotal,6,2529.95\n");
}

#[test]
fn test_price_list_from_env() {
    let prices = csv_file("sku,price\nvga,25.00\ngum,0.99\n");

    checkout_cmd()
        .env("CHECKOUT_PRICE_LIST", prices.path())
        .args(["vga", "gum", "mbp"])
        .assert()
        .success()
        .stdout("25.99\n");
}

#[test]
fn test_rules_from_env() {
    let rules = csv_file(
        "sku,rule,quantity,pay,price,standard_price\nvga,multi_buy,2,1,30.00,\nnot,a,valid,row,,\n",
    );

    // The default atv promotion is replaced, so atv pays full price.
    checkout_cmd()
        .env("CHECKOUT_RULES", rules.path())
        .args(["vga", "vga", "atv", "atv", "atv"])
        .assert()
        .success()
        .stdout("358.50\n");
}

#[test]
fn test_missing_config_file_error() {
    checkout_cmd()
        .env("CHECKOUT_RULES", "nonexistent-rules.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
