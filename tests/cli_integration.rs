// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Vertimar
//! Integration tests for the vertimar CLI commands

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run vertimar with the given arguments and data directory
fn vertimar(data_dir: &TempDir, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vertimar").expect("binary exists");
    cmd.env("VERTIMAR_DATA_DIR", data_dir.path()).args(args);
    cmd
}

/// Seed the catalog with one product and one client through the CLI
fn seed_catalog(data_dir: &TempDir) {
    vertimar(
        data_dir,
        &[
            "catalog", "add", "P1",
            "--name", "Widget",
            "--price", "10",
            "--stock", "100",
        ],
    )
    .assert()
    .success();

    vertimar(
        data_dir,
        &[
            "client", "add", "C1",
            "--name", "Acme SA",
            "--tax-id", "30-11111111-1",
            "--tax-category", "Responsable Inscripto",
        ],
    )
    .assert()
    .success();
}

#[test]
fn test_catalog_lifecycle() {
    let data_dir = TempDir::new().unwrap();

    // Empty catalog
    vertimar(&data_dir, &["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products defined"));

    // Add and list
    vertimar(
        &data_dir,
        &[
            "catalog", "add", "P1",
            "--name", "Widget",
            "--price", "10.50",
            "--tax-rate", "21",
            "--stock", "5",
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("Saved product: Widget (P1)"));

    vertimar(&data_dir, &["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("P1").and(predicate::str::contains("10.50")));

    // Show
    vertimar(&data_dir, &["catalog", "show", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tax rate: 21%"));

    // Unknown product
    vertimar(&data_dir, &["catalog", "show", "P9"]).assert().failure();
}

#[test]
fn test_catalog_add_uses_configured_default_tax_rate() {
    let data_dir = TempDir::new().unwrap();

    vertimar(&data_dir, &["config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_tax_rate: 21"));

    // No --tax-rate: the configured default applies
    vertimar(
        &data_dir,
        &["catalog", "add", "P1", "--name", "Widget", "--price", "10"],
    )
    .assert()
    .success();

    vertimar(&data_dir, &["catalog", "show", "P1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tax rate: 21%"));

    // An overridden default flows into new products
    vertimar(
        &data_dir,
        &["catalog", "add", "P2", "--name", "Reduced", "--price", "10"],
    )
    .env("VERTIMAR_DEFAULT_TAX_RATE", "10.5")
    .assert()
    .success();

    vertimar(&data_dir, &["catalog", "show", "P2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tax rate: 10.5%"));
}

#[test]
fn test_client_lifecycle() {
    let data_dir = TempDir::new().unwrap();

    vertimar(&data_dir, &["client", "add", "C1", "--name", "Acme SA"])
        .assert()
        .success();

    vertimar(&data_dir, &["client", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme SA"));

    // Default tax category applies when none is given
    vertimar(&data_dir, &["client", "show", "C1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Consumidor Final"));
}

#[test]
fn test_build_order_json() {
    let data_dir = TempDir::new().unwrap();
    seed_catalog(&data_dir);

    let script = data_dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "set_client", "client_id": "C1"},
            {"op": "add", "product_id": "P1", "quantity": 1.3},
            {"op": "add", "product_id": "P1", "quantity": 0.5},
            {"op": "notes", "text": "entrega lunes"}
        ]"#,
    )
    .unwrap();

    let out = data_dir.path().join("order.json");
    vertimar(
        &data_dir,
        &[
            "build",
            "--script", script.to_str().unwrap(),
            "--out", out.to_str().unwrap(),
        ],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("OK").and(predicate::str::contains("1 lines")));

    let payload: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();

    assert!(payload["id"].as_str().unwrap().starts_with("order:"));
    assert_eq!(payload["client"]["name"], "Acme SA");
    assert_eq!(payload["notes"], "entrega lunes");
    // 1.3 snaps to 1.5, merged with 0.5 -> 2 units at 10 = 20.00 + 21% IVA
    assert_eq!(payload["line_items"][0]["quantity"], 2.0);
    assert_eq!(payload["totals"]["subtotal"], 20.0);
    assert_eq!(payload["totals"]["grand_total"], 24.2);
}

#[test]
fn test_build_order_quote_format() {
    let data_dir = TempDir::new().unwrap();
    seed_catalog(&data_dir);

    let script = data_dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "set_client", "client_id": "C1"},
            {"op": "add", "product_id": "P1", "quantity": 1}
        ]"#,
    )
    .unwrap();

    vertimar(
        &data_dir,
        &["build", "--script", script.to_str().unwrap(), "--format", "quote"],
    )
    .assert()
    .success()
    .stdout(
        predicate::str::contains("PRESUPUESTO")
            .and(predicate::str::contains("Acme SA"))
            // 10 * 1.21 tax-inclusive unit price
            .and(predicate::str::contains("12.10")),
    );
}

#[test]
fn test_build_skips_over_stock_steps() {
    let data_dir = TempDir::new().unwrap();

    vertimar(
        &data_dir,
        &[
            "catalog", "add", "P1",
            "--name", "Scarce",
            "--price", "10",
            "--stock", "1",
        ],
    )
    .assert()
    .success();

    let script = data_dir.path().join("script.json");
    std::fs::write(
        &script,
        r#"[
            {"op": "add", "product_id": "P1", "quantity": 5},
            {"op": "add", "product_id": "P1", "quantity": 1},
            {"op": "set_quantity", "product_id": "missing", "quantity": 2}
        ]"#,
    )
    .unwrap();

    vertimar(
        &data_dir,
        &["build", "--script", script.to_str().unwrap()],
    )
    .assert()
    .success()
    .stdout(
        predicate::str::contains("SKIPPED (insufficient stock")
            .and(predicate::str::contains("SKIPPED (no effect)"))
            .and(predicate::str::contains("2 steps skipped")),
    );
}

#[test]
fn test_build_rejects_unknown_format() {
    let data_dir = TempDir::new().unwrap();
    seed_catalog(&data_dir);

    let script = data_dir.path().join("script.json");
    std::fs::write(&script, r#"[{"op": "clear"}]"#).unwrap();

    vertimar(
        &data_dir,
        &["build", "--script", script.to_str().unwrap(), "--format", "xml"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("Unknown output format"));
}

#[test]
fn test_completions_generate() {
    let data_dir = TempDir::new().unwrap();

    vertimar(&data_dir, &["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vertimar"));
}
