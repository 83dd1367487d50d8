use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

const EXPORT: &str = "\
date,name,amount,status,category,type,account,excluded
2026-01-01,Salary,-5000.00,cleared,Salary,income,Checking,false
2026-01-02,Grocery Store,85.50,cleared,Food & Dining,regular,Credit Card,false
2026-01-05,Card payment,700.00,cleared,Transfers,regular,Checking,true
";

fn write_export(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("transactions.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

fn sankey(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sankey").unwrap();
    cmd.env("CASHFLOW_SANKEY_DIR", dir.path().join("config"));
    cmd
}

#[test]
fn dashboard_shows_metrics() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["dashboard", "--range", "all", "--today", "2026-01-31"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash Flow: All Time (2026-01-01 to 2026-01-31)"))
        .stdout(predicate::str::contains("$5,000.00"))
        .stdout(predicate::str::contains("$85.50"))
        .stdout(predicate::str::contains("98.29%"))
        .stdout(predicate::str::contains("Food & Dining (1.71%)"))
        .stdout(predicate::str::contains("Transfers").not());
}

#[test]
fn include_excluded_counts_flagged_rows() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["dashboard", "--range", "all", "--today", "2026-01-31", "--include-excluded"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transfers (14.00%)"));
}

#[test]
fn category_drill_down() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["category", "--range", "all", "--today", "2026-01-31"])
        .arg(&file)
        .arg("Food & Dining")
        .assert()
        .success()
        .stdout(predicate::str::contains("Top Merchants/Payees in Food & Dining"))
        .stdout(predicate::str::contains("Grocery Store"));
}

#[test]
fn categories_lists_expense_categories() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["categories", "-r", "all", "-t", "2026-01-31"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("  Food & Dining"));
}

#[test]
fn missing_columns_are_named() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, "date,name,amount\n2026-01-01,Salary,-5000.00\n");

    sankey(&dir)
        .arg("dashboard")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column(s)"))
        .stderr(predicate::str::contains("category"));
}

#[test]
fn bad_date_aborts_load() {
    let dir = TempDir::new().unwrap();
    let file = write_export(
        &dir,
        "date,name,amount,type,category,account,excluded\nnot-a-date,Salary,-5000.00,income,Salary,Checking,false\n",
    );

    sankey(&dir)
        .arg("dashboard")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date on row 2"));
}

#[test]
fn unreadable_amount_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = write_export(
        &dir,
        "date,name,amount,type,category,account,excluded\n2026-01-02,Mystery,abc,regular,Food,Card,false\n",
    );

    sankey(&dir)
        .args(["dashboard", "--range", "all", "--today", "2026-01-31"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 value(s) could not be read"));
}

#[test]
fn sub_cent_amount_is_reported() {
    let dir = TempDir::new().unwrap();
    let file = write_export(
        &dir,
        "date,name,amount,type,category,account,excluded\n2026-01-02,Interest,0.004,regular,Fees,Card,false\n",
    );

    sankey(&dir)
        .args(["dashboard", "--range", "all", "--today", "2026-01-31"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("1 amount(s) had more than two decimals"))
        .stderr(predicate::str::contains("could not be read").not());
}

#[test]
fn export_json_states_amount_unit() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    let output = sankey(&dir)
        .args(["export", "-r", "all", "-t", "2026-01-31", "-c", "Food & Dining"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["amount_unit"], "cents");
    assert_eq!(value["charts"]["merchant_pie"][0]["value"], 85.5);
}

#[test]
fn invalid_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["dashboard", "--range", "fortnight"])
        .arg(&file)
        .assert()
        .failure();
}

#[test]
fn export_json_to_file() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);
    let output = dir.path().join("view.json");

    sankey(&dir)
        .args(["export", "--range", "all", "--today", "2026-01-31", "--format", "json", "--output"])
        .arg(&output)
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("View exported to"));

    let contents = std::fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["view"]["metrics"]["total_expenses"], 8550);
    assert_eq!(value["view"]["flow"]["edges"].as_array().unwrap().len(), 2);
}

#[test]
fn export_csv_to_stdout() {
    let dir = TempDir::new().unwrap();
    let file = write_export(&dir, EXPORT);

    sankey(&dir)
        .args(["export", "-r", "all", "-t", "2026-01-31", "-f", "csv"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Food & Dining,85.50,1"));
}

#[test]
fn init_and_config() {
    let dir = TempDir::new().unwrap();

    sankey(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings written to"));

    assert!(dir.path().join("config").join("config.json").exists());

    sankey(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Default range:     Last Month"))
        .stdout(predicate::str::contains("Excluded rows:     drop"));
}
