use std::path::Path;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use tempfile::TempDir;

const BIN_NAME: &str = "budget";

fn budget(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("BUDGET_TRACKER_DATA_DIR", home);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn init_year(home: &Path) {
    budget(home)
        .args(["init", "--year", "2000"])
        .assert()
        .success()
        .stdout(contains("Created 2000"));
}

#[test]
fn cli_without_command_prints_overview() {
    let home = TempDir::new().unwrap();
    budget(home.path())
        .assert()
        .success()
        .stdout(contains("budget --help"));
}

#[test]
fn cli_init_is_idempotent() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["init", "--year", "2000"])
        .assert()
        .success()
        .stdout(contains("2000 already exists"));
    assert!(home.path().join("config.json").exists());
}

#[test]
fn cli_accumulates_expense_entries() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["budget", "set-income", "Salário=1000", "--year", "2000", "--month", "3"])
        .arg("--all-months")
        .assert()
        .success()
        .stdout(contains("every month of 2000"));

    budget(home.path())
        .args(["expense", "add", "Luz", "100", "--year", "2000", "--month", "março"])
        .assert()
        .success();
    budget(home.path())
        .args(["expense", "add", "Luz", "- 20", "--year", "2000", "--month", "3"])
        .assert()
        .success()
        .stdout(contains("R$ 80,00"));

    budget(home.path())
        .args(["month", "show", "--year", "2000", "--month", "3"])
        .assert()
        .success()
        .stdout(contains("80,00").and(contains("Month balance: R$ 920,00")));

    budget(home.path())
        .args(["budget", "show", "--year", "2000", "--month", "7"])
        .assert()
        .success()
        .stdout(contains("R$ 600,00"));
}

#[test]
fn cli_rejects_invalid_expense_input() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["expense", "add", "Luz", "abc", "--year", "2000", "--month", "1"])
        .assert()
        .failure()
        .stderr(contains("Invalid amount"));
}

#[test]
fn cli_reports_missing_year() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["expense", "set", "Luz", "10", "--year", "1990", "--month", "1"])
        .assert()
        .failure()
        .stderr(contains("Year not found: 1990"));
}

#[test]
fn cli_rename_refuses_duplicates_without_force() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["item", "rename", "Luz", "Energia", "--year", "2000"])
        .assert()
        .success()
        .stdout(contains("Renamed 'Luz' to 'Energia'"));

    budget(home.path())
        .args(["item", "rename", "Energia", "Água", "--year", "2000"])
        .assert()
        .failure()
        .stderr(contains("already exists: Água"));

    budget(home.path())
        .args(["item", "rename", "Energia", "Água", "--year", "2000", "--force"])
        .assert()
        .success();
}

#[test]
fn cli_item_add_needs_a_budgeted_category() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["item", "add", "Viagem", "Hotel", "--year", "2000", "--month", "1"])
        .assert()
        .failure()
        .stderr(contains("Category not found: Viagem"));

    budget(home.path())
        .args(["item", "add", "Lazer", "Teatro", "--year", "2000", "--all-months"])
        .assert()
        .success();
    budget(home.path())
        .args(["month", "show", "--year", "2000", "--month", "12", "--category", "Lazer"])
        .assert()
        .success()
        .stdout(contains("Teatro").and(contains("Cinema")).and(contains("Luz").not()));
}

#[test]
fn cli_export_reset_import_round_trip() {
    let home = TempDir::new().unwrap();
    let workbook = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["expense", "set", "Bar", "45,50", "--year", "2000", "--month", "5"])
        .assert()
        .success();
    budget(home.path())
        .arg("export")
        .arg(workbook.path())
        .args(["--year", "2000"])
        .assert()
        .success()
        .stdout(contains("Despesas_Realizadas.csv"));

    budget(home.path())
        .arg("reset")
        .assert()
        .success()
        .stdout(contains("--yes"));
    budget(home.path())
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(contains("deleted"));
    budget(home.path())
        .args(["month", "show", "--year", "2000", "--month", "5"])
        .assert()
        .failure();

    budget(home.path())
        .arg("import")
        .arg(workbook.path())
        .assert()
        .success()
        .stdout(contains("Years:          1"));
    budget(home.path())
        .args(["month", "show", "--year", "2000", "--month", "5"])
        .assert()
        .success()
        .stdout(contains("45,50"));
}

#[test]
fn cli_import_of_missing_directory_fails() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["import", "/nonexistent/budget-workbook"])
        .assert()
        .failure()
        .stderr(contains("Import error"));
    budget(home.path())
        .args(["month", "show", "--year", "2000", "--month", "1"])
        .assert()
        .success();
}

#[test]
fn cli_annual_report_views() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["budget", "set-income", "Salário=2000", "--year", "2000", "--month", "2"])
        .assert()
        .success();
    budget(home.path())
        .args(["expense", "set", "Cinema", "30", "--year", "2000", "--month", "2"])
        .assert()
        .success();

    budget(home.path())
        .args(["report", "annual", "--year", "2000"])
        .assert()
        .success()
        .stdout(contains("FEVEREIRO").and(contains("R$ 2.000,00")));
    budget(home.path())
        .args(["report", "annual", "--year", "2000", "--view", "by-item"])
        .assert()
        .success()
        .stdout(contains("Expenses by item").and(contains("Cinema")));
}

#[test]
fn cli_chart_and_goal() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["budget", "set-income", "Salário=4000", "--year", "2000", "--month", "1"])
        .assert()
        .success();
    budget(home.path())
        .args(["expense", "set", "Água", "100", "--year", "2000", "--month", "1"])
        .assert()
        .success();

    budget(home.path())
        .args(["chart", "--year", "2000", "--period", "1"])
        .assert()
        .success()
        .stdout(contains("Gasto Fixo").and(contains("Saldo Disponível")));
    budget(home.path())
        .args(["chart", "--year", "2000", "--period", "year", "--category", "Lazer"])
        .assert()
        .success()
        .stdout(contains("Nenhuma despesa para exibir."));

    budget(home.path())
        .args(["goal", "Viagem", "6000", "12", "--year", "2000", "--month", "1"])
        .assert()
        .success()
        .stdout(contains("R$ 500,00").and(contains("12.5%")));
}

#[test]
fn cli_history_lists_changes() {
    let home = TempDir::new().unwrap();
    init_year(home.path());

    budget(home.path())
        .args(["history", "-n", "5"])
        .assert()
        .success()
        .stdout(contains("CREATE"));
}
