//! CLI commands for workbook export
//!
//! Writes a year of the ledger, or an example template, as the three
//! workbook tables.

use std::path::Path;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_year, template, BUDGETS_FILE, EXPENSES_FILE, INCOMES_FILE};
use crate::services::BudgetStore;
use crate::storage::KeyValueStore;

/// Handle the export command
pub fn handle_export_command<S: KeyValueStore>(
    store: &BudgetStore<S>,
    settings: &Settings,
    dir: &Path,
    year: i32,
) -> BudgetResult<()> {
    let workbook = export_year(store.ledger(), year, &settings.uncategorized_label)
        .ok_or_else(|| BudgetError::year_not_found(year))?;
    workbook.write_dir(dir)?;

    println!("Exported {} to {}", year, dir.display());
    println!("  {} ({} rows)", INCOMES_FILE, workbook.incomes.len());
    println!("  {} ({} rows)", BUDGETS_FILE, workbook.budgets.len());
    println!("  {} ({} rows)", EXPENSES_FILE, workbook.expenses.len());
    Ok(())
}

/// Handle the template command
pub fn handle_template_command(dir: &Path, year: i32) -> BudgetResult<()> {
    template(year).write_dir(dir)?;

    println!("Wrote an example workbook to {}", dir.display());
    println!("Fill in the three tables and run 'budget import {}'", dir.display());
    Ok(())
}
