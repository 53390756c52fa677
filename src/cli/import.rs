//! CLI command handler for workbook import
//!
//! Reads the three workbook tables from a directory and replaces the whole
//! ledger with what they describe.

use std::path::Path;

use crate::error::BudgetResult;
use crate::export::Workbook;
use crate::services::{import_workbook, BudgetStore, ImportSummary};
use crate::storage::KeyValueStore;

/// Handle the import command
///
/// With `dry_run`, the workbook is read and summarized but the ledger is
/// left alone.
pub fn handle_import_command<S: KeyValueStore>(
    store: &mut BudgetStore<S>,
    dir: &Path,
    dry_run: bool,
) -> BudgetResult<()> {
    let summary = if dry_run {
        let workbook = Workbook::read_dir(dir)?;
        import_workbook(&workbook).1
    } else {
        store.import_workbook_dir(dir)?
    };

    if dry_run {
        println!("Import Preview for '{}'", dir.display());
    } else {
        println!("Imported '{}'", dir.display());
    }
    println!("{}", "=".repeat(40));
    print!("{}", format_summary(&summary));

    if dry_run {
        println!();
        println!("Nothing was changed. Run without --dry-run to replace all data.");
    } else if summary.years == 0 {
        println!();
        println!("The workbook was empty: the ledger now has no years.");
    }

    Ok(())
}

fn format_summary(summary: &ImportSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("  Years:          {}\n", summary.years));
    output.push_str(&format!("  Income rows:    {}\n", summary.incomes));
    output.push_str(&format!("  Budget rows:    {}\n", summary.budgets));
    output.push_str(&format!("  Expense rows:   {}\n", summary.expenses));
    if summary.skipped > 0 {
        output.push_str(&format!("  Skipped rows:   {}\n", summary.skipped));
    }
    output
}
