//! Workbook import service
//!
//! Turns the three interchange tables into a complete replacement ledger.
//! Building the ledger never fails: rows that cannot be placed are skipped
//! and counted. Failures to read the files happen earlier, in
//! [`Workbook::read_dir`](crate::export::Workbook::read_dir).

use tracing::{debug, warn};

use crate::error::BudgetResult;
use crate::export::Workbook;
use crate::models::{Amount, BudgetCategory, IncomeSource, Ledger, Month, MonthRecord};
use crate::storage::KeyValueStore;

use super::budget_store::BudgetStore;

/// Row counts of an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub years: usize,
    pub incomes: usize,
    pub budgets: usize,
    pub expenses: usize,
    /// Rows dropped for a missing year, unknown month or missing name
    pub skipped: usize,
}

/// Build the ledger described by a workbook
///
/// Numbers missing from a row, or not finite, default to 0. Every budget row gives its
/// category an item list, and every expense row adds its item to its
/// category's list once and sets the item's value. Imported years are
/// padded to twelve months.
pub fn import_workbook(workbook: &Workbook) -> (Ledger, ImportSummary) {
    let mut ledger = Ledger::new();
    let mut summary = ImportSummary::default();

    for row in &workbook.incomes {
        let Some(name) = row.source.as_deref() else {
            summary.skipped += 1;
            continue;
        };
        let Some(month) = target_month(&mut ledger, row.year, row.month.as_deref()) else {
            summary.skipped += 1;
            continue;
        };
        month
            .incomes
            .push(IncomeSource::new(name, finite_or_zero(row.value)));
        summary.incomes += 1;
    }

    for row in &workbook.budgets {
        let Some(category) = row.category.as_deref() else {
            summary.skipped += 1;
            continue;
        };
        let Some(month) = target_month(&mut ledger, row.year, row.month.as_deref()) else {
            summary.skipped += 1;
            continue;
        };
        month.budgets.push(BudgetCategory::new(
            category,
            finite_or_zero(row.percentage),
        ));
        month.items.entry(category.to_string()).or_default();
        summary.budgets += 1;
    }

    for row in &workbook.expenses {
        let (Some(category), Some(item)) = (row.category.as_deref(), row.item.as_deref()) else {
            summary.skipped += 1;
            continue;
        };
        let Some(month) = target_month(&mut ledger, row.year, row.month.as_deref()) else {
            summary.skipped += 1;
            continue;
        };
        let list = month.items.entry(category.to_string()).or_default();
        if !list.iter().any(|n| n == item) {
            list.push(item.to_string());
        }
        month
            .expenses
            .insert(item.to_string(), Amount::new(finite_or_zero(row.value)));
        summary.expenses += 1;
    }

    ledger.fill_missing_months();
    summary.years = ledger.years().len();

    if summary.skipped > 0 {
        warn!("Import skipped {} row(s)", summary.skipped);
    }
    debug!(?summary, "Built ledger from workbook");

    (ledger, summary)
}

/// A number cell, with missing, `NaN` and infinite values read as 0
fn finite_or_zero(cell: Option<f64>) -> f64 {
    cell.filter(|v| v.is_finite()).unwrap_or_default()
}

/// The month record a row belongs to, creating the year on demand
///
/// Rows without a year or with an unknown month name get `None` and never
/// create a year.
fn target_month<'a>(
    ledger: &'a mut Ledger,
    year: Option<i32>,
    month: Option<&str>,
) -> Option<&'a mut MonthRecord> {
    let year = year?;
    let month = Month::from_name(month?.trim())?;
    Some(
        ledger
            .year_or_empty(year)
            .months
            .entry(month)
            .or_insert_with(MonthRecord::empty),
    )
}

impl<S: KeyValueStore> BudgetStore<S> {
    /// Replace the whole ledger with the content of a workbook directory
    ///
    /// Nothing is changed when the files cannot be read.
    pub fn import_workbook_dir(&mut self, dir: &std::path::Path) -> BudgetResult<ImportSummary> {
        let workbook = Workbook::read_dir(dir)?;
        let (ledger, summary) = import_workbook(&workbook);
        self.replace_ledger(ledger);
        Ok(summary)
    }
}
