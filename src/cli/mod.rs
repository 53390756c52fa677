//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the budget store and reports.

pub mod budget;
pub mod expense;
pub mod export;
pub mod import;
pub mod item;
pub mod month;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, handle_template_command};
pub use import::handle_import_command;
pub use item::{handle_item_command, ItemCommands};
pub use month::{handle_month_command, MonthCommands};
pub use report::{
    handle_chart_command, handle_goal_command, handle_report_command, ChartArgs, GoalArgs,
    ReportCommands,
};

use clap::Args;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{current_year, Month};
use crate::services::BudgetStore;
use crate::storage::KeyValueStore;

/// Year and month selection shared by most commands
#[derive(Args, Debug, Clone, Default)]
pub struct PeriodArgs {
    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month name or number (defaults to the current month)
    #[arg(short, long)]
    pub month: Option<Month>,
}

impl PeriodArgs {
    pub fn year(&self) -> i32 {
        self.year.unwrap_or_else(current_year)
    }

    pub fn month(&self) -> Month {
        self.month.unwrap_or_else(Month::current)
    }
}

/// Fail with a "not found" error unless the year exists
///
/// The store itself ignores operations on missing years; the CLI reports
/// them instead.
pub(crate) fn require_year<S: KeyValueStore>(store: &BudgetStore<S>, year: i32) -> BudgetResult<()> {
    if store.ledger().contains_year(year) {
        Ok(())
    } else {
        Err(BudgetError::year_not_found(year))
    }
}

/// Split a `name=value` argument at its last `=`
pub(crate) fn parse_named_value(arg: &str) -> BudgetResult<(String, String)> {
    let (name, value) = arg.rsplit_once('=').ok_or_else(|| {
        BudgetError::Validation(format!("Expected NAME=VALUE, got '{}'", arg))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(BudgetError::Validation(format!("Missing name in '{}'", arg)));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
