//! Expense CLI commands
//!
//! Implements CLI commands for entering item values.

use clap::Subcommand;

use super::{require_year, PeriodArgs};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Amount;
use crate::services::{BudgetStore, ExpenseEntry};
use crate::storage::KeyValueStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Set an item's value for a month
    Set {
        /// Item name
        item: String,
        /// Value (e.g. "120,50")
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Add to (or, with a leading "-", subtract from) an item's value
    Add {
        /// Item name
        item: String,
        /// Amount to add, e.g. "50" or "- 20"
        #[arg(allow_hyphen_values = true)]
        input: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: KeyValueStore>(
    store: &mut BudgetStore<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    match cmd {
        ExpenseCommands::Set {
            item,
            value,
            period,
        } => {
            let (year, month) = (period.year(), period.month());
            require_year(store, year)?;

            let value = Amount::parse(&value)
                .map_err(|e| BudgetError::Validation(format!("Invalid value: {}", e)))?;
            store.set_expense_value(year, month, &item, value);
            println!(
                "{} in {} {}: {}",
                item,
                month,
                year,
                settings.currency.format(value)
            );
        }

        ExpenseCommands::Add {
            item,
            input,
            period,
        } => {
            let (year, month) = (period.year(), period.month());
            require_year(store, year)?;

            if matches!(ExpenseEntry::parse(&input), ExpenseEntry::Invalid) {
                return Err(BudgetError::Validation(format!("Invalid amount: {}", input)));
            }

            match store.record_expense_entry(year, month, &item, &input) {
                Some(value) => println!(
                    "{} in {} {}: {}",
                    item,
                    month,
                    year,
                    settings.currency.format(value)
                ),
                None => println!("Nothing to record."),
            }
        }
    }

    Ok(())
}
