//! Expense item CLI commands
//!
//! Implements CLI commands for the item catalog of a year's categories.

use clap::Subcommand;

use super::{require_year, PeriodArgs};
use crate::error::{BudgetError, BudgetResult};
use crate::models::current_year;
use crate::services::BudgetStore;
use crate::storage::KeyValueStore;

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to a category
    Add {
        /// Category name
        category: String,
        /// Item name
        name: String,
        #[command(flatten)]
        period: PeriodArgs,
        /// Add to every month of the year instead of the selected month
        #[arg(long)]
        all_months: bool,
    },

    /// Remove an item (and its values) from every month of the year
    Remove {
        /// Item name
        name: String,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Rename an item in every month of the year
    Rename {
        /// Current item name
        old_name: String,
        /// New item name
        new_name: String,
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Overwrite an existing item with the same name
        #[arg(long)]
        force: bool,
    },
}

/// Handle an item command
pub fn handle_item_command<S: KeyValueStore>(
    store: &mut BudgetStore<S>,
    cmd: ItemCommands,
) -> BudgetResult<()> {
    match cmd {
        ItemCommands::Add {
            category,
            name,
            period,
            all_months,
        } => {
            let (year, month) = (period.year(), period.month());
            require_year(store, year)?;

            let name = name.trim();
            if name.is_empty() {
                return Err(BudgetError::Validation("Item name cannot be empty".into()));
            }

            let budgeted = store.ledger().year(year).is_some_and(|y| {
                y.iter()
                    .filter(|(m, _)| all_months || *m == month)
                    .any(|(_, record)| record.has_category(&category))
            });
            if !budgeted {
                return Err(BudgetError::category_not_found(&category));
            }

            store.add_expense_item_at(year, &category, name, all_months, month);
            if all_months {
                println!("Added '{}' to {} in every month of {}", name, category, year);
            } else {
                println!("Added '{}' to {} in {} {}", name, category, month, year);
            }
        }

        ItemCommands::Remove { name, year } => {
            let year = year.unwrap_or_else(current_year);
            require_year(store, year)?;

            let name = name.trim();
            let known = store.ledger().year(year).is_some_and(|y| {
                y.iter()
                    .any(|(_, m)| m.category_of(name).is_some() || m.expenses.contains_key(name))
            });
            if !known {
                return Err(BudgetError::item_not_found(name));
            }

            store.remove_expense_item(year, name);
            println!("Removed '{}' from {}", name, year);
        }

        ItemCommands::Rename {
            old_name,
            new_name,
            year,
            force,
        } => {
            let year = year.unwrap_or_else(current_year);
            if force {
                require_year(store, year)?;
                store.rename_expense_item(year, &old_name, &new_name);
            } else {
                store.try_rename_expense_item(year, &old_name, &new_name)?;
            }
            println!("Renamed '{}' to '{}' in {}", old_name.trim(), new_name.trim(), year);
        }
    }

    Ok(())
}
