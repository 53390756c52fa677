//! Month CLI commands
//!
//! Shows the expense sheet of a month. The category filter and view mode
//! are remembered between runs.

use clap::Subcommand;

use super::PeriodArgs;
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::reports::{ExpenseSheet, SheetOptions};
use crate::services::BudgetStore;
use crate::storage::{KeyValueStore, Preferences, ViewMode, ALL_CATEGORIES};

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show a month's items, values and balance
    Show {
        #[command(flatten)]
        period: PeriodArgs,
        /// Only show items of this category ("TODAS" for all)
        #[arg(short, long)]
        category: Option<String>,
        /// Lay items out as columns
        #[arg(long, conflicts_with = "list")]
        grid: bool,
        /// One line per item
        #[arg(long)]
        list: bool,
        /// Show every month (grid view)
        #[arg(long)]
        all_months: bool,
    },
}

/// Handle a month command
pub fn handle_month_command<S: KeyValueStore>(
    store: &mut BudgetStore<S>,
    settings: &Settings,
    cmd: MonthCommands,
) -> BudgetResult<()> {
    match cmd {
        MonthCommands::Show {
            period,
            category,
            grid,
            list,
            all_months,
        } => {
            let year = period.year();
            let mut prefs = Preferences::load(store.backend())?;

            if let Some(category) = category {
                prefs.category = Some(category).filter(|c| !c.is_empty() && c != ALL_CATEGORIES);
            }
            if grid {
                prefs.view_mode = ViewMode::Grid;
            } else if list {
                prefs.view_mode = ViewMode::List;
            }
            prefs.save(store.backend_mut())?;

            let options = SheetOptions {
                month: period.month(),
                view_mode: prefs.view_mode,
                category: prefs.category,
                show_all_months: all_months,
            };
            let sheet = ExpenseSheet::generate(store.ledger(), year, &options)
                .ok_or_else(|| BudgetError::year_not_found(year))?;

            if let Some(category) = &options.category {
                println!("Category: {}", category);
            }
            print!("{}", sheet.format_terminal(&settings.currency));
        }
    }

    Ok(())
}
