//! Budget CLI commands
//!
//! Implements CLI commands for a month's incomes and category allocations.

use clap::Subcommand;

use super::{parse_named_value, require_year, PeriodArgs};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Amount, BudgetCategory, CurrencyFormat, IncomeSource};
use crate::services::{AllocationSummary, BudgetStore};
use crate::storage::KeyValueStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show how a month's income is split across its categories
    Show {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Replace a month's income sources (keeps its categories)
    #[command(name = "set-income")]
    SetIncome {
        /// Income sources as NAME=VALUE (e.g. "Meu Salário=3500,00")
        #[arg(required = true)]
        sources: Vec<String>,
        #[command(flatten)]
        period: PeriodArgs,
        /// Apply to every month of the year
        #[arg(long)]
        all_months: bool,
    },

    /// Replace a month's budget categories (keeps its incomes)
    #[command(name = "set-categories", alias = "set-category")]
    SetCategories {
        /// Categories as NAME=PERCENT (e.g. "Lazer=20")
        #[arg(required = true)]
        categories: Vec<String>,
        #[command(flatten)]
        period: PeriodArgs,
        /// Apply to every month of the year
        #[arg(long)]
        all_months: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStore>(
    store: &mut BudgetStore<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    match cmd {
        BudgetCommands::Show { period } => {
            let (year, month) = (period.year(), period.month());
            let record = store
                .ledger()
                .month(year, month)
                .ok_or_else(|| BudgetError::year_not_found(year))?;

            println!("Budget for {} {}", month, year);
            print!("{}", format_allocation(&AllocationSummary::of(record), &settings.currency));
        }

        BudgetCommands::SetIncome {
            sources,
            period,
            all_months,
        } => {
            let (year, month) = (period.year(), period.month());
            require_year(store, year)?;

            let incomes = sources
                .iter()
                .map(|arg| parse_income(arg.as_str()))
                .collect::<BudgetResult<Vec<_>>>()?;
            let budgets = store
                .ledger()
                .month(year, month)
                .map(|m| m.budgets.clone())
                .unwrap_or_default();

            store.set_budget_state(year, month, &incomes, &budgets, all_months);
            println!(
                "Set {} income source(s) for {}",
                incomes.len(),
                scope(year, &period, all_months)
            );
        }

        BudgetCommands::SetCategories {
            categories,
            period,
            all_months,
        } => {
            let (year, month) = (period.year(), period.month());
            require_year(store, year)?;

            let budgets = categories
                .iter()
                .map(|arg| parse_category(arg.as_str()))
                .collect::<BudgetResult<Vec<_>>>()?;
            let incomes = store
                .ledger()
                .month(year, month)
                .map(|m| m.incomes.clone())
                .unwrap_or_default();

            store.set_budget_state(year, month, &incomes, &budgets, all_months);
            println!(
                "Set {} categor{} for {}",
                budgets.len(),
                if budgets.len() == 1 { "y" } else { "ies" },
                scope(year, &period, all_months)
            );

            let total: f64 = budgets.iter().map(|b| b.percentage).sum();
            if (total - 100.0).abs() >= 0.01 {
                println!("Note: percentages add up to {:.1}%, not 100%", total);
            }
        }
    }

    Ok(())
}

fn scope(year: i32, period: &PeriodArgs, all_months: bool) -> String {
    if all_months {
        format!("every month of {}", year)
    } else {
        format!("{} {}", period.month(), year)
    }
}

fn parse_income(arg: &str) -> BudgetResult<IncomeSource> {
    let (name, value) = parse_named_value(arg)?;
    let value = Amount::parse(&value)
        .map_err(|e| BudgetError::Validation(format!("Invalid income value: {}", e)))?;
    Ok(IncomeSource::new(name, value.value()))
}

fn parse_category(arg: &str) -> BudgetResult<BudgetCategory> {
    let (name, value) = parse_named_value(arg)?;
    let percentage: f64 = value
        .trim_end_matches('%')
        .replace(',', ".")
        .parse()
        .map_err(|_| BudgetError::Validation(format!("Invalid percentage: {}", value)))?;
    if !percentage.is_finite() || percentage < 0.0 {
        return Err(BudgetError::Validation(format!("Invalid percentage: {}", value)));
    }
    Ok(BudgetCategory::new(name, percentage))
}

/// Format an allocation summary as a table
pub fn format_allocation(summary: &AllocationSummary, currency: &CurrencyFormat) -> String {
    let mut output = String::new();

    output.push_str(&format!("{:<24} {:>8} {:>18}\n", "CATEGORY", "PERCENT", "AMOUNT"));
    output.push_str(&"-".repeat(52));
    output.push('\n');
    for category in &summary.categories {
        output.push_str(&format!(
            "{:<24} {:>7.1}% {:>18}\n",
            category.name,
            category.percentage,
            currency.format(category.amount)
        ));
    }
    output.push_str(&"-".repeat(52));
    output.push('\n');
    output.push_str(&format!(
        "{:<24} {:>7.1}% {:>18}\n",
        "Total",
        summary.total_percentage,
        currency.format(summary.income)
    ));
    if !summary.is_balanced() {
        output.push_str("Allocations do not add up to 100%\n");
    }

    output
}
