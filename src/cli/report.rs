//! Report CLI commands
//!
//! Implements the annual report, the expense chart and the savings goal
//! calculator.

use clap::{Args, Subcommand};

use super::PeriodArgs;
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{current_year, Amount, Month};
use crate::reports::{AnnualReport, AnnualView, ChartData, ChartPeriod, ChartSelection};
use crate::services::aggregation::monthly_income_total;
use crate::services::{BudgetStore, SavingsPlan};
use crate::storage::KeyValueStore;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Yearly totals with a per-month or per-item breakdown
    Annual {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Detail view: by-category or by-item
        #[arg(short, long, default_value = "by-category")]
        view: AnnualView,
    },
}

/// Arguments of the chart command
#[derive(Args)]
pub struct ChartArgs {
    /// Year (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,
    /// A month, or "year" for the whole year (defaults to the current month)
    #[arg(short, long)]
    pub period: Option<ChartPeriod>,
    /// Break down a single category by item
    #[arg(short, long, conflicts_with = "items")]
    pub category: Option<String>,
    /// Break down every item instead of every category
    #[arg(long)]
    pub items: bool,
}

/// Arguments of the goal command
#[derive(Args)]
pub struct GoalArgs {
    /// What the money is for
    pub name: String,
    /// Amount to save (e.g. "6000" or "6000,00")
    pub amount: String,
    /// Months until the deadline
    pub months: u32,
    #[command(flatten)]
    pub period: PeriodArgs,
}

/// Handle a report command
pub fn handle_report_command<S: KeyValueStore>(
    store: &BudgetStore<S>,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Annual { year, view } => {
            let year = year.unwrap_or_else(current_year);
            let report = AnnualReport::generate(store.ledger(), year);
            print!("{}", report.format_terminal(view, &settings.currency));
        }
    }

    Ok(())
}

/// Handle the chart command
pub fn handle_chart_command<S: KeyValueStore>(
    store: &BudgetStore<S>,
    settings: &Settings,
    args: ChartArgs,
) -> BudgetResult<()> {
    let year = args.year.unwrap_or_else(current_year);
    let period = args
        .period
        .unwrap_or_else(|| ChartPeriod::Month(Month::current()));
    let selection = match args.category {
        Some(category) => ChartSelection::Category(category),
        None if args.items => ChartSelection::AllItems,
        None => ChartSelection::AllCategories,
    };

    let chart = ChartData::generate(store.ledger(), year, period, &selection);
    print!("{}", chart.format_terminal(&settings.currency));
    Ok(())
}

/// Handle the goal command
pub fn handle_goal_command<S: KeyValueStore>(
    store: &BudgetStore<S>,
    settings: &Settings,
    args: GoalArgs,
) -> BudgetResult<()> {
    let amount = Amount::parse(&args.amount)
        .map_err(|e| BudgetError::Validation(format!("Invalid goal amount: {}", e)))?;
    let income = store
        .ledger()
        .month(args.period.year(), args.period.month())
        .map(monthly_income_total)
        .unwrap_or_default();

    let plan = SavingsPlan::calculate(&args.name, amount, args.months, income).ok_or_else(|| {
        BudgetError::Validation(
            "A goal needs a name, a positive amount and at least one month".into(),
        )
    })?;

    let currency = &settings.currency;
    println!("Goal: {}", plan.goal);
    println!(
        "Save {} per month for {} month(s) to reach {}",
        currency.format(plan.monthly_savings),
        plan.months,
        currency.format(plan.amount)
    );
    if income.is_positive() {
        println!(
            "That is {:.1}% of a monthly income of {}",
            plan.percentage_of_income,
            currency.format(income)
        );
    } else {
        println!("No income recorded for {} {}", args.period.month(), args.period.year());
    }

    Ok(())
}
