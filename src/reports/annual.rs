//! Annual Report
//!
//! Year totals plus two detail views: month by month with a per-category
//! breakdown, or every item's yearly spend.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::BudgetError;
use crate::models::{Amount, CurrencyFormat, IncomeSource, Ledger, Month};
use crate::services::aggregation::{
    annual_income_total, annual_rollup_by_category, annual_rollup_by_item, annual_spent_total,
    category_budgeted_amount, category_spent, monthly_income_total, monthly_spent_total,
};

/// Which detail the annual report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnualView {
    #[default]
    ByCategory,
    ByItem,
}

impl FromStr for AnnualView {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "by-category" | "category" => Ok(AnnualView::ByCategory),
            "by-item" | "item" => Ok(AnnualView::ByItem),
            other => Err(BudgetError::Validation(format!(
                "Unknown report view: {} (expected by-category or by-item)",
                other
            ))),
        }
    }
}

impl fmt::Display for AnnualView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnualView::ByCategory => write!(f, "by-category"),
            AnnualView::ByItem => write!(f, "by-item"),
        }
    }
}

/// One category within a month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub budgeted: Amount,
    pub spent: Amount,
    pub balance: Amount,
    /// Items with a positive value, by name
    pub items: Vec<(String, Amount)>,
}

/// One month of the by-category view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBreakdown {
    pub month: Month,
    pub incomes: Vec<IncomeSource>,
    pub categories: Vec<CategoryBreakdown>,
    /// Income minus everything spent in the month
    pub balance: Amount,
}

/// Annual report for one year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualReport {
    pub year: i32,
    /// False when the year is not in the ledger
    pub has_data: bool,
    pub income: Amount,
    pub expenses: Amount,
    pub balance: Amount,
    /// Yearly spend per category, largest first
    pub categories: Vec<(String, Amount)>,
    /// Months with income, in calendar order
    pub months: Vec<MonthBreakdown>,
    /// Yearly spend per item, largest first
    pub items: Vec<(String, Amount)>,
}

impl AnnualReport {
    pub fn generate(ledger: &Ledger, year: i32) -> Self {
        let Some(year_record) = ledger.year(year) else {
            return Self {
                year,
                has_data: false,
                income: Amount::zero(),
                expenses: Amount::zero(),
                balance: Amount::zero(),
                categories: Vec::new(),
                months: Vec::new(),
                items: Vec::new(),
            };
        };

        let income = annual_income_total(year_record);
        let expenses = annual_spent_total(year_record);

        let mut categories = annual_rollup_by_category(year_record);
        sort_largest_first(&mut categories);

        let mut items = annual_rollup_by_item(year_record);
        sort_largest_first(&mut items);

        let months = year_record
            .iter()
            .filter_map(|(month, record)| {
                let month_income = monthly_income_total(record);
                if month_income.is_zero() {
                    return None;
                }

                let categories = record
                    .budgets
                    .iter()
                    .map(|budget| {
                        let budgeted = category_budgeted_amount(record, &budget.name);
                        let spent = category_spent(record, &budget.name);

                        let mut names: Vec<&String> = record.items_of(&budget.name).iter().collect();
                        names.sort();
                        let items = names
                            .into_iter()
                            .map(|name| (name.clone(), record.expense(name)))
                            .filter(|(_, value)| value.is_positive())
                            .collect();

                        CategoryBreakdown {
                            name: budget.name.clone(),
                            budgeted,
                            spent,
                            balance: budgeted - spent,
                            items,
                        }
                    })
                    .collect();

                Some(MonthBreakdown {
                    month,
                    incomes: record.incomes.clone(),
                    categories,
                    balance: month_income - monthly_spent_total(record),
                })
            })
            .collect();

        Self {
            year,
            has_data: true,
            income,
            expenses,
            balance: income - expenses,
            categories,
            months,
            items,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, view: AnnualView, currency: &CurrencyFormat) -> String {
        let mut output = String::new();

        output.push_str(&format!("Annual Report {}\n", self.year));
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if !self.has_data {
            output.push_str("No data for this year.\n");
            return output;
        }

        output.push_str(&format!("{:<30} {:>20}\n", "Total income:", currency.format(self.income)));
        output.push_str(&format!(
            "{:<30} {:>20}\n",
            "Total expenses:",
            currency.format(self.expenses)
        ));
        output.push_str(&format!("{:<30} {:>20}\n", "Balance:", currency.format(self.balance)));

        output.push_str("\nExpenses by category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for (name, total) in &self.categories {
            output.push_str(&format!("  {:<28} {:>20}\n", name, currency.format(*total)));
        }

        match view {
            AnnualView::ByCategory => {
                for month in &self.months {
                    output.push_str(&format!(
                        "\n{:<30} {:>20}\n",
                        month.month.name().to_uppercase(),
                        currency.format(month.balance)
                    ));
                    for income in &month.incomes {
                        output.push_str(&format!(
                            "  + {:<26} {:>20}\n",
                            income.name,
                            currency.format(income.value)
                        ));
                    }
                    for category in &month.categories {
                        output.push_str(&format!(
                            "  {:<28} {:>20}\n",
                            category.name,
                            format!("balance {}", currency.format(category.balance))
                        ));
                        for (item, value) in &category.items {
                            output.push_str(&format!(
                                "    {:<26} {:>20}\n",
                                item,
                                currency.format(*value)
                            ));
                        }
                    }
                }
            }
            AnnualView::ByItem => {
                output.push_str("\nExpenses by item\n");
                output.push_str(&"-".repeat(60));
                output.push('\n');
                for (item, total) in &self.items {
                    output.push_str(&format!("  {:<28} {:>20}\n", item, currency.format(*total)));
                }
            }
        }

        output
    }
}

fn sort_largest_first(rows: &mut [(String, Amount)]) {
    rows.sort_by(|a, b| b.1.value().total_cmp(&a.1.value()));
}
