//! Budget aggregation
//!
//! Pure calculations over ledger snapshots: totals per month, per category
//! and per item, the health band of a remaining balance, and the annual
//! roll-ups. Nothing here mutates or persists.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::models::{Amount, MonthRecord, YearRecord, ZERO_TOLERANCE};

/// Difference from 100% still accepted as a balanced allocation
pub const ALLOCATION_TOLERANCE: f64 = 0.01;

/// Sum of all income sources of a month
pub fn monthly_income_total(month: &MonthRecord) -> Amount {
    month.incomes.iter().map(|i| i.value).sum()
}

/// Sum of every expense value of a month, categorized or not
pub fn monthly_spent_total(month: &MonthRecord) -> Amount {
    month.expenses.values().sum()
}

/// The share of the month's income assigned to a category
///
/// Zero when the month does not budget for the category.
pub fn category_budgeted_amount(month: &MonthRecord, category: &str) -> Amount {
    match month.category(category) {
        Some(budget) => monthly_income_total(month).percent(budget.percentage),
        None => Amount::zero(),
    }
}

/// Sum of the values of the items listed under a category
pub fn category_spent(month: &MonthRecord, category: &str) -> Amount {
    month
        .items_of(category)
        .iter()
        .map(|item| month.expense(item))
        .sum()
}

/// Budgeted minus spent; negative when overspent
pub fn category_remaining(month: &MonthRecord, category: &str) -> Amount {
    category_budgeted_amount(month, category) - category_spent(month, category)
}

/// How much of a budget is left, as a coarse label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthBand {
    /// Spent more than available
    Over,
    /// Less than 15% left
    Critical,
    /// Less than 40% left
    Warning,
    /// Less than 75% left
    Ok,
    /// 75% or more left, or nothing was budgeted
    Healthy,
}

impl HealthBand {
    pub const fn label(&self) -> &'static str {
        match self {
            HealthBand::Over => "over",
            HealthBand::Critical => "critical",
            HealthBand::Warning => "warning",
            HealthBand::Ok => "ok",
            HealthBand::Healthy => "healthy",
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classify a remaining balance against the amount it was taken from
///
/// A remainder within half a cent below zero is rounding noise, not an
/// overspend.
pub fn health_band(remaining: Amount, base: Amount) -> HealthBand {
    let remaining = remaining.value();
    let base = base.value();

    if remaining < -ZERO_TOLERANCE {
        return HealthBand::Over;
    }
    if base <= 0.0 {
        return HealthBand::Healthy;
    }

    let ratio = remaining / base;
    if ratio < 0.15 {
        HealthBand::Critical
    } else if ratio < 0.40 {
        HealthBand::Warning
    } else if ratio < 0.75 {
        HealthBand::Ok
    } else {
        HealthBand::Healthy
    }
}

/// Whole-month balance against income
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthStatus {
    pub income: Amount,
    pub spent: Amount,
    pub remaining: Amount,
    pub band: HealthBand,
}

impl MonthStatus {
    pub fn of(month: &MonthRecord) -> Self {
        let income = monthly_income_total(month);
        let spent = monthly_spent_total(month);
        let remaining = income - spent;
        Self {
            income,
            spent,
            remaining,
            band: health_band(remaining, income),
        }
    }
}

/// One category's balance against its budget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatus {
    pub name: String,
    pub budgeted: Amount,
    pub spent: Amount,
    pub remaining: Amount,
    pub band: HealthBand,
}

impl CategoryStatus {
    /// `None` when the month does not budget for the category
    pub fn of(month: &MonthRecord, category: &str) -> Option<Self> {
        if !month.has_category(category) {
            return None;
        }

        let budgeted = category_budgeted_amount(month, category);
        let spent = category_spent(month, category);
        let remaining = budgeted - spent;
        Some(Self {
            name: category.to_string(),
            budgeted,
            spent,
            remaining,
            band: health_band(remaining, budgeted),
        })
    }
}

/// A category's percentage turned into an amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAllocation {
    pub name: String,
    pub percentage: f64,
    pub amount: Amount,
}

/// How a month's income is split across its categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub income: Amount,
    pub categories: Vec<CategoryAllocation>,
    pub total_percentage: f64,
}

impl AllocationSummary {
    pub fn of(month: &MonthRecord) -> Self {
        let income = monthly_income_total(month);
        let categories: Vec<CategoryAllocation> = month
            .budgets
            .iter()
            .map(|b| CategoryAllocation {
                name: b.name.clone(),
                percentage: b.percentage,
                amount: income.percent(b.percentage),
            })
            .collect();
        let total_percentage = month.budgets.iter().map(|b| b.percentage).sum();

        Self {
            income,
            categories,
            total_percentage,
        }
    }

    /// Whether the percentages add up to 100
    pub fn is_balanced(&self) -> bool {
        (self.total_percentage - 100.0).abs() < ALLOCATION_TOLERANCE
    }
}

/// Annual spend per category, in first-seen order of the year's budgets
///
/// Every month contributes its item values for the category, whether or
/// not that particular month budgets for it.
pub fn annual_rollup_by_category(year: &YearRecord) -> Vec<(String, Amount)> {
    year.category_names()
        .into_iter()
        .map(|category| {
            let total = year
                .iter()
                .map(|(_, month)| category_spent(month, &category))
                .sum();
            (category, total)
        })
        .collect()
}

/// Annual spend per item, summing only the months where it is positive
///
/// Items with no positive month are left out. Sorted by item name.
pub fn annual_rollup_by_item(year: &YearRecord) -> Vec<(String, Amount)> {
    let mut totals: BTreeMap<&str, Amount> = BTreeMap::new();
    for (_, month) in year.iter() {
        for (item, value) in &month.expenses {
            if value.is_positive() {
                *totals.entry(item.as_str()).or_default() += *value;
            }
        }
    }

    totals
        .into_iter()
        .map(|(item, total)| (item.to_string(), total))
        .collect()
}

/// Which category each item of the year belongs to
///
/// Months are scanned in calendar order and later months win, so an item
/// moved between categories resolves to where it sits last.
pub fn item_to_category_map(year: &YearRecord) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for (_, month) in year.iter() {
        for (category, items) in &month.items {
            for item in items {
                map.insert(item.clone(), category.clone());
            }
        }
    }
    map
}

/// Sum of all income across the year
pub fn annual_income_total(year: &YearRecord) -> Amount {
    year.iter().map(|(_, m)| monthly_income_total(m)).sum()
}

/// Sum of all expense values across the year
pub fn annual_spent_total(year: &YearRecord) -> Amount {
    year.iter().map(|(_, m)| monthly_spent_total(m)).sum()
}
