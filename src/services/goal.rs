//! Savings goal calculator

use serde::Serialize;

use crate::models::Amount;

/// How much has to be put aside each month to reach a goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub goal: String,
    pub amount: Amount,
    pub months: u32,
    pub monthly_savings: Amount,
    /// Share of the monthly income, 0 when there is no income
    pub percentage_of_income: f64,
}

impl SavingsPlan {
    /// Plan a goal against a monthly income
    ///
    /// Returns `None` for an empty name, a non-positive amount or a zero
    /// deadline.
    pub fn calculate(goal: &str, amount: Amount, months: u32, monthly_income: Amount) -> Option<Self> {
        let goal = goal.trim();
        if goal.is_empty() || amount.value() <= 0.0 || months == 0 {
            return None;
        }

        let monthly_savings = Amount::new(amount.value() / f64::from(months));
        let percentage_of_income = if monthly_income.value() > 0.0 {
            monthly_savings.value() / monthly_income.value() * 100.0
        } else {
            0.0
        };

        Some(Self {
            goal: goal.to_string(),
            amount,
            months,
            monthly_savings,
            percentage_of_income,
        })
    }
}
