//! Core data models for the budget tracker
//!
//! This module contains the data structures of the budgeting domain: the
//! ledger of years and months, income sources, budget categories, and the
//! amount/currency types used to display them.

pub mod ledger;
pub mod money;
pub mod month;

pub use ledger::{BudgetCategory, IncomeSource, Ledger, MonthRecord, YearRecord};
pub use money::{Amount, AmountParseError, CurrencyFormat, ZERO_TOLERANCE};
pub use month::{current_year, Month};
