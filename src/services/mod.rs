//! Service layer for the budget tracker
//!
//! The budget store applies mutations to the ledger and persists them; the
//! aggregation functions derive totals and balances from snapshots.

pub mod aggregation;
pub mod budget_store;
pub mod expense_entry;
pub mod goal;
pub mod import;

pub use aggregation::{AllocationSummary, CategoryAllocation, CategoryStatus, HealthBand, MonthStatus};
pub use budget_store::BudgetStore;
pub use expense_entry::ExpenseEntry;
pub use goal::SavingsPlan;
pub use import::{import_workbook, ImportSummary};
