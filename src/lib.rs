//! budget-tracker - Personal monthly budget tracker
//!
//! This library provides the core functionality for tracking a household
//! budget month by month: income sources, budget categories expressed as a
//! percentage of income, and the expense items recorded against them.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (ledger, months, amounts)
//! - `storage`: Key-value persistence and view preferences
//! - `services`: Budget store and aggregation engine
//! - `reports`: Annual report, chart data and the expense sheet
//! - `export`: Spreadsheet workbook interchange
//! - `audit`: Audit logging system
//! - `logging`: Diagnostic logging setup
//! - `cli`: Command handlers for the `budget` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_tracker::services::BudgetStore;
//! use budget_tracker::storage::FileStore;
//!
//! let mut store = BudgetStore::load(FileStore::new("/tmp/budget"));
//! store.initialize_year(2025);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::BudgetError;
