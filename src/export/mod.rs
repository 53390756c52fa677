//! Export module for the budget tracker
//!
//! Spreadsheet interchange: one year of the ledger written as the three
//! workbook tables, and the blank template users fill in for import.

pub mod workbook;

pub use workbook::{
    export_year, read_table, template, write_table, BudgetRow, ExpenseRow, HeaderRow, IncomeRow,
    Workbook, BUDGETS_FILE, EXPENSES_FILE, INCOMES_FILE,
};
