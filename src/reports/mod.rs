//! Reports module for the budget tracker
//!
//! Read-only views computed from a ledger snapshot: the annual report, the
//! expense chart data and the expense sheet.

pub mod annual;
pub mod chart;
pub mod expense_sheet;

pub use annual::{AnnualReport, AnnualView, CategoryBreakdown, MonthBreakdown};
pub use chart::{
    palette_color, ChartData, ChartPeriod, ChartSelection, ChartSlice, BALANCE_COLOR,
    BALANCE_LABEL, CATEGORY_PALETTE,
};
pub use expense_sheet::{
    CategoryChip, ExpenseSheet, SheetColumn, SheetOptions, SheetRow, SheetStatus,
    UNCATEGORIZED_COLOR,
};
