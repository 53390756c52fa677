//! Expense sheet
//!
//! The editable expense table: which months are shown, which items become
//! columns, each item's category colour, the current values and the status
//! panel that goes with the selected filter.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::{Amount, CurrencyFormat, Ledger, Month};
use crate::services::aggregation::{item_to_category_map, CategoryStatus, MonthStatus};
use crate::storage::ViewMode;

use super::chart::palette_color;

/// Colour of items whose category is unknown
pub const UNCATEGORIZED_COLOR: &str = "#6c757d";

/// What the sheet should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOptions {
    /// The selected month; the only one shown unless all months are
    pub month: Month,
    pub view_mode: ViewMode,
    /// Category filter, `None` for every category
    pub category: Option<String>,
    /// Show every month (grid view only)
    pub show_all_months: bool,
}

impl SheetOptions {
    pub fn new(month: Month) -> Self {
        Self {
            month,
            view_mode: ViewMode::List,
            category: None,
            show_all_months: false,
        }
    }
}

/// A category of the year with its colour
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChip {
    pub name: String,
    pub color: String,
}

/// One item column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetColumn {
    pub item: String,
    pub category: Option<String>,
    pub color: String,
}

/// The values of one displayed month, one per column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetRow {
    pub month: Month,
    pub values: Vec<Amount>,
}

/// The panel shown above the sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SheetStatus {
    /// Whole month, when no category filter is set
    Month(MonthStatus),
    /// The filtered category, when the month budgets for it
    Category(CategoryStatus),
}

/// View model of the expense table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseSheet {
    pub year: i32,
    pub categories: Vec<CategoryChip>,
    pub columns: Vec<SheetColumn>,
    pub rows: Vec<SheetRow>,
    pub status: Option<SheetStatus>,
}

impl ExpenseSheet {
    /// Build the sheet; `None` when the year is not in the ledger
    pub fn generate(ledger: &Ledger, year: i32, options: &SheetOptions) -> Option<Self> {
        let year_record = ledger.year(year)?;

        let categories: Vec<CategoryChip> = year_record
            .category_names()
            .into_iter()
            .enumerate()
            .map(|(i, name)| CategoryChip {
                name,
                color: palette_color(i).to_string(),
            })
            .collect();
        let color_of = |category: &str| {
            categories
                .iter()
                .find(|c| c.name == category)
                .map(|c| c.color.clone())
                .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string())
        };

        let months: Vec<Month> =
            if options.view_mode == ViewMode::Grid && options.show_all_months {
                Month::ALL.to_vec()
            } else {
                vec![options.month]
            };

        let mut items: BTreeSet<&str> = BTreeSet::new();
        for month in &months {
            let Some(record) = year_record.month(*month) else {
                continue;
            };
            match &options.category {
                None => items.extend(record.items.values().flatten().map(String::as_str)),
                Some(category) => items.extend(record.items_of(category).iter().map(String::as_str)),
            }
        }

        let item_categories = item_to_category_map(year_record);
        let columns: Vec<SheetColumn> = items
            .into_iter()
            .map(|item| {
                let category = item_categories.get(item).cloned();
                let color = category
                    .as_deref()
                    .map(color_of)
                    .unwrap_or_else(|| UNCATEGORIZED_COLOR.to_string());
                SheetColumn {
                    item: item.to_string(),
                    category,
                    color,
                }
            })
            .collect();

        let rows = months
            .iter()
            .map(|month| SheetRow {
                month: *month,
                values: columns
                    .iter()
                    .map(|c| {
                        year_record
                            .month(*month)
                            .map(|r| r.expense(&c.item))
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect();

        let status = year_record
            .month(options.month)
            .and_then(|record| match &options.category {
                None => Some(SheetStatus::Month(MonthStatus::of(record))),
                Some(category) => CategoryStatus::of(record, category).map(SheetStatus::Category),
            });

        Some(Self {
            year,
            categories,
            columns,
            rows,
            status,
        })
    }

    /// Format for terminal display
    ///
    /// One line per item for a single month, a table with one row per
    /// month otherwise.
    pub fn format_terminal(&self, currency: &CurrencyFormat) -> String {
        let mut output = String::new();

        match self.rows.as_slice() {
            [row] => {
                output.push_str(&format!("Expenses of {} {}\n", row.month, self.year));
                output.push_str(&"-".repeat(60));
                output.push('\n');
                for (column, value) in self.columns.iter().zip(&row.values) {
                    output.push_str(&format!(
                        "{:<24} {:<16} {:>16}\n",
                        column.item,
                        column.category.as_deref().unwrap_or(""),
                        currency.format_input(*value)
                    ));
                }
            }
            rows => {
                output.push_str(&format!("{:<10}", ""));
                for column in &self.columns {
                    output.push_str(&format!(" {:>12}", truncate(&column.item, 12)));
                }
                output.push('\n');
                for row in rows {
                    output.push_str(&format!("{:<10}", row.month.name()));
                    for value in &row.values {
                        output.push_str(&format!(" {:>12}", currency.format_input(*value)));
                    }
                    output.push('\n');
                }
            }
        }

        match &self.status {
            Some(SheetStatus::Month(status)) => output.push_str(&format!(
                "\nMonth balance: {} [{}]\n",
                currency.format(status.remaining),
                status.band
            )),
            Some(SheetStatus::Category(status)) => output.push_str(&format!(
                "\nBalance for {}: {} [{}]\n",
                status.name,
                currency.format(status.remaining),
                status.band
            )),
            None => {}
        }

        output
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max - 1).chain(std::iter::once('…')).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetCategory, IncomeSource, YearRecord};
    use crate::services::aggregation::HealthBand;

    fn sample_ledger() -> Ledger {
        let mut year = YearRecord::with_defaults();
        let march = year.month_mut(Month::March).unwrap();
        march.incomes = vec![IncomeSource::new("Salário", 1000.0)];
        march.expenses.insert("Luz".into(), Amount::new(120.0));
        let june = year.month_mut(Month::June).unwrap();
        june.budgets.push(BudgetCategory::new("Viagem", 5.0));
        june.items.insert("Viagem".into(), vec!["Hotel".into()]);
        june.expenses.insert("Hotel".into(), Amount::new(300.0));

        let mut ledger = Ledger::new();
        ledger.insert_year(2025, year);
        ledger
    }

    #[test]
    fn test_list_view_of_one_month() {
        let sheet =
            ExpenseSheet::generate(&sample_ledger(), 2025, &SheetOptions::new(Month::March))
                .unwrap();

        let items: Vec<&str> = sheet.columns.iter().map(|c| c.item.as_str()).collect();
        assert_eq!(items, vec!["Bar", "Cinema", "Emergencia", "Luz", "Telefone", "Água"]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].values[3].value(), 120.0);

        match sheet.status {
            Some(SheetStatus::Month(status)) => {
                assert_eq!(status.remaining.value(), 880.0);
                assert_eq!(status.band, HealthBand::Healthy);
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_categories_get_palette_colors() {
        let sheet =
            ExpenseSheet::generate(&sample_ledger(), 2025, &SheetOptions::new(Month::March))
                .unwrap();

        let names: Vec<&str> = sheet.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Gasto Fixo", "Lazer", "Emergencia", "Viagem"]);
        assert_eq!(sheet.categories[3].color, "#ffc107");

        let luz = sheet.columns.iter().find(|c| c.item == "Luz").unwrap();
        assert_eq!(luz.category.as_deref(), Some("Gasto Fixo"));
        assert_eq!(luz.color, "#007bff");
    }

    #[test]
    fn test_grid_with_all_months_unions_items() {
        let options = SheetOptions {
            month: Month::March,
            view_mode: ViewMode::Grid,
            category: Some("Viagem".to_string()),
            show_all_months: true,
        };
        let sheet = ExpenseSheet::generate(&sample_ledger(), 2025, &options).unwrap();

        assert_eq!(sheet.rows.len(), 12);
        assert_eq!(sheet.columns.len(), 1);
        assert_eq!(sheet.columns[0].item, "Hotel");
        assert_eq!(sheet.rows[5].values[0].value(), 300.0);
        assert_eq!(sheet.rows[0].values[0].value(), 0.0);

        // March does not budget for the filtered category
        assert!(sheet.status.is_none());
    }

    #[test]
    fn test_show_all_months_needs_grid() {
        let options = SheetOptions {
            show_all_months: true,
            ..SheetOptions::new(Month::June)
        };
        let sheet = ExpenseSheet::generate(&sample_ledger(), 2025, &options).unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert!(sheet.columns.iter().any(|c| c.item == "Hotel"));
    }

    #[test]
    fn test_category_status() {
        let options = SheetOptions {
            category: Some("Gasto Fixo".to_string()),
            ..SheetOptions::new(Month::March)
        };
        let sheet = ExpenseSheet::generate(&sample_ledger(), 2025, &options).unwrap();

        assert_eq!(sheet.columns.len(), 3);
        match sheet.status {
            Some(SheetStatus::Category(status)) => {
                assert_eq!(status.budgeted.value(), 600.0);
                assert_eq!(status.remaining.value(), 480.0);
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_absent_year() {
        assert!(
            ExpenseSheet::generate(&sample_ledger(), 1990, &SheetOptions::new(Month::May))
                .is_none()
        );
    }

    #[test]
    fn test_format_terminal() {
        let sheet =
            ExpenseSheet::generate(&sample_ledger(), 2025, &SheetOptions::new(Month::March))
                .unwrap();
        let text = sheet.format_terminal(&CurrencyFormat::default());
        assert!(text.contains("Expenses of Março 2025"));
        assert!(text.contains("120,00"));
        assert!(text.contains("Month balance: R$ 880,00 [healthy]"));
    }
}
