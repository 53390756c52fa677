//! Chart data
//!
//! Builds the labelled, coloured series behind the expense chart. Drawing
//! is left to whatever renders it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::models::{Amount, CurrencyFormat, Ledger, Month, MonthRecord};
use crate::services::aggregation::{category_spent, monthly_income_total};

/// Colours handed out to categories and chart slices, in order, cycling
pub const CATEGORY_PALETTE: [&str; 9] = [
    "#007bff", "#28a745", "#dc3545", "#ffc107", "#17a2b8", "#6f42c1", "#fd7e14", "#20c997",
    "#6c757d",
];

/// Colour of the remaining balance slice
pub const BALANCE_COLOR: &str = "rgba(108, 117, 125, 0.7)";

/// Label of the remaining balance slice
pub const BALANCE_LABEL: &str = "Saldo Disponível";

/// Balance below which no balance slice is shown
const BALANCE_THRESHOLD: f64 = 0.01;

/// The palette colour at a position
pub fn palette_color(index: usize) -> &'static str {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// The months a chart covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    Month(Month),
    WholeYear,
}

impl ChartPeriod {
    fn months(&self) -> Vec<Month> {
        match self {
            ChartPeriod::Month(month) => vec![*month],
            ChartPeriod::WholeYear => Month::ALL.to_vec(),
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartPeriod::Month(month) => write!(f, "{}", month),
            ChartPeriod::WholeYear => write!(f, "Ano Inteiro"),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    /// A month name or number, or `year` / `Ano Inteiro` for the whole year
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "year" || lower == "ano inteiro" || lower == "all" {
            return Ok(ChartPeriod::WholeYear);
        }
        s.parse::<Month>().map(ChartPeriod::Month)
    }
}

/// What the chart breaks spending down by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSelection {
    /// One slice per category
    AllCategories,
    /// One slice per item, across categories
    AllItems,
    /// One slice per item of a single category
    Category(String),
}

impl ChartSelection {
    fn shows_balance(&self) -> bool {
        !matches!(self, ChartSelection::Category(_))
    }
}

/// One labelled value of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: Amount,
    pub color: String,
}

/// Everything needed to draw the expense chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub slices: Vec<ChartSlice>,
    /// Why there is nothing to draw, when `slices` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChartData {
    fn empty(title: String, message: &str) -> Self {
        Self {
            title,
            slices: Vec::new(),
            message: Some(message.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Build the chart of a year for a period and selection
    pub fn generate(
        ledger: &Ledger,
        year: i32,
        period: ChartPeriod,
        selection: &ChartSelection,
    ) -> Self {
        let title = match selection {
            ChartSelection::AllCategories => format!("Total por Categoria - {} de {}", period, year),
            ChartSelection::AllItems => {
                format!("Todas as Despesas (Detalhado) - {} de {}", period, year)
            }
            ChartSelection::Category(name) => {
                format!("Detalhamento de Despesas: {} - {} de {}", name, period, year)
            }
        };

        let Some(year_record) = ledger.year(year) else {
            return Self::empty(title, "Nenhum dado para este período.");
        };
        if let ChartPeriod::Month(month) = period {
            if year_record.month(month).is_none() {
                return Self::empty(title, "Nenhum dado para este período.");
            }
        }

        let months: Vec<&MonthRecord> = period
            .months()
            .into_iter()
            .filter_map(|m| year_record.month(m))
            .collect();

        let mut totals = Totals::default();
        match selection {
            ChartSelection::AllCategories => {
                for record in &months {
                    for budget in &record.budgets {
                        totals.register(&budget.name);
                    }
                }
                let names: Vec<String> = totals.names();
                for record in &months {
                    for name in &names {
                        totals.add(name, category_spent(record, name));
                    }
                }
            }
            ChartSelection::AllItems => {
                for record in &months {
                    for (item, value) in &record.expenses {
                        if value.is_positive() {
                            totals.add(item, *value);
                        }
                    }
                }
            }
            ChartSelection::Category(category) => {
                for record in &months {
                    for item in record.items_of(category) {
                        let value = record.expense(item);
                        if value.is_positive() {
                            totals.add(item, value);
                        }
                    }
                }
            }
        }

        let mut slices: Vec<ChartSlice> = totals
            .into_positive()
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| ChartSlice {
                label,
                value,
                color: palette_color(i).to_string(),
            })
            .collect();

        if slices.is_empty() {
            return Self::empty(title, "Nenhuma despesa para exibir.");
        }

        if selection.shows_balance() {
            let income: Amount = months.iter().map(|m| monthly_income_total(m)).sum();
            let charted: Amount = slices.iter().map(|s| s.value).sum();
            let balance = income - charted;
            if balance.value() > BALANCE_THRESHOLD {
                slices.push(ChartSlice {
                    label: BALANCE_LABEL.to_string(),
                    value: balance,
                    color: BALANCE_COLOR.to_string(),
                });
            }
        }

        Self {
            title,
            slices,
            message: None,
        }
    }

    /// Format as a legend with proportional bars
    pub fn format_terminal(&self, currency: &CurrencyFormat) -> String {
        let mut output = format!("{}\n", self.title);
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if let Some(message) = &self.message {
            output.push_str(message);
            output.push('\n');
            return output;
        }

        let total: f64 = self.slices.iter().map(|s| s.value.value()).sum();
        for slice in &self.slices {
            let share = if total > 0.0 {
                slice.value.value() / total
            } else {
                0.0
            };
            let bar = "#".repeat((share * 30.0).round() as usize);
            output.push_str(&format!(
                "{:<24} {:>16} {:>5.1}% {}\n",
                slice.label,
                currency.format(slice.value),
                share * 100.0,
                bar
            ));
        }
        output
    }
}

/// Totals per label in first-seen order
#[derive(Default)]
struct Totals {
    entries: Vec<(String, Amount)>,
}

impl Totals {
    fn register(&mut self, label: &str) {
        if !self.entries.iter().any(|(l, _)| l == label) {
            self.entries.push((label.to_string(), Amount::zero()));
        }
    }

    fn add(&mut self, label: &str, value: Amount) {
        self.register(label);
        if let Some((_, total)) = self.entries.iter_mut().find(|(l, _)| l == label) {
            *total += value;
        }
    }

    fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    fn into_positive(self) -> Vec<(String, Amount)> {
        self.entries
            .into_iter()
            .filter(|(_, total)| total.is_positive())
            .collect()
    }
}
