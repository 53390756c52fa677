//! Ledger data model
//!
//! The ledger is the whole persisted dataset: years, each with twelve
//! months, each month holding its income sources, budget categories, the
//! item catalog per category and the accumulated expense value per item.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::money::Amount;
use super::month::Month;

/// Default income source of a freshly initialized year
pub const DEFAULT_INCOME_NAME: &str = "Meu Salário";

/// Default budget categories with their percentage of income
pub const DEFAULT_BUDGETS: [(&str, f64); 3] =
    [("Gasto Fixo", 60.0), ("Lazer", 30.0), ("Emergencia", 10.0)];

/// Default item catalog per category
pub const DEFAULT_ITEMS: [(&str, &[&str]); 3] = [
    ("Gasto Fixo", &["Água", "Luz", "Telefone"]),
    ("Lazer", &["Cinema", "Bar"]),
    ("Emergencia", &["Emergencia"]),
];

/// A named source of monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub name: String,
    #[serde(default)]
    pub value: Amount,
}

impl IncomeSource {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Amount::new(value),
        }
    }
}

/// A budget category: a share of the month's income
///
/// Percentages across a month are not required to add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub name: String,
    #[serde(default)]
    pub percentage: f64,
}

impl BudgetCategory {
    /// A non-finite percentage becomes 0
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage: if percentage.is_finite() { percentage } else { 0.0 },
        }
    }
}

/// One month of budget data
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthRecord {
    /// Income sources in display order
    #[serde(default)]
    pub incomes: Vec<IncomeSource>,

    /// Budget categories in display order
    #[serde(default)]
    pub budgets: Vec<BudgetCategory>,

    /// Item names per category name
    #[serde(default)]
    pub items: BTreeMap<String, Vec<String>>,

    /// Accumulated value per item name
    #[serde(default)]
    pub expenses: BTreeMap<String, Amount>,
}

impl MonthRecord {
    /// A month with no incomes, categories or items
    pub fn empty() -> Self {
        Self::default()
    }

    /// The month every new year starts from
    pub fn default_template() -> Self {
        let incomes = vec![IncomeSource::new(DEFAULT_INCOME_NAME, 0.0)];
        let budgets = DEFAULT_BUDGETS
            .iter()
            .map(|(name, pct)| BudgetCategory::new(*name, *pct))
            .collect();

        let mut items = BTreeMap::new();
        let mut expenses = BTreeMap::new();
        for (category, names) in DEFAULT_ITEMS {
            items.insert(
                category.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
            );
            for name in names {
                expenses.insert(name.to_string(), Amount::zero());
            }
        }

        Self {
            incomes,
            budgets,
            items,
            expenses,
        }
    }

    /// Find a budget category by name
    pub fn category(&self, name: &str) -> Option<&BudgetCategory> {
        self.budgets.iter().find(|b| b.name == name)
    }

    /// Whether the month budgets for the named category
    pub fn has_category(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Items listed under a category (empty when the category has none)
    pub fn items_of(&self, category: &str) -> &[String] {
        self.items.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The category whose list contains the item, if any
    pub fn category_of(&self, item: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(_, names)| names.iter().any(|n| n == item))
            .map(|(category, _)| category.as_str())
    }

    /// Expense value of an item (zero when it has no entry)
    pub fn expense(&self, item: &str) -> Amount {
        self.expenses.get(item).copied().unwrap_or_default()
    }
}

/// Twelve months of one year
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct YearRecord {
    #[serde(default)]
    pub months: BTreeMap<Month, MonthRecord>,
}

impl YearRecord {
    /// A year where every month is the default template
    pub fn with_defaults() -> Self {
        Self::filled_with(MonthRecord::default_template())
    }

    /// A year with twelve empty months
    pub fn empty() -> Self {
        Self::filled_with(MonthRecord::empty())
    }

    fn filled_with(template: MonthRecord) -> Self {
        let months = Month::ALL
            .iter()
            .map(|m| (*m, template.clone()))
            .collect();
        Self { months }
    }

    pub fn month(&self, month: Month) -> Option<&MonthRecord> {
        self.months.get(&month)
    }

    pub fn month_mut(&mut self, month: Month) -> Option<&mut MonthRecord> {
        self.months.get_mut(&month)
    }

    /// Months in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Month, &MonthRecord)> {
        self.months.iter().map(|(m, r)| (*m, r))
    }

    /// Add an empty record for every month that is missing
    ///
    /// Returns how many months were added.
    pub fn fill_missing_months(&mut self) -> usize {
        let mut added = 0;
        for month in Month::ALL {
            if !self.months.contains_key(&month) {
                self.months.insert(month, MonthRecord::empty());
                added += 1;
            }
        }
        added
    }

    /// Category names across all months, first-seen order
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (_, record) in self.iter() {
            for budget in &record.budgets {
                if !names.contains(&budget.name) {
                    names.push(budget.name.clone());
                }
            }
        }
        names
    }
}

/// The complete dataset, keyed by year
///
/// Serialized as a JSON object whose keys are the years as strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    years: BTreeMap<i32, YearRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Years present, ascending
    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }

    pub fn year(&self, year: i32) -> Option<&YearRecord> {
        self.years.get(&year)
    }

    pub fn year_mut(&mut self, year: i32) -> Option<&mut YearRecord> {
        self.years.get_mut(&year)
    }

    pub fn month(&self, year: i32, month: Month) -> Option<&MonthRecord> {
        self.year(year).and_then(|y| y.month(month))
    }

    pub fn month_mut(&mut self, year: i32, month: Month) -> Option<&mut MonthRecord> {
        self.year_mut(year).and_then(|y| y.month_mut(month))
    }

    /// Insert or replace a year record
    pub fn insert_year(&mut self, year: i32, record: YearRecord) {
        self.years.insert(year, record);
    }

    /// Get a year, creating it with twelve empty months if absent
    pub fn year_or_empty(&mut self, year: i32) -> &mut YearRecord {
        self.years.entry(year).or_insert_with(YearRecord::empty)
    }

    pub fn clear(&mut self) {
        self.years.clear();
    }

    /// Pad every year to twelve months; returns how many months were added
    pub fn fill_missing_months(&mut self) -> usize {
        self.years
            .values_mut()
            .map(YearRecord::fill_missing_months)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let month = MonthRecord::default_template();

        assert_eq!(month.incomes, vec![IncomeSource::new("Meu Salário", 0.0)]);
        assert_eq!(month.budgets.len(), 3);
        assert_eq!(month.category("Gasto Fixo").unwrap().percentage, 60.0);
        assert_eq!(month.category("Lazer").unwrap().percentage, 30.0);
        assert_eq!(month.category("Emergencia").unwrap().percentage, 10.0);
        assert_eq!(month.items_of("Gasto Fixo"), ["Água", "Luz", "Telefone"]);
        assert_eq!(month.items_of("Lazer"), ["Cinema", "Bar"]);
        assert_eq!(month.expenses.len(), 6);
        assert!(month.expenses.values().all(|v| v.value() == 0.0));
    }

    #[test]
    fn test_year_has_twelve_months() {
        assert_eq!(YearRecord::with_defaults().months.len(), 12);
        assert_eq!(YearRecord::empty().months.len(), 12);
    }

    #[test]
    fn test_category_of() {
        let month = MonthRecord::default_template();
        assert_eq!(month.category_of("Cinema"), Some("Lazer"));
        assert_eq!(month.category_of("Aluguel"), None);
    }

    #[test]
    fn test_fill_missing_months() {
        let mut year = YearRecord::default();
        year.months.insert(Month::March, MonthRecord::default_template());

        assert_eq!(year.fill_missing_months(), 11);
        assert_eq!(year.months.len(), 12);
        assert_eq!(
            year.month(Month::March),
            Some(&MonthRecord::default_template())
        );
        assert_eq!(year.month(Month::April), Some(&MonthRecord::empty()));
    }

    #[test]
    fn test_category_names_first_seen_order() {
        let mut year = YearRecord::empty();
        year.month_mut(Month::January).unwrap().budgets =
            vec![BudgetCategory::new("Casa", 50.0)];
        year.month_mut(Month::February).unwrap().budgets = vec![
            BudgetCategory::new("Lazer", 20.0),
            BudgetCategory::new("Casa", 50.0),
        ];

        assert_eq!(year.category_names(), vec!["Casa", "Lazer"]);
    }

    #[test]
    fn test_json_shape() {
        let mut ledger = Ledger::new();
        ledger.insert_year(2025, YearRecord::with_defaults());

        let value = serde_json::to_value(&ledger).unwrap();
        let march = &value["2025"]["months"]["Março"];
        assert_eq!(march["incomes"][0]["name"], "Meu Salário");
        assert_eq!(march["budgets"][1]["percentage"], 30.0);
        assert_eq!(march["items"]["Lazer"][1], "Bar");
        assert_eq!(march["expenses"]["Luz"], 0.0);

        let json = serde_json::to_string(&ledger).unwrap();
        let parsed: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ledger);
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let json = r#"{"2024": {"months": {"Janeiro": {"incomes": [{"name": "Bolsa"}]}}}}"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();

        let january = ledger.month(2024, Month::January).unwrap();
        assert_eq!(january.incomes[0].value.value(), 0.0);
        assert!(january.budgets.is_empty());
        assert!(ledger.month(2024, Month::February).is_none());
    }
}
