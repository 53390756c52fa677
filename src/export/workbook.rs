//! Spreadsheet workbook
//!
//! The interchange document has three tables (incomes, budget categories,
//! expenses). On disk a workbook is a directory with one CSV file per
//! table, using the same sheet names and column headers as the spreadsheet
//! template, so the files open directly in any spreadsheet program.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Ledger, Month};
use crate::services::aggregation::item_to_category_map;

/// File name of the incomes table
pub const INCOMES_FILE: &str = "Receitas.csv";

/// File name of the budget categories table
pub const BUDGETS_FILE: &str = "Orcamento_Categorias.csv";

/// File name of the expenses table
pub const EXPENSES_FILE: &str = "Despesas_Realizadas.csv";

/// One income source of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeRow {
    #[serde(rename = "ANO", alias = "YEAR", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
    #[serde(rename = "MÊS", alias = "MONTH", default)]
    pub month: Option<String>,
    #[serde(rename = "FONTE_RECEITA", alias = "INCOME_SOURCE", default)]
    pub source: Option<String>,
    #[serde(
        rename = "VALOR_RECEITA",
        alias = "INCOME_VALUE",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub value: Option<f64>,
}

/// One budget category of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRow {
    #[serde(rename = "ANO", alias = "YEAR", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
    #[serde(rename = "MÊS", alias = "MONTH", default)]
    pub month: Option<String>,
    #[serde(rename = "CATEGORIA", alias = "CATEGORY", default)]
    pub category: Option<String>,
    #[serde(
        rename = "PORCENTAGEM_%",
        alias = "PERCENTAGE",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub percentage: Option<f64>,
}

/// One item value of one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRow {
    #[serde(rename = "ANO", alias = "YEAR", default, deserialize_with = "csv::invalid_option")]
    pub year: Option<i32>,
    #[serde(rename = "MÊS", alias = "MONTH", default)]
    pub month: Option<String>,
    #[serde(rename = "CATEGORIA", alias = "CATEGORY", default)]
    pub category: Option<String>,
    #[serde(rename = "ITEM_DESPESA", alias = "EXPENSE_ITEM", default)]
    pub item: Option<String>,
    #[serde(
        rename = "VALOR_GASTO",
        alias = "EXPENSE_VALUE",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub value: Option<f64>,
}

impl IncomeRow {
    pub fn new(year: i32, month: Month, source: &str, value: f64) -> Self {
        Self {
            year: Some(year),
            month: Some(month.name().to_string()),
            source: Some(source.to_string()),
            value: Some(value),
        }
    }
}

impl BudgetRow {
    pub fn new(year: i32, month: Month, category: &str, percentage: f64) -> Self {
        Self {
            year: Some(year),
            month: Some(month.name().to_string()),
            category: Some(category.to_string()),
            percentage: Some(percentage),
        }
    }
}

impl ExpenseRow {
    pub fn new(year: i32, month: Month, category: &str, item: &str, value: f64) -> Self {
        Self {
            year: Some(year),
            month: Some(month.name().to_string()),
            category: Some(category.to_string()),
            item: Some(item.to_string()),
            value: Some(value),
        }
    }
}

/// The three interchange tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub incomes: Vec<IncomeRow>,
    pub budgets: Vec<BudgetRow>,
    pub expenses: Vec<ExpenseRow>,
}

impl Workbook {
    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.budgets.is_empty() && self.expenses.is_empty()
    }

    /// Read a workbook directory
    ///
    /// A missing table file counts as an empty table. A file that is not
    /// valid CSV fails the whole read with [`BudgetError::Import`].
    pub fn read_dir(dir: &Path) -> BudgetResult<Self> {
        if !dir.is_dir() {
            return Err(BudgetError::Import(format!(
                "Workbook directory not found: {}",
                dir.display()
            )));
        }

        Ok(Self {
            incomes: read_table_file(&dir.join(INCOMES_FILE))?,
            budgets: read_table_file(&dir.join(BUDGETS_FILE))?,
            expenses: read_table_file(&dir.join(EXPENSES_FILE))?,
        })
    }

    /// Write the three tables into a directory, creating it if needed
    pub fn write_dir(&self, dir: &Path) -> BudgetResult<()> {
        fs::create_dir_all(dir).map_err(|e| {
            BudgetError::Export(format!("Failed to create {}: {}", dir.display(), e))
        })?;

        write_table_file(&dir.join(INCOMES_FILE), &self.incomes)?;
        write_table_file(&dir.join(BUDGETS_FILE), &self.budgets)?;
        write_table_file(&dir.join(EXPENSES_FILE), &self.expenses)?;
        Ok(())
    }
}

/// Deserialize every row of one table
pub fn read_table<R: Read, T: DeserializeOwned>(reader: R) -> BudgetResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize().enumerate() {
        let row: T = result
            .map_err(|e| BudgetError::Import(format!("Row {}: {}", idx + 2, e)))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Serialize rows of one table with its header line
///
/// The header is written even when there are no rows.
pub fn write_table<W: Write, T: Serialize + HeaderRow>(writer: W, rows: &[T]) -> BudgetResult<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer
        .write_record(T::HEADERS)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }
    writer.flush().map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Column headers of a table
pub trait HeaderRow {
    const HEADERS: &'static [&'static str];
}

impl HeaderRow for IncomeRow {
    const HEADERS: &'static [&'static str] = &["ANO", "MÊS", "FONTE_RECEITA", "VALOR_RECEITA"];
}

impl HeaderRow for BudgetRow {
    const HEADERS: &'static [&'static str] = &["ANO", "MÊS", "CATEGORIA", "PORCENTAGEM_%"];
}

impl HeaderRow for ExpenseRow {
    const HEADERS: &'static [&'static str] =
        &["ANO", "MÊS", "CATEGORIA", "ITEM_DESPESA", "VALOR_GASTO"];
}

fn read_table_file<T: DeserializeOwned>(path: &Path) -> BudgetResult<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)
        .map_err(|e| BudgetError::Import(format!("Failed to open {}: {}", path.display(), e)))?;
    read_table(file).map_err(|e| match e {
        BudgetError::Import(msg) => {
            BudgetError::Import(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

fn write_table_file<T: Serialize + HeaderRow>(path: &Path, rows: &[T]) -> BudgetResult<()> {
    let file = File::create(path)
        .map_err(|e| BudgetError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_table(file, rows)
}

/// Build the workbook of one year
///
/// Expense rows are written for values >= 0, labelled with the item's
/// category across the year and `uncategorized_label` when it has none.
/// Returns `None` when the year is not in the ledger.
pub fn export_year(ledger: &Ledger, year: i32, uncategorized_label: &str) -> Option<Workbook> {
    let year_record = ledger.year(year)?;
    let categories = item_to_category_map(year_record);
    let category_for = |item: &str| {
        categories
            .get(item)
            .map(String::as_str)
            .unwrap_or(uncategorized_label)
    };

    let mut workbook = Workbook::default();
    for (month, record) in year_record.iter() {
        for income in &record.incomes {
            workbook
                .incomes
                .push(IncomeRow::new(year, month, &income.name, income.value.value()));
        }
        for budget in &record.budgets {
            workbook
                .budgets
                .push(BudgetRow::new(year, month, &budget.name, budget.percentage));
        }

        // Listed items first, in list order, then values with no list entry.
        let mut written: Vec<&str> = Vec::new();
        let listed = record.items.values().flatten();
        let unlisted = record.expenses.keys();
        for item in listed.chain(unlisted) {
            if written.contains(&item.as_str()) {
                continue;
            }
            written.push(item.as_str());

            let Some(value) = record.expenses.get(item) else {
                continue;
            };
            if value.value() >= 0.0 {
                workbook.expenses.push(ExpenseRow::new(
                    year,
                    month,
                    category_for(item),
                    item,
                    value.value(),
                ));
            }
        }
    }

    Some(workbook)
}

/// The example workbook handed out as an import template
pub fn template(year: i32) -> Workbook {
    Workbook {
        incomes: vec![IncomeRow::new(year, Month::January, "Meu Salário", 5000.0)],
        budgets: vec![
            BudgetRow::new(year, Month::January, "Gasto Fixo", 60.0),
            BudgetRow::new(year, Month::January, "Lazer", 30.0),
            BudgetRow::new(year, Month::January, "Emergencia", 10.0),
        ],
        expenses: vec![ExpenseRow::new(
            year,
            Month::January,
            "Gasto Fixo",
            "Água",
            100.50,
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, YearRecord};
    use tempfile::TempDir;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let mut year = YearRecord::with_defaults();
        let march = year.month_mut(Month::March).unwrap();
        march.expenses.insert("Luz".into(), Amount::new(80.25));
        march.expenses.insert("Avulso".into(), Amount::new(12.0));
        march.expenses.insert("Estorno".into(), Amount::new(-3.0));
        ledger.insert_year(2025, year);
        ledger
    }

    #[test]
    fn test_export_year_rows() {
        let workbook = export_year(&sample_ledger(), 2025, "Não categorizado").unwrap();

        assert_eq!(workbook.incomes.len(), 12);
        assert_eq!(workbook.budgets.len(), 36);

        let luz = workbook
            .expenses
            .iter()
            .find(|r| r.item.as_deref() == Some("Luz") && r.month.as_deref() == Some("Março"))
            .unwrap();
        assert_eq!(luz.category.as_deref(), Some("Gasto Fixo"));
        assert_eq!(luz.value, Some(80.25));

        let avulso = workbook
            .expenses
            .iter()
            .find(|r| r.item.as_deref() == Some("Avulso"))
            .unwrap();
        assert_eq!(avulso.category.as_deref(), Some("Não categorizado"));

        assert!(!workbook
            .expenses
            .iter()
            .any(|r| r.item.as_deref() == Some("Estorno")));
    }

    #[test]
    fn test_export_absent_year() {
        assert!(export_year(&sample_ledger(), 1990, "x").is_none());
    }

    #[test]
    fn test_write_and_read_dir() {
        let temp_dir = TempDir::new().unwrap();
        let workbook = template(2026);

        workbook.write_dir(temp_dir.path()).unwrap();
        assert!(temp_dir.path().join(INCOMES_FILE).exists());

        let content = fs::read_to_string(temp_dir.path().join(EXPENSES_FILE)).unwrap();
        assert!(content.starts_with("ANO,MÊS,CATEGORIA,ITEM_DESPESA,VALOR_GASTO"));

        let read = Workbook::read_dir(temp_dir.path()).unwrap();
        assert_eq!(read, workbook);
    }

    #[test]
    fn test_read_english_headers_and_bad_cells() {
        let csv = "YEAR,MONTH,INCOME_SOURCE,INCOME_VALUE\n2025,Janeiro,Salário,abc\n,Fevereiro,Bolsa,10\n";
        let rows: Vec<IncomeRow> = read_table(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, Some(2025));
        assert_eq!(rows[0].value, None);
        assert_eq!(rows[1].year, None);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(BUDGETS_FILE),
            "ANO,MÊS,CATEGORIA,PORCENTAGEM_%\n2025,Maio,Casa,40\n",
        )
        .unwrap();

        let workbook = Workbook::read_dir(temp_dir.path()).unwrap();
        assert!(workbook.incomes.is_empty());
        assert_eq!(workbook.budgets, vec![BudgetRow::new(2025, Month::May, "Casa", 40.0)]);
    }

    #[test]
    fn test_malformed_file_is_import_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(INCOMES_FILE),
            "ANO,MÊS,FONTE_RECEITA,VALOR_RECEITA\n2025,Janeiro\n",
        )
        .unwrap();

        let err = Workbook::read_dir(temp_dir.path()).unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn test_missing_directory_is_import_error() {
        let err = Workbook::read_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(err.is_import());
    }
}
