//! Budget store
//!
//! `BudgetStore` owns the ledger and the backend it is persisted to. Every
//! mutation is applied in memory, written back in one persist step and,
//! when an audit logger is attached, recorded in the audit log.
//!
//! Operations addressing a year or month that does not exist are silent
//! no-ops. Persistence failures inside a mutation are logged and do not
//! undo the in-memory change.

use serde_json::json;
use tracing::{debug, error, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    current_year, Amount, BudgetCategory, IncomeSource, Ledger, Month, YearRecord,
};
use crate::storage::{KeyValueStore, LEDGER_KEY, PREFERRED_CATEGORY_KEY, VIEW_MODE_KEY};

use super::expense_entry::ExpenseEntry;

/// Owner of the ledger and its persistence backend
pub struct BudgetStore<S: KeyValueStore> {
    backend: S,
    ledger: Ledger,
    audit: Option<AuditLogger>,
}

impl<S: KeyValueStore> BudgetStore<S> {
    /// Load the ledger from the backend
    ///
    /// Missing or unreadable state starts an empty ledger. Every year is
    /// padded to twelve months, and an empty ledger gets the current
    /// calendar year initialized.
    pub fn load(backend: S) -> Self {
        let ledger = match backend.get(LEDGER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Ledger>(&raw) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!("Stored ledger is corrupt, starting empty: {}", e);
                    Ledger::new()
                }
            },
            Ok(None) => {
                debug!("No stored ledger, starting empty");
                Ledger::new()
            }
            Err(e) => {
                warn!("Failed to read stored ledger, starting empty: {}", e);
                Ledger::new()
            }
        };

        let mut store = Self {
            backend,
            ledger,
            audit: None,
        };

        let added = store.ledger.fill_missing_months();
        if added > 0 {
            warn!("Stored ledger was missing {} month(s); filled with empty months", added);
            store.persist();
        }

        if store.ledger.is_empty() {
            store.initialize_year(current_year());
        }

        store
    }

    /// Record every subsequent mutation in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// An independent deep copy of the ledger
    pub fn snapshot(&self) -> Ledger {
        self.ledger.clone()
    }

    /// Borrow the current ledger
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    // === Year Operations ===

    /// Create a year with twelve default months
    ///
    /// Returns whether the year was created; an existing year is untouched.
    pub fn initialize_year(&mut self, year: i32) -> bool {
        if self.ledger.contains_year(year) {
            return false;
        }

        let record = YearRecord::with_defaults();
        self.audit(AuditEntry::create(EntityType::Year, year.to_string(), &record));
        self.ledger.insert_year(year, record);
        self.persist();
        debug!(year, "Initialized year");
        true
    }

    /// Replace the whole ledger, e.g. with the result of an import
    pub fn replace_ledger(&mut self, mut ledger: Ledger) {
        ledger.fill_missing_months();

        let summary = format!(
            "{} year(s) replaced by {} year(s)",
            self.ledger.years().len(),
            ledger.years().len()
        );
        self.audit(
            AuditEntry::update(EntityType::Ledger, "*", &self.ledger.years(), &ledger.years(), None)
                .with_summary(summary),
        );

        self.ledger = ledger;
        self.persist();
    }

    /// Clear the ledger and every persisted key
    ///
    /// Returns `false` if any key could not be removed from the backend.
    pub fn reset_all(&mut self) -> bool {
        self.audit(AuditEntry::delete(EntityType::Ledger, "*", &self.ledger.years()));
        self.ledger.clear();

        let mut ok = true;
        for key in [LEDGER_KEY, PREFERRED_CATEGORY_KEY, VIEW_MODE_KEY] {
            if let Err(e) = self.backend.remove(key) {
                error!("Failed to remove {}: {}", key, e);
                ok = false;
            }
        }
        ok
    }

    // === Month Operations ===

    /// Set a month's incomes and budget categories
    ///
    /// With `apply_to_all`, the same incomes and categories are copied into
    /// every other month of the year. Item catalogs and expense values are
    /// never touched.
    pub fn set_budget_state(
        &mut self,
        year: i32,
        source_month: Month,
        incomes: &[IncomeSource],
        budgets: &[BudgetCategory],
        apply_to_all: bool,
    ) {
        let Some(year_record) = self.ledger.year_mut(year) else {
            return;
        };
        let Some(source) = year_record.month_mut(source_month) else {
            return;
        };

        let before = json!({ "incomes": &source.incomes, "budgets": &source.budgets });
        source.incomes = incomes.to_vec();
        source.budgets = budgets.to_vec();

        if apply_to_all {
            for (month, record) in year_record.months.iter_mut() {
                if *month != source_month {
                    record.incomes = incomes.to_vec();
                    record.budgets = budgets.to_vec();
                }
            }
        }

        let after = json!({ "incomes": incomes, "budgets": budgets });
        let scope = if apply_to_all { "all months" } else { "one month" };
        self.audit(AuditEntry::update(
            EntityType::MonthBudget,
            format!("{}/{}", year, source_month),
            &before,
            &after,
            Some(format!("applied to {}", scope)),
        ));
        self.persist();
    }

    // === Expense Operations ===

    /// Set the accumulated value of an item in one month
    ///
    /// A value that is not finite is stored as zero.
    pub fn set_expense_value(&mut self, year: i32, month: Month, item: &str, value: Amount) {
        let value = Amount::new(value.value());
        let Some(record) = self.ledger.month_mut(year, month) else {
            return;
        };

        let before = record.expenses.insert(item.to_string(), value);
        let entity_id = format!("{}/{}/{}", year, month, item);
        let entry = match before {
            Some(old) => AuditEntry::update(
                EntityType::ExpenseValue,
                entity_id,
                &old,
                &value,
                Some(format!("{} -> {}", old.value(), value.value())),
            ),
            None => AuditEntry::create(EntityType::ExpenseValue, entity_id, &value),
        };
        self.audit(entry);
        self.persist();
    }

    /// Apply accumulating input (`50`, `- 20`) to an item's value
    ///
    /// Returns the resulting value, or `None` when the month does not exist
    /// or the input is blank. Unparsable input leaves the value unchanged.
    pub fn record_expense_entry(
        &mut self,
        year: i32,
        month: Month,
        item: &str,
        input: &str,
    ) -> Option<Amount> {
        let current = self.ledger.month(year, month)?.expense(item);

        let entry = ExpenseEntry::parse(input);
        if entry.is_blank() {
            return None;
        }

        let value = entry.apply(current);
        self.set_expense_value(year, month, item, value);
        Some(value)
    }

    // === Item Operations ===

    /// Add an item to a category, in every month or in the current month only
    pub fn add_expense_item(&mut self, year: i32, category: &str, item: &str, for_all_year: bool) {
        self.add_expense_item_at(year, category, item, for_all_year, Month::current());
    }

    /// Like [`add_expense_item`](Self::add_expense_item), with the month used
    /// when `for_all_year` is false given explicitly
    ///
    /// Months whose budgets lack the category are skipped. The item is only
    /// appended when absent and an existing expense value is kept.
    pub fn add_expense_item_at(
        &mut self,
        year: i32,
        category: &str,
        item: &str,
        for_all_year: bool,
        current_month: Month,
    ) {
        let item = item.trim();
        if item.is_empty() {
            return;
        }
        let Some(year_record) = self.ledger.year_mut(year) else {
            return;
        };

        let targets: Vec<Month> = if for_all_year {
            Month::ALL.to_vec()
        } else {
            vec![current_month]
        };

        let mut touched = 0;
        for month in targets {
            let Some(record) = year_record.month_mut(month) else {
                continue;
            };
            if !record.has_category(category) {
                continue;
            }

            let list = record.items.entry(category.to_string()).or_default();
            if !list.iter().any(|n| n == item) {
                list.push(item.to_string());
            }
            record.expenses.entry(item.to_string()).or_default();
            touched += 1;
        }

        if touched > 0 {
            self.audit(
                AuditEntry::create(
                    EntityType::ExpenseItem,
                    format!("{}/{}/{}", year, category, item),
                    &item,
                )
                .with_summary(format!("added to {} month(s)", touched)),
            );
        }
        self.persist();
    }

    /// Remove an item from every category and month of a year
    ///
    /// The name is trimmed like in [`add_expense_item`](Self::add_expense_item).
    pub fn remove_expense_item(&mut self, year: i32, item: &str) {
        let item = item.trim();
        let Some(year_record) = self.ledger.year_mut(year) else {
            return;
        };

        let mut removed = false;
        for record in year_record.months.values_mut() {
            for list in record.items.values_mut() {
                let len = list.len();
                list.retain(|n| n != item);
                removed |= list.len() != len;
            }
            removed |= record.expenses.remove(item).is_some();
        }

        if removed {
            self.audit(AuditEntry::delete(
                EntityType::ExpenseItem,
                format!("{}/{}", year, item),
                &item,
            ));
        }
        self.persist();
    }

    /// Rename an item in every month of a year
    ///
    /// Both names are trimmed. Nothing happens (and nothing is audited)
    /// when the old name is not in the year.
    ///
    /// The item keeps its position in its category list. If `new_name`
    /// already has a value in a month, it is overwritten by the old item's
    /// value.
    pub fn rename_expense_item(&mut self, year: i32, old_name: &str, new_name: &str) {
        let (old_name, new_name) = (old_name.trim(), new_name.trim());
        if new_name.is_empty() || old_name == new_name {
            return;
        }
        let Some(year_record) = self.ledger.year_mut(year) else {
            return;
        };

        let mut renamed = false;
        for record in year_record.months.values_mut() {
            for list in record.items.values_mut() {
                for name in list.iter_mut().filter(|n| n.as_str() == old_name) {
                    *name = new_name.to_string();
                    renamed = true;
                }
            }
            if let Some(value) = record.expenses.remove(old_name) {
                record.expenses.insert(new_name.to_string(), value);
                renamed = true;
            }
        }
        if !renamed {
            return;
        }

        self.audit(AuditEntry::update(
            EntityType::ExpenseItem,
            format!("{}/{}", year, old_name),
            &old_name,
            &new_name,
            Some(format!("renamed {} -> {}", old_name, new_name)),
        ));
        self.persist();
    }

    /// Rename an item, refusing to merge it into an existing one
    pub fn try_rename_expense_item(
        &mut self,
        year: i32,
        old_name: &str,
        new_name: &str,
    ) -> BudgetResult<()> {
        let (old_name, new_name) = (old_name.trim(), new_name.trim());
        if new_name.is_empty() {
            return Err(BudgetError::Validation("Item name cannot be empty".into()));
        }

        let year_record = self
            .ledger
            .year(year)
            .ok_or_else(|| BudgetError::year_not_found(year))?;

        let known = |name: &str| {
            year_record
                .iter()
                .any(|(_, m)| m.category_of(name).is_some() || m.expenses.contains_key(name))
        };

        if !known(old_name) {
            return Err(BudgetError::item_not_found(old_name));
        }
        if old_name != new_name && known(new_name) {
            return Err(BudgetError::duplicate_item(new_name));
        }

        self.rename_expense_item(year, old_name, new_name);
        Ok(())
    }

    // === Internals ===

    /// Write the ledger under its storage key; returns whether it succeeded
    fn persist(&mut self) -> bool {
        let raw = match serde_json::to_string(&self.ledger) {
            Ok(raw) => raw,
            Err(e) => {
                error!("Failed to serialize ledger: {}", e);
                return false;
            }
        };

        match self.backend.set(LEDGER_KEY, &raw) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to persist ledger: {}", e);
                false
            }
        }
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!("Failed to write audit entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    const YEAR: i32 = 2000;

    fn store_with_year() -> BudgetStore<MemoryStore> {
        let mut store = BudgetStore::load(MemoryStore::new());
        store.initialize_year(YEAR);
        store
    }

    fn persisted(store: &BudgetStore<MemoryStore>) -> Ledger {
        let raw = store.backend().get(LEDGER_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    /// Backend whose writes always fail
    #[derive(Default)]
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> BudgetResult<Option<String>> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> BudgetResult<()> {
            Err(BudgetError::Storage("disk full".into()))
        }
        fn remove(&mut self, _key: &str) -> BudgetResult<()> {
            Err(BudgetError::Storage("disk full".into()))
        }
    }

    #[test]
    fn test_load_empty_initializes_current_year() {
        let store = BudgetStore::load(MemoryStore::new());
        let ledger = store.snapshot();

        assert_eq!(ledger.years(), vec![current_year()]);
        assert_eq!(ledger.year(current_year()).unwrap().months.len(), 12);
        assert!(store.backend().contains(LEDGER_KEY));
    }

    #[test]
    fn test_load_corrupt_state_starts_fresh() {
        let mut backend = MemoryStore::new();
        backend.set(LEDGER_KEY, "{not json").unwrap();

        let store = BudgetStore::load(backend);
        assert_eq!(store.ledger().years(), vec![current_year()]);
    }

    #[test]
    fn test_load_pads_partial_years() {
        let mut backend = MemoryStore::new();
        backend
            .set(LEDGER_KEY, r#"{"2024": {"months": {"Janeiro": {}}}}"#)
            .unwrap();

        let store = BudgetStore::load(backend);
        assert_eq!(store.ledger().years(), vec![2024]);
        assert_eq!(store.ledger().year(2024).unwrap().months.len(), 12);
    }

    #[test]
    fn test_initialize_year_is_idempotent() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::March, "Luz", Amount::new(80.0));
        let before = store.snapshot();

        assert!(!store.initialize_year(YEAR));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut store = store_with_year();
        let snapshot = store.snapshot();

        store.set_expense_value(YEAR, Month::January, "Luz", Amount::new(10.0));

        assert_eq!(snapshot.month(YEAR, Month::January).unwrap().expense("Luz").value(), 0.0);
    }

    #[test]
    fn test_set_budget_state_apply_to_all() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::July, "Bar", Amount::new(33.0));

        let incomes = vec![IncomeSource::new("Salário", 3000.0)];
        let budgets = vec![
            BudgetCategory::new("Casa", 70.0),
            BudgetCategory::new("Lazer", 30.0),
        ];
        store.set_budget_state(YEAR, Month::March, &incomes, &budgets, true);

        let ledger = store.snapshot();
        for (_, month) in ledger.year(YEAR).unwrap().iter() {
            assert_eq!(month.incomes, incomes);
            assert_eq!(month.budgets, budgets);
            assert_eq!(month.items_of("Gasto Fixo"), ["Água", "Luz", "Telefone"]);
        }
        assert_eq!(ledger.month(YEAR, Month::July).unwrap().expense("Bar").value(), 33.0);
        assert_eq!(persisted(&store), ledger);
    }

    #[test]
    fn test_set_budget_state_single_month() {
        let mut store = store_with_year();
        let incomes = vec![IncomeSource::new("Freela", 500.0)];
        store.set_budget_state(YEAR, Month::May, &incomes, &[], false);

        let ledger = store.snapshot();
        assert_eq!(ledger.month(YEAR, Month::May).unwrap().incomes, incomes);
        assert!(ledger.month(YEAR, Month::May).unwrap().budgets.is_empty());
        assert_eq!(ledger.month(YEAR, Month::June).unwrap().budgets.len(), 3);
    }

    #[test]
    fn test_missing_year_is_noop() {
        let mut store = store_with_year();
        let before = store.snapshot();

        store.set_expense_value(1999, Month::January, "Luz", Amount::new(5.0));
        store.set_budget_state(1999, Month::January, &[], &[], true);
        store.add_expense_item(1999, "Lazer", "Show", true);
        store.remove_expense_item(1999, "Luz");
        store.rename_expense_item(1999, "Luz", "Energia");
        assert_eq!(store.record_expense_entry(1999, Month::January, "Luz", "5"), None);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_add_expense_item_single_month() {
        let mut store = store_with_year();
        store.add_expense_item_at(YEAR, "Lazer", "Streaming", false, Month::June);

        let ledger = store.snapshot();
        let june = ledger.month(YEAR, Month::June).unwrap();
        assert_eq!(june.items_of("Lazer"), ["Cinema", "Bar", "Streaming"]);
        assert_eq!(june.expense("Streaming").value(), 0.0);
        assert!(june.expenses.contains_key("Streaming"));

        for (month, record) in ledger.year(YEAR).unwrap().iter() {
            if month != Month::June {
                assert!(!record.items_of("Lazer").contains(&"Streaming".to_string()));
                assert!(!record.expenses.contains_key("Streaming"));
            }
        }
    }

    #[test]
    fn test_add_expense_item_all_year_skips_months_without_category() {
        let mut store = store_with_year();
        store.set_budget_state(
            YEAR,
            Month::February,
            &[],
            &[BudgetCategory::new("Casa", 100.0)],
            false,
        );

        store.add_expense_item(YEAR, "Lazer", "Show", true);

        let ledger = store.snapshot();
        assert!(ledger
            .month(YEAR, Month::January)
            .unwrap()
            .items_of("Lazer")
            .contains(&"Show".to_string()));
        assert!(!ledger
            .month(YEAR, Month::February)
            .unwrap()
            .expenses
            .contains_key("Show"));
    }

    #[test]
    fn test_add_existing_item_keeps_value() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::April, "Cinema", Amount::new(45.0));

        store.add_expense_item(YEAR, "Lazer", "Cinema", true);

        let april = store.snapshot().month(YEAR, Month::April).unwrap().clone();
        assert_eq!(april.items_of("Lazer"), ["Cinema", "Bar"]);
        assert_eq!(april.expense("Cinema").value(), 45.0);
    }

    #[test]
    fn test_remove_expense_item() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::August, "Bar", Amount::new(12.0));

        store.remove_expense_item(YEAR, "Bar");

        for (_, record) in store.ledger().year(YEAR).unwrap().iter() {
            assert_eq!(record.items_of("Lazer"), ["Cinema"]);
            assert!(!record.expenses.contains_key("Bar"));
        }
    }

    #[test]
    fn test_rename_moves_values_in_place() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::March, "Água", Amount::new(45.0));

        store.rename_expense_item(YEAR, "Água", "Agua");

        let ledger = store.snapshot();
        for (_, record) in ledger.year(YEAR).unwrap().iter() {
            assert_eq!(record.items_of("Gasto Fixo"), ["Agua", "Luz", "Telefone"]);
            assert!(!record.expenses.contains_key("Água"));
        }
        let march = ledger.month(YEAR, Month::March).unwrap();
        assert_eq!(march.expense("Agua").value(), 45.0);
    }

    #[test]
    fn test_rename_onto_existing_overwrites() {
        let mut store = store_with_year();
        store.set_expense_value(YEAR, Month::March, "Luz", Amount::new(80.0));
        store.set_expense_value(YEAR, Month::March, "Água", Amount::new(45.0));

        store.rename_expense_item(YEAR, "Água", "Luz");

        let march = store.snapshot().month(YEAR, Month::March).unwrap().clone();
        assert_eq!(march.expense("Luz").value(), 45.0);
        assert!(!march.expenses.contains_key("Água"));
    }

    #[test]
    fn test_try_rename_reports_conflicts() {
        let mut store = store_with_year();

        let err = store.try_rename_expense_item(YEAR, "Água", "Luz").unwrap_err();
        assert!(err.is_duplicate());

        let err = store.try_rename_expense_item(YEAR, "Gás", "Gas").unwrap_err();
        assert!(err.is_not_found());

        let err = store.try_rename_expense_item(1999, "Água", "Agua").unwrap_err();
        assert!(err.is_not_found());

        store.try_rename_expense_item(YEAR, "Água", "Agua").unwrap();
        assert!(store
            .ledger()
            .month(YEAR, Month::May)
            .unwrap()
            .expenses
            .contains_key("Agua"));
    }

    #[test]
    fn test_record_expense_entry_accumulates() {
        let mut store = store_with_year();

        assert_eq!(
            store.record_expense_entry(YEAR, Month::March, "Luz", "50"),
            Some(Amount::new(50.0))
        );
        assert_eq!(
            store.record_expense_entry(YEAR, Month::March, "Luz", "25,5"),
            Some(Amount::new(75.5))
        );
        assert_eq!(
            store.record_expense_entry(YEAR, Month::March, "Luz", "- 20"),
            Some(Amount::new(55.5))
        );
        assert_eq!(store.record_expense_entry(YEAR, Month::March, "Luz", " "), None);
        assert_eq!(
            store.record_expense_entry(YEAR, Month::March, "Luz", "abc"),
            Some(Amount::new(55.5))
        );
    }

    #[test]
    fn test_reset_all_clears_everything() {
        let mut store = store_with_year();
        store.backend_mut().set(VIEW_MODE_KEY, "grid").unwrap();
        store.backend_mut().set(PREFERRED_CATEGORY_KEY, "Lazer").unwrap();

        assert!(store.reset_all());

        assert!(store.snapshot().is_empty());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_replace_ledger_pads_and_persists() {
        let mut store = store_with_year();
        let mut ledger = Ledger::new();
        ledger.year_or_empty(2030);

        store.replace_ledger(ledger);

        assert_eq!(store.ledger().years(), vec![2030]);
        assert_eq!(persisted(&store).years(), vec![2030]);
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let mut store = BudgetStore::load(FailingStore);
        store.set_expense_value(current_year(), Month::January, "Luz", Amount::new(9.0));

        let january = store.ledger().month(current_year(), Month::January).unwrap();
        assert_eq!(january.expense("Luz").value(), 9.0);
        assert!(!store.reset_all());
    }

    #[test]
    fn test_file_store_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut store = BudgetStore::load(FileStore::new(temp_dir.path()));
            store.initialize_year(YEAR);
            store.set_expense_value(YEAR, Month::October, "Telefone", Amount::new(59.9));
        }

        let store = BudgetStore::load(FileStore::new(temp_dir.path()));
        let october = store.ledger().month(YEAR, Month::October).unwrap();
        assert_eq!(october.expense("Telefone").value(), 59.9);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = BudgetStore::load(MemoryStore::new()).with_audit(logger.clone());

        store.initialize_year(YEAR);
        store.set_expense_value(YEAR, Month::March, "Luz", Amount::new(10.0));
        store.remove_expense_item(YEAR, "Bar");

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].entity_type, EntityType::Year);
        assert_eq!(entries[1].entity_id, "2000/Março/Luz");
        assert_eq!(entries[1].operation, Operation::Update);
        assert_eq!(entries[2].operation, Operation::Delete);
    }

    #[test]
    fn test_rename_of_unknown_item_is_not_audited() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let mut store = store_with_year().with_audit(logger.clone());
        let before = store.snapshot();

        store.rename_expense_item(YEAR, "Gás", "Gas");

        assert_eq!(store.snapshot(), before);
        assert!(logger.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_item_names_are_trimmed_consistently() {
        let mut store = store_with_year();

        store.add_expense_item_at(YEAR, "Lazer", " Show ", false, Month::May);
        assert!(store
            .ledger()
            .month(YEAR, Month::May)
            .unwrap()
            .items_of("Lazer")
            .contains(&"Show".to_string()));

        store.rename_expense_item(YEAR, " Show ", " Teatro ");
        let may = store.ledger().month(YEAR, Month::May).unwrap();
        assert!(may.items_of("Lazer").contains(&"Teatro".to_string()));
        assert!(may.expenses.contains_key("Teatro"));

        store.try_rename_expense_item(YEAR, " Teatro ", "Show").unwrap();
        store.remove_expense_item(YEAR, " Show ");
        let may = store.ledger().month(YEAR, Month::May).unwrap();
        assert_eq!(may.items_of("Lazer"), ["Cinema", "Bar"]);
        assert!(!may.expenses.contains_key("Show"));
    }
}
