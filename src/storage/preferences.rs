//! View preferences
//!
//! Two small values remembered between sessions: the last expense category
//! filter and whether expenses are shown as a list or a grid.

use std::fmt;
use std::str::FromStr;

use crate::error::{BudgetError, BudgetResult};

use super::kv::KeyValueStore;

/// Storage key of the last selected expense category
pub const PREFERRED_CATEGORY_KEY: &str = "financeAppPreferredCategory";

/// Storage key of the last selected view mode
pub const VIEW_MODE_KEY: &str = "financeAppView";

/// Category filter value meaning "every category"
pub const ALL_CATEGORIES: &str = "TODAS";

/// How the expense items are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One month, one row per item
    #[default]
    List,
    /// Items as columns, one row per displayed month
    Grid,
}

impl ViewMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "list" => Ok(ViewMode::List),
            "grid" => Ok(ViewMode::Grid),
            other => Err(BudgetError::Validation(format!("Unknown view mode: {}", other))),
        }
    }
}

/// Remembered view preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Category name, or `None` for all categories
    pub category: Option<String>,
    pub view_mode: ViewMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            category: None,
            view_mode: ViewMode::List,
        }
    }
}

impl Preferences {
    /// Read preferences, falling back to defaults for missing or unknown values
    pub fn load<S: KeyValueStore>(store: &S) -> BudgetResult<Self> {
        let category = store
            .get(PREFERRED_CATEGORY_KEY)?
            .filter(|c| !c.is_empty() && c != ALL_CATEGORIES);

        let view_mode = store
            .get(VIEW_MODE_KEY)?
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            category,
            view_mode,
        })
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> BudgetResult<()> {
        let category = self.category.as_deref().unwrap_or(ALL_CATEGORIES);
        store.set(PREFERRED_CATEGORY_KEY, category)?;
        store.set(VIEW_MODE_KEY, self.view_mode.as_str())
    }
}
