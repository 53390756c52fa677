//! User settings for the budget tracker
//!
//! Display conventions and audit preferences, persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::TrackerPaths;
use crate::error::BudgetError;
use crate::models::CurrencyFormat;
use crate::storage::{read_json, write_json_atomic};

/// Label used on export for items whose category cannot be resolved
pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Não categorizado";

/// User settings for the budget tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How amounts are rendered
    #[serde(default)]
    pub currency: CurrencyFormat,

    /// Whether ledger mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Category written on export for items without one
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

fn default_uncategorized_label() -> String {
    DEFAULT_UNCATEGORIZED_LABEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: CurrencyFormat::default(),
            audit_enabled: default_audit_enabled(),
            uncategorized_label: default_uncategorized_label(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    ///
    /// Nothing is written for a missing file; the caller decides when to
    /// persist.
    pub fn load_or_create(paths: &TrackerPaths) -> Result<Self, BudgetError> {
        read_json(paths.settings_file()).map_err(|e| match e {
            BudgetError::Storage(msg) => BudgetError::Config(msg),
            other => other,
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TrackerPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
    }
}
