//! Storage layer for the budget tracker
//!
//! Persisted state is a small set of string values under fixed keys, kept
//! behind the [`KeyValueStore`] trait. The file backend writes each key
//! atomically into the data directory.

pub mod file_io;
pub mod kv;
pub mod preferences;

pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use preferences::{Preferences, ViewMode, ALL_CATEGORIES, PREFERRED_CATEGORY_KEY, VIEW_MODE_KEY};

/// Storage key of the serialized ledger
pub const LEDGER_KEY: &str = "financeAppVFinal21";
