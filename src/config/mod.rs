//! Configuration module for the budget tracker
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (currency display, audit log)

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
