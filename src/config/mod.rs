//! Configuration module - Engine settings
//!
//! This module provides functionality for:
//! - Loading configuration from `<config dir>/shortcut-dispatch/config.json`
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, ShortcutsConfig)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{APP_DIR_NAME, DEFAULT_LOG_FILTER};
pub use loader::{default_config_path, load_config, read_config, resolve_config, ConfigStatus};
pub use types::{Config, ShortcutsConfig};

#[cfg(test)]
pub use defaults::{DEFAULT_INITIAL_CONTEXT, DEFAULT_SHORTCUTS_ENABLED};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
