//! Configuration type definitions
//!
//! This module contains all the struct and enum definitions for configuration.

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::shortcuts::ShortcutContext;

// ============================================
// SHORTCUTS CONFIG
// ============================================

/// Settings category owning the keyboard shortcut options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutsConfig {
    /// Globally enable keyboard shortcuts (default: true)
    #[serde(default = "default_shortcuts_enabled")]
    pub enabled: bool,
    /// Context the engine starts in (default: universal)
    #[serde(default = "default_initial_context")]
    pub initial_context: ShortcutContext,
}

fn default_shortcuts_enabled() -> bool {
    DEFAULT_SHORTCUTS_ENABLED
}
fn default_initial_context() -> ShortcutContext {
    DEFAULT_INITIAL_CONTEXT
}

impl Default for ShortcutsConfig {
    fn default() -> Self {
        ShortcutsConfig {
            enabled: DEFAULT_SHORTCUTS_ENABLED,
            initial_context: DEFAULT_INITIAL_CONTEXT,
        }
    }
}

// ============================================
// MAIN CONFIG
// ============================================

/// Top-level configuration loaded from config.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Keyboard shortcut settings; absent means all defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcuts: Option<ShortcutsConfig>,
    /// tracing EnvFilter directive used when RUST_LOG is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Config {
    /// Returns the global enabled flag, defaulting to enabled when the
    /// shortcuts category is absent
    pub fn shortcuts_enabled(&self) -> bool {
        self.shortcuts
            .as_ref()
            .map(|s| s.enabled)
            .unwrap_or(DEFAULT_SHORTCUTS_ENABLED)
    }

    /// Returns the configured starting context
    pub fn initial_context(&self) -> ShortcutContext {
        self.shortcuts
            .as_ref()
            .map(|s| s.initial_context)
            .unwrap_or(DEFAULT_INITIAL_CONTEXT)
    }

    /// Returns the log filter directive, or the default
    pub fn get_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
