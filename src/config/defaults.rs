//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

use crate::shortcuts::ShortcutContext;

/// Shortcuts are enabled unless the config says otherwise
pub const DEFAULT_SHORTCUTS_ENABLED: bool = true;

/// Context the engine starts in
pub const DEFAULT_INITIAL_CONTEXT: ShortcutContext = ShortcutContext::Universal;

/// Log filter used when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Directory name under the platform config / data dirs
pub const APP_DIR_NAME: &str = "shortcut-dispatch";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.json";
