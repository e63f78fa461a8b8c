//! Keyboard shortcut definitions, matching and conflict detection.
//!
//! This module provides:
//! - Binding descriptors with normalization and display labels
//! - A static context hierarchy with ancestor-walk eligibility
//! - The shortcut registry with priority-ordered match resolution
//! - Conflict detection across contexts
//!
//! # Example
//!
//! ```
//! use shortcut_dispatch::shortcuts::{Binding, ShortcutContext, ShortcutRegistry};
//!
//! let registry = ShortcutRegistry::with_defaults();
//! let hit = registry.find_matching_shortcut(&Binding::ctrl("k"), ShortcutContext::Universal);
//! assert_eq!(hit.map(|s| s.action.as_str()), Some("open-search"));
//! ```

mod context;
pub mod defaults;
mod registry;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;


pub use context::{ContextHierarchy, ShortcutContext};
pub use defaults::default_shortcuts;
pub use registry::{
    ActionId, ShortcutCategory, ShortcutConflict, ShortcutMetadata, ShortcutRegistry,
};
pub use types::{
    bindings_equal, display_label, is_shifted_punctuation, normalize_event_to_binding, Binding,
    ShortcutParseError, SHIFTED_PUNCTUATION,
};
