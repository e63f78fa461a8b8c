//! shortcut-dispatch - keyboard shortcut dispatch engine
//!
//! Stores shortcut definitions with context scoping and priority, matches
//! key events against them through a context hierarchy, detects binding
//! conflicts and routes matched actions to built-in commands or external
//! listeners.

pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod listener;
pub mod logging;
pub mod shortcuts;
pub mod stdin_commands;

pub use dispatcher::{ActionDispatcher, CommandSurface, ExecutionResult};
pub use engine::{SharedRegistry, ShortcutEngine};
pub use listener::{EventTarget, KeyEvent, KeyOutcome, Session, SessionProvider, ShortcutListener};
