//! External command handling via stdin.
//!
//! Drives a [`ShortcutEngine`] from JSONL commands, one per line. Used for
//! scripting, manual testing and as a thin host for the engine.
//!
//! # Protocol
//!
//! ```json
//! {"type": "key", "key": "k", "ctrl": true, "target": "textInput"}
//! {"type": "setContext", "context": "list-view"}
//! {"type": "setEnabled", "enabled": false}
//! {"type": "login", "actor": "alice"}
//! {"type": "logout"}
//! {"type": "toggleShortcut", "action": "open-search", "enabled": false}
//! {"type": "listShortcuts"}
//! {"type": "conflicts"}
//! {"type": "reset"}
//! ```
//!
//! Every command produces one or more JSON lines on the output: the command
//! response first, then any actions and execution results it caused.

use std::sync::Arc;

use async_channel::Receiver;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dispatcher::ExecutionResult;
use crate::engine::ShortcutEngine;
use crate::error::DispatchError;
use crate::listener::{EventTarget, KeyEvent, KeyOutcome, Session};
use crate::logging;
use crate::shortcuts::{ActionId, ShortcutConflict, ShortcutContext, ShortcutMetadata};

/// Commands accepted on stdin
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ExternalCommand {
    /// Simulate a key press
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        alt: bool,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        meta: bool,
        #[serde(default)]
        target: EventTarget,
    },
    /// Change the current context
    SetContext { context: ShortcutContext },
    /// Push a new value of the global enabled setting
    SetEnabled { enabled: bool },
    /// Set the authenticated actor
    Login { actor: String },
    /// Clear the authenticated actor
    Logout,
    /// Enable or disable a single shortcut
    ToggleShortcut { action: String, enabled: bool },
    /// Print every registered shortcut
    ListShortcuts,
    /// Print detected binding conflicts
    Conflicts,
    /// Restore the default shortcut table
    Reset,
}

/// Lines written in response to commands
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Output {
    KeyOutcome {
        key: String,
        outcome: KeyOutcome,
    },
    ActionRequested {
        action: ActionId,
    },
    ExecutionResult {
        result: ExecutionResult,
    },
    Shortcuts {
        shortcuts: Vec<ShortcutMetadata>,
    },
    Conflicts {
        conflicts: Vec<ShortcutConflict>,
    },
    Ack {
        command: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        ok: Option<bool>,
    },
    Error {
        message: String,
    },
}

/// Parse one JSONL line into a command
pub fn parse_command(line: &str) -> Result<ExternalCommand, DispatchError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::InvalidCommand("empty line".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Applies commands to an engine and collects the resulting output lines
pub struct CommandProcessor<'a> {
    engine: &'a ShortcutEngine,
    session: Arc<Session>,
    actions: Receiver<ActionId>,
    results: Receiver<ExecutionResult>,
}

impl<'a> CommandProcessor<'a> {
    pub fn new(engine: &'a ShortcutEngine, session: Arc<Session>) -> Self {
        Self {
            engine,
            session,
            actions: engine.subscribe_actions(),
            results: engine.subscribe_results(),
        }
    }

    /// Handle one raw line. Invalid lines yield a single `Error` output.
    pub fn process_line(&self, line: &str) -> Vec<Output> {
        match parse_command(line) {
            Ok(command) => self.apply(command),
            Err(e) => {
                warn!(error = %e, line = line, "Ignoring invalid stdin command");
                vec![Output::Error {
                    message: e.to_string(),
                }]
            }
        }
    }

    pub fn apply(&self, command: ExternalCommand) -> Vec<Output> {
        let mut out = vec![self.respond(command)];
        while let Ok(action) = self.actions.try_recv() {
            out.push(Output::ActionRequested { action });
        }
        while let Ok(result) = self.results.try_recv() {
            out.push(Output::ExecutionResult { result });
        }
        out
    }

    fn respond(&self, command: ExternalCommand) -> Output {
        match command {
            ExternalCommand::Key {
                key,
                ctrl,
                alt,
                shift,
                meta,
                target,
            } => {
                let event = KeyEvent {
                    key,
                    ctrl,
                    alt,
                    shift,
                    meta,
                    target,
                };
                let outcome = self.engine.handle_key_event(&event);
                logging::log_key_event(
                    &event.key,
                    &modifier_summary(&event),
                    outcome.dispatched_action().unwrap_or("none"),
                );
                Output::KeyOutcome {
                    key: event.key,
                    outcome,
                }
            }
            ExternalCommand::SetContext { context } => {
                self.engine.set_context(context);
                Output::Ack {
                    command: "setContext",
                    ok: None,
                }
            }
            ExternalCommand::SetEnabled { enabled } => {
                self.engine.set_shortcuts_enabled(enabled);
                Output::Ack {
                    command: "setEnabled",
                    ok: None,
                }
            }
            ExternalCommand::Login { actor } => {
                info!(actor = %actor, "Actor signed in");
                self.session.sign_in(actor);
                Output::Ack {
                    command: "login",
                    ok: None,
                }
            }
            ExternalCommand::Logout => {
                info!("Actor signed out");
                self.session.sign_out();
                Output::Ack {
                    command: "logout",
                    ok: None,
                }
            }
            ExternalCommand::ToggleShortcut { action, enabled } => {
                let ok = self.engine.registry().write().set_enabled(&action, enabled);
                Output::Ack {
                    command: "toggleShortcut",
                    ok: Some(ok),
                }
            }
            ExternalCommand::ListShortcuts => Output::Shortcuts {
                shortcuts: self.engine.registry().read().get_all().to_vec(),
            },
            ExternalCommand::Conflicts => Output::Conflicts {
                conflicts: self.engine.registry().read().detect_conflicts(),
            },
            ExternalCommand::Reset => {
                self.engine.registry().write().reset_to_defaults();
                Output::Ack {
                    command: "reset",
                    ok: None,
                }
            }
        }
    }
}

fn modifier_summary(event: &KeyEvent) -> String {
    let mut parts = Vec::new();
    if event.ctrl {
        parts.push("ctrl");
    }
    if event.alt {
        parts.push("alt");
    }
    if event.shift {
        parts.push("shift");
    }
    if event.meta {
        parts.push("meta");
    }
    parts.join("+")
}
