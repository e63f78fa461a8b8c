//! Key event gatekeeper.
//!
//! Single entry point for raw key presses. Admission gates run in a fixed
//! order and short-circuit on the first that applies:
//!
//! 1. shortcuts globally disabled -> drop
//! 2. `Escape` -> always dispatch `close-dialog`
//! 3. no authenticated actor -> drop
//! 4. typing in a text field without Ctrl/Alt/Meta -> drop (open-search excepted)
//!
//! Surviving events are normalized into a [`Binding`] and resolved against
//! the registry for the current context. A match is dispatched; a miss is
//! only logged.

use std::sync::Arc;

use async_channel::Receiver;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::channel::drain_latest;
use crate::dispatcher::ActionDispatcher;
use crate::engine::SharedRegistry;
use crate::shortcuts::defaults::{CLOSE_DIALOG, CLOSE_KEY, OPEN_SEARCH};
use crate::shortcuts::{normalize_event_to_binding, ActionId, Binding, ShortcutContext};

/// What the key event was aimed at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventTarget {
    #[default]
    Other,
    TextInput,
    TextArea,
    ContentEditable,
}

impl EventTarget {
    pub fn is_text_editing(&self) -> bool {
        matches!(
            self,
            Self::TextInput | Self::TextArea | Self::ContentEditable
        )
    }
}

/// A raw key press as reported by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub target: EventTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn on(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    pub fn to_binding(&self) -> Binding {
        normalize_event_to_binding(&self.key, self.ctrl, self.alt, self.shift, self.meta)
    }

    /// Shift alone does not count: it is part of ordinary typing.
    fn has_command_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Why an event was dropped before matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropReason {
    ShortcutsDisabled,
    NoActor,
    TypingInTextField,
}

/// Result of handling one key event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum KeyOutcome {
    Dropped { reason: DropReason },
    NoMatch,
    Dispatched {
        action: ActionId,
        /// The host should suppress its default handling of this key.
        #[serde(rename = "preventDefault")]
        prevent_default: bool,
        success: bool,
    },
}

impl KeyOutcome {
    pub fn dispatched_action(&self) -> Option<&str> {
        match self {
            Self::Dispatched { action, .. } => Some(action),
            _ => None,
        }
    }
}

/// Source of the current authenticated actor, polled at gate time.
pub trait SessionProvider: Send + Sync {
    fn current_actor(&self) -> Option<String>;
}

/// Simple in-memory session holder.
#[derive(Default)]
pub struct Session {
    actor: RwLock<Option<String>>,
}

impl Session {
    pub fn signed_in(actor: impl Into<String>) -> Self {
        Self {
            actor: RwLock::new(Some(actor.into())),
        }
    }

    pub fn sign_in(&self, actor: impl Into<String>) {
        *self.actor.write() = Some(actor.into());
    }

    pub fn sign_out(&self) {
        *self.actor.write() = None;
    }
}

impl SessionProvider for Session {
    fn current_actor(&self) -> Option<String> {
        self.actor.read().clone()
    }
}

pub struct ShortcutListener {
    registry: SharedRegistry,
    dispatcher: Arc<ActionDispatcher>,
    session: Arc<dyn SessionProvider>,
    enabled_updates: Receiver<bool>,
    /// Drain and store happen under this lock so a stale value never wins.
    enabled: Mutex<bool>,
    context: RwLock<ShortcutContext>,
}

impl ShortcutListener {
    /// `enabled_updates` should come from a last-value source so the first
    /// gate check already sees the configured flag. Until a value arrives
    /// shortcuts are enabled.
    pub fn new(
        registry: SharedRegistry,
        dispatcher: Arc<ActionDispatcher>,
        session: Arc<dyn SessionProvider>,
        enabled_updates: Receiver<bool>,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            session,
            enabled_updates,
            enabled: Mutex::new(true),
            context: RwLock::new(ShortcutContext::default()),
        }
    }

    /// Last-write-wins; there is no exit notification.
    pub fn set_context(&self, context: ShortcutContext) {
        trace!(context = %context, "Listener context changed");
        *self.context.write() = context;
    }

    pub fn context(&self) -> ShortcutContext {
        *self.context.read()
    }

    /// Most recently received value of the global enabled flag.
    pub fn shortcuts_enabled(&self) -> bool {
        let mut enabled = self.enabled.lock();
        if let Some(latest) = drain_latest(&self.enabled_updates) {
            *enabled = latest;
        }
        *enabled
    }

    pub fn handle_key_event(&self, event: &KeyEvent) -> KeyOutcome {
        if !self.shortcuts_enabled() {
            trace!(key = %event.key, "Shortcuts disabled, dropping key event");
            return KeyOutcome::Dropped {
                reason: DropReason::ShortcutsDisabled,
            };
        }

        let context = self.context();

        // Dialogs must stay dismissible regardless of session or focus
        if event.key == CLOSE_KEY {
            return self.dispatch(CLOSE_DIALOG, context);
        }

        if self.session.current_actor().is_none() {
            trace!(key = %event.key, "No authenticated actor, dropping key event");
            return KeyOutcome::Dropped {
                reason: DropReason::NoActor,
            };
        }

        let binding = event.to_binding();

        if event.target.is_text_editing()
            && !event.has_command_modifier()
            && !self.is_open_search_binding(&binding)
        {
            trace!(
                key = %event.key,
                target = ?event.target,
                "Typing in text field, dropping key event"
            );
            return KeyOutcome::Dropped {
                reason: DropReason::TypingInTextField,
            };
        }

        let matched = self
            .registry
            .read()
            .find_matching_shortcut(&binding, context)
            .map(|s| s.action.clone());

        match matched {
            Some(action) => self.dispatch(&action, context),
            None => {
                debug!(binding = %binding, context = %context, "No shortcut matched");
                KeyOutcome::NoMatch
            }
        }
    }

    fn is_open_search_binding(&self, binding: &Binding) -> bool {
        self.registry
            .read()
            .get_by_action(OPEN_SEARCH)
            .is_some_and(|s| s.enabled && s.binding.matches_event(binding))
    }

    fn dispatch(&self, action: &str, context: ShortcutContext) -> KeyOutcome {
        let result = self.dispatcher.execute(action, Some(context));
        KeyOutcome::Dispatched {
            action: action.to_string(),
            prevent_default: true,
            success: result.success,
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
