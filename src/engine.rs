//! Composition root.
//!
//! Builds the registry, dispatcher and gatekeeper once and wires them
//! together. The registry is shared behind a lock so hosts may register or
//! toggle shortcuts from any thread while key events are being resolved.

use std::sync::Arc;

use async_channel::Receiver;
use parking_lot::RwLock;
use tracing::info;

use crate::channel::LatestValue;
use crate::config::Config;
use crate::dispatcher::{ActionDispatcher, CommandSurface, ExecutionResult};
use crate::listener::{KeyEvent, KeyOutcome, SessionProvider, ShortcutListener};
use crate::shortcuts::{ActionId, ShortcutContext, ShortcutRegistry};

pub type SharedRegistry = Arc<RwLock<ShortcutRegistry>>;

pub struct ShortcutEngine {
    registry: SharedRegistry,
    dispatcher: Arc<ActionDispatcher>,
    listener: ShortcutListener,
    enabled: LatestValue<bool>,
}

impl ShortcutEngine {
    /// Engine with the default shortcut table, shortcuts enabled and the
    /// universal context current.
    pub fn new(surface: Arc<dyn CommandSurface>, session: Arc<dyn SessionProvider>) -> Self {
        Self::from_config(&Config::default(), surface, session)
    }

    pub fn from_config(
        config: &Config,
        surface: Arc<dyn CommandSurface>,
        session: Arc<dyn SessionProvider>,
    ) -> Self {
        let registry: SharedRegistry = Arc::new(RwLock::new(ShortcutRegistry::with_defaults()));
        let dispatcher = Arc::new(ActionDispatcher::new(surface));
        let enabled = LatestValue::new("shortcuts_enabled", config.shortcuts_enabled());
        let listener = ShortcutListener::new(
            registry.clone(),
            dispatcher.clone(),
            session,
            enabled.subscribe(),
        );

        let engine = Self {
            registry,
            dispatcher,
            listener,
            enabled,
        };
        engine.set_context(config.initial_context());

        info!(
            event_type = "app_lifecycle",
            shortcuts = engine.registry.read().len(),
            enabled = config.shortcuts_enabled(),
            context = %config.initial_context(),
            "Shortcut engine initialized"
        );
        engine
    }

    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn listener(&self) -> &ShortcutListener {
        &self.listener
    }

    /// Push a new value of the global enabled setting.
    pub fn set_shortcuts_enabled(&self, enabled: bool) {
        info!(enabled = enabled, "Shortcuts enabled setting changed");
        self.enabled.set(enabled);
    }

    /// Subscribe to the enabled setting; the current value arrives first.
    pub fn subscribe_enabled(&self) -> Receiver<bool> {
        self.enabled.subscribe()
    }

    /// Set the current context on both the gatekeeper and the dispatcher.
    pub fn set_context(&self, context: ShortcutContext) {
        self.listener.set_context(context);
        self.dispatcher.set_context(context);
    }

    pub fn context(&self) -> ShortcutContext {
        self.listener.context()
    }

    pub fn handle_key_event(&self, event: &KeyEvent) -> KeyOutcome {
        self.listener.handle_key_event(event)
    }

    pub fn execute(&self, action: &str) -> ExecutionResult {
        self.dispatcher.execute(action, None)
    }

    pub fn subscribe_actions(&self) -> Receiver<ActionId> {
        self.dispatcher.subscribe_actions()
    }

    pub fn subscribe_results(&self) -> Receiver<ExecutionResult> {
        self.dispatcher.subscribe_results()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
