//! Two-tier action router.
//!
//! Tier 1 actions map to a fixed set of built-in commands on the
//! [`CommandSurface`] and are executed synchronously. Every action, built-in
//! or not, is then broadcast on the action stream for external listeners,
//! followed by one [`ExecutionResult`] on the result stream.
//!
//! Nothing here returns an error or unwinds to the caller: command failures
//! and panics become failed execution results.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_channel::Receiver;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::channel::Broadcast;
use crate::shortcuts::defaults::{
    BACK_TO_LIST, CLOSE_DIALOG, CREATE_ENTITY, FOCUS_SEARCH, NEW_MESSAGE, NEXT_ITEM, OPEN_SEARCH,
    PREV_ITEM, SAVE_CHANGES, SEND_MESSAGE, SHOW_HELP, SHOW_INFO,
};
use crate::shortcuts::{ActionId, ShortcutContext};

/// Navigation and command surface owned by the host application.
///
/// Each call is fire-and-forget; only failure is observed.
pub trait CommandSurface: Send + Sync {
    fn open_search(&self) -> anyhow::Result<()>;
    fn create_entity_flow(&self) -> anyhow::Result<()>;
    fn show_info_panel(&self) -> anyhow::Result<()>;
    fn show_help_overlay(&self) -> anyhow::Result<()>;
    fn close_active_overlay(&self) -> anyhow::Result<()>;
    fn navigate_to_list_root(&self) -> anyhow::Result<()>;
}

/// Actions the dispatcher executes itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltInCommand {
    OpenSearch,
    CreateEntity,
    ShowInfo,
    ShowHelp,
    CloseDialog,
    BackToList,
}

impl BuiltInCommand {
    pub const ALL: [BuiltInCommand; 6] = [
        BuiltInCommand::OpenSearch,
        BuiltInCommand::CreateEntity,
        BuiltInCommand::ShowInfo,
        BuiltInCommand::ShowHelp,
        BuiltInCommand::CloseDialog,
        BuiltInCommand::BackToList,
    ];

    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.action() == action)
    }

    pub fn action(&self) -> &'static str {
        match self {
            Self::OpenSearch => OPEN_SEARCH,
            Self::CreateEntity => CREATE_ENTITY,
            Self::ShowInfo => SHOW_INFO,
            Self::ShowHelp => SHOW_HELP,
            Self::CloseDialog => CLOSE_DIALOG,
            Self::BackToList => BACK_TO_LIST,
        }
    }

    fn invoke(&self, surface: &dyn CommandSurface) -> anyhow::Result<()> {
        match self {
            Self::OpenSearch => surface.open_search(),
            Self::CreateEntity => surface.create_entity_flow(),
            Self::ShowInfo => surface.show_info_panel(),
            Self::ShowHelp => surface.show_help_overlay(),
            Self::CloseDialog => surface.close_active_overlay(),
            Self::BackToList => surface.navigate_to_list_root(),
        }
    }
}

/// Default actions routed to external listeners only.
const EXTERNAL_ACTIONS: &[&str] = &[
    FOCUS_SEARCH,
    PREV_ITEM,
    NEXT_ITEM,
    NEW_MESSAGE,
    SEND_MESSAGE,
    SAVE_CHANGES,
];

/// Outcome of one dispatch attempt. Emitted once per `execute` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub action: ActionId,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ShortcutContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct ActionDispatcher {
    surface: Arc<dyn CommandSurface>,
    context: RwLock<ShortcutContext>,
    actions: Broadcast<ActionId>,
    results: Broadcast<ExecutionResult>,
}

impl ActionDispatcher {
    pub fn new(surface: Arc<dyn CommandSurface>) -> Self {
        Self {
            surface,
            context: RwLock::new(ShortcutContext::default()),
            actions: Broadcast::new("action_requested"),
            results: Broadcast::new("execution_result"),
        }
    }

    /// Every dispatched action, in dispatch order.
    pub fn subscribe_actions(&self) -> Receiver<ActionId> {
        self.actions.subscribe()
    }

    /// One record per dispatch attempt.
    pub fn subscribe_results(&self) -> Receiver<ExecutionResult> {
        self.results.subscribe()
    }

    pub fn set_context(&self, context: ShortcutContext) {
        *self.context.write() = context;
    }

    pub fn context(&self) -> ShortcutContext {
        *self.context.read()
    }

    /// Run `action`, using the mirrored context when `context` is `None`.
    ///
    /// Order: built-in command (if any), action broadcast, result broadcast.
    pub fn execute(&self, action: &str, context: Option<ShortcutContext>) -> ExecutionResult {
        let context = context.unwrap_or_else(|| self.context());

        let outcome = match BuiltInCommand::from_action(action) {
            Some(command) => {
                debug!(action = action, command = ?command, "Executing built-in command");
                let surface = self.surface.as_ref();
                match panic::catch_unwind(AssertUnwindSafe(|| command.invoke(surface))) {
                    Ok(Ok(())) => Ok(()),
                    Ok(Err(e)) => Err(format!("{e:#}")),
                    Err(payload) => Err(panic_message(payload.as_ref())),
                }
            }
            None => Ok(()),
        };

        self.actions.publish(action.to_string());

        let result = ExecutionResult {
            action: action.to_string(),
            timestamp: Utc::now(),
            success: outcome.is_ok(),
            context: Some(context),
            error: outcome.err(),
        };

        match &result.error {
            None => info!(
                event_type = "shortcut_dispatch",
                action = action,
                context = %context,
                "Action dispatched"
            ),
            Some(error) => warn!(
                event_type = "shortcut_dispatch",
                action = action,
                context = %context,
                error = %error,
                "Built-in command failed"
            ),
        }

        self.results.publish(result.clone());
        result
    }

    pub fn is_built_in(&self, action: &str) -> bool {
        BuiltInCommand::from_action(action).is_some()
    }

    pub fn built_in_actions(&self) -> Vec<ActionId> {
        BuiltInCommand::ALL
            .iter()
            .map(|c| c.action().to_string())
            .collect()
    }

    pub fn external_actions(&self) -> Vec<ActionId> {
        EXTERNAL_ACTIONS.iter().map(|a| a.to_string()).collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "built-in command panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<&'static str>>,
        fail_search: bool,
        panic_help: bool,
    }

    impl RecordingSurface {
        fn record(&self, name: &'static str) -> anyhow::Result<()> {
            self.calls.lock().push(name);
            Ok(())
        }
    }

    impl CommandSurface for RecordingSurface {
        fn open_search(&self) -> anyhow::Result<()> {
            if self.fail_search {
                anyhow::bail!("search surface unavailable");
            }
            self.record("open_search")
        }
        fn create_entity_flow(&self) -> anyhow::Result<()> {
            self.record("create_entity_flow")
        }
        fn show_info_panel(&self) -> anyhow::Result<()> {
            self.record("show_info_panel")
        }
        fn show_help_overlay(&self) -> anyhow::Result<()> {
            if self.panic_help {
                panic!("help overlay exploded");
            }
            self.record("show_help_overlay")
        }
        fn close_active_overlay(&self) -> anyhow::Result<()> {
            self.record("close_active_overlay")
        }
        fn navigate_to_list_root(&self) -> anyhow::Result<()> {
            self.record("navigate_to_list_root")
        }
    }

    fn dispatcher_with(surface: RecordingSurface) -> (ActionDispatcher, Arc<RecordingSurface>) {
        let surface = Arc::new(surface);
        (ActionDispatcher::new(surface.clone()), surface)
    }

    #[test]
    fn built_in_action_invokes_surface_and_broadcasts() {
        let (dispatcher, surface) = dispatcher_with(RecordingSurface::default());
        let actions = dispatcher.subscribe_actions();
        let results = dispatcher.subscribe_results();

        let result = dispatcher.execute(OPEN_SEARCH, Some(ShortcutContext::ListView));

        assert!(result.success);
        assert_eq!(*surface.calls.lock(), vec!["open_search"]);
        assert_eq!(actions.try_recv().unwrap(), OPEN_SEARCH);
        assert!(actions.try_recv().is_err());
        let published = results.try_recv().unwrap();
        assert_eq!(published, result);
        assert_eq!(published.context, Some(ShortcutContext::ListView));
    }

    #[test]
    fn every_built_in_maps_to_its_command() {
        let (dispatcher, surface) = dispatcher_with(RecordingSurface::default());
        for action in dispatcher.built_in_actions() {
            dispatcher.execute(&action, None);
        }
        assert_eq!(
            *surface.calls.lock(),
            vec![
                "open_search",
                "create_entity_flow",
                "show_info_panel",
                "show_help_overlay",
                "close_active_overlay",
                "navigate_to_list_root",
            ]
        );
    }

    #[test]
    fn external_action_is_broadcast_only() {
        let (dispatcher, surface) = dispatcher_with(RecordingSurface::default());
        let actions = dispatcher.subscribe_actions();

        let result = dispatcher.execute(SEND_MESSAGE, None);

        assert!(result.success);
        assert!(surface.calls.lock().is_empty());
        assert_eq!(actions.try_recv().unwrap(), SEND_MESSAGE);
    }

    #[test]
    fn unknown_action_is_treated_as_external() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface::default());
        let actions = dispatcher.subscribe_actions();
        assert!(dispatcher.execute("plugin-action", None).success);
        assert_eq!(actions.try_recv().unwrap(), "plugin-action");
    }

    #[test]
    fn command_error_becomes_failed_result() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface {
            fail_search: true,
            ..Default::default()
        });
        let actions = dispatcher.subscribe_actions();
        let results = dispatcher.subscribe_results();

        let result = dispatcher.execute(OPEN_SEARCH, None);

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("search surface unavailable"));
        // The action is still broadcast exactly once
        assert_eq!(actions.try_recv().unwrap(), OPEN_SEARCH);
        assert!(actions.try_recv().is_err());
        assert!(!results.try_recv().unwrap().success);
    }

    #[test]
    fn command_panic_becomes_failed_result() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface {
            panic_help: true,
            ..Default::default()
        });
        let result = dispatcher.execute(SHOW_HELP, None);
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("help overlay exploded"));
    }

    #[test]
    fn mirrored_context_is_used_when_omitted() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface::default());
        assert_eq!(dispatcher.context(), ShortcutContext::Universal);
        dispatcher.set_context(ShortcutContext::DialogOpen);
        let result = dispatcher.execute(CLOSE_DIALOG, None);
        assert_eq!(result.context, Some(ShortcutContext::DialogOpen));
        let explicit = dispatcher.execute(CLOSE_DIALOG, Some(ShortcutContext::SearchDialog));
        assert_eq!(explicit.context, Some(ShortcutContext::SearchDialog));
    }

    #[test]
    fn introspection_partitions_default_actions() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface::default());
        let built_in = dispatcher.built_in_actions();
        let external = dispatcher.external_actions();
        assert_eq!(built_in.len() + external.len(), 12);
        assert!(built_in.iter().all(|a| dispatcher.is_built_in(a)));
        assert!(external.iter().all(|a| !dispatcher.is_built_in(a)));
    }

    #[test]
    fn result_serializes_camel_case() {
        let (dispatcher, _surface) = dispatcher_with(RecordingSurface::default());
        let json = serde_json::to_value(dispatcher.execute(NEXT_ITEM, None)).unwrap();
        assert_eq!(json["action"], NEXT_ITEM);
        assert_eq!(json["success"], true);
        assert_eq!(json["context"], "universal");
        assert!(json.get("error").is_none());
    }
}
