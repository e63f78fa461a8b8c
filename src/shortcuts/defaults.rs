//! Built-in shortcut table loaded at startup and by `reset_to_defaults`.

use super::context::ShortcutContext;
use super::registry::{ShortcutCategory, ShortcutMetadata};
use super::types::Binding;

pub const SHOW_HELP: &str = "show-help";
pub const CLOSE_DIALOG: &str = "close-dialog";
pub const OPEN_SEARCH: &str = "open-search";
pub const CREATE_ENTITY: &str = "create-entity";
pub const SHOW_INFO: &str = "show-info";
pub const FOCUS_SEARCH: &str = "focus-search";
pub const PREV_ITEM: &str = "prev-item";
pub const NEXT_ITEM: &str = "next-item";
pub const BACK_TO_LIST: &str = "back-to-list";
pub const NEW_MESSAGE: &str = "new-message";
pub const SEND_MESSAGE: &str = "send-message";
pub const SAVE_CHANGES: &str = "save-changes";

/// Key that always closes the active overlay.
pub const CLOSE_KEY: &str = "Escape";

/// The default shortcut table, in registration order.
pub fn default_shortcuts() -> Vec<ShortcutMetadata> {
    use ShortcutCategory::*;
    use ShortcutContext::*;

    vec![
        ShortcutMetadata::new(
            SHOW_HELP,
            Binding::shift("?"),
            "Show keyboard shortcuts",
            General,
            Universal,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            CLOSE_DIALOG,
            Binding::key(CLOSE_KEY),
            "Close dialog",
            General,
            DialogOpen,
        )
        .with_priority(200),
        ShortcutMetadata::new(
            OPEN_SEARCH,
            Binding::ctrl("k"),
            "Open search",
            General,
            Universal,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            CREATE_ENTITY,
            Binding::ctrl("n"),
            "Create new",
            Messaging,
            Universal,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            SHOW_INFO,
            Binding::ctrl("i"),
            "Show details panel",
            Navigation,
            ListView,
        )
        .with_priority(90),
        ShortcutMetadata::new(
            FOCUS_SEARCH,
            Binding::key("/"),
            "Focus search field",
            General,
            Universal,
        )
        .with_priority(80),
        ShortcutMetadata::new(
            PREV_ITEM,
            Binding::alt("ArrowUp"),
            "Previous item",
            Navigation,
            ListView,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            NEXT_ITEM,
            Binding::alt("ArrowDown"),
            "Next item",
            Navigation,
            ListView,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            BACK_TO_LIST,
            Binding::ctrl("b"),
            "Back to list",
            Navigation,
            ListView,
        )
        .with_priority(90),
        ShortcutMetadata::new(
            NEW_MESSAGE,
            Binding::ctrl("m"),
            "New message",
            Messaging,
            ListView,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            SEND_MESSAGE,
            Binding::ctrl("Enter"),
            "Send message",
            Messaging,
            TextInput,
        )
        .with_priority(100),
        ShortcutMetadata::new(
            SAVE_CHANGES,
            Binding::ctrl("s"),
            "Save changes",
            Editing,
            Universal,
        )
        .with_priority(100),
    ]
}
