//! Shortcut contexts and the static scope hierarchy.
//!
//! Contexts form a shallow forest through a fixed child -> parent map.
//! A shortcut registered in a broader scope stays eligible while a nested
//! scope is current, and `Universal` is eligible everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named scope under which a shortcut is eligible to match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShortcutContext {
    /// Active everywhere.
    #[default]
    Universal,
    ListView,
    SelectedItem,
    DialogOpen,
    SearchDialog,
    #[serde(rename = "text-input-scope")]
    TextInput,
    Settings,
}

impl ShortcutContext {
    pub const ALL: [ShortcutContext; 7] = [
        ShortcutContext::Universal,
        ShortcutContext::ListView,
        ShortcutContext::SelectedItem,
        ShortcutContext::DialogOpen,
        ShortcutContext::SearchDialog,
        ShortcutContext::TextInput,
        ShortcutContext::Settings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Universal => "universal",
            Self::ListView => "list-view",
            Self::SelectedItem => "selected-item",
            Self::DialogOpen => "dialog-open",
            Self::SearchDialog => "search-dialog",
            Self::TextInput => "text-input-scope",
            Self::Settings => "settings",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn parent(&self) -> Option<ShortcutContext> {
        ContextHierarchy::STANDARD.parent(*self)
    }
}

impl fmt::Display for ShortcutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child -> parent links. Must stay acyclic.
const PARENTS: &[(ShortcutContext, ShortcutContext)] = &[
    (ShortcutContext::SelectedItem, ShortcutContext::ListView),
    (ShortcutContext::SearchDialog, ShortcutContext::DialogOpen),
];

/// Explicit parent map plus a uniform ancestor walk.
#[derive(Clone, Copy, Debug)]
pub struct ContextHierarchy {
    parents: &'static [(ShortcutContext, ShortcutContext)],
    universal: ShortcutContext,
}

impl ContextHierarchy {
    pub const STANDARD: ContextHierarchy = ContextHierarchy {
        parents: PARENTS,
        universal: ShortcutContext::Universal,
    };

    pub const fn new(
        parents: &'static [(ShortcutContext, ShortcutContext)],
        universal: ShortcutContext,
    ) -> Self {
        Self { parents, universal }
    }

    pub fn universal(&self) -> ShortcutContext {
        self.universal
    }

    pub fn parent(&self, context: ShortcutContext) -> Option<ShortcutContext> {
        self.parents
            .iter()
            .find(|(child, _)| *child == context)
            .map(|(_, parent)| *parent)
    }

    /// Walk from `context` (exclusive) up to the root.
    ///
    /// Bounded by the size of the map so a malformed table cannot loop.
    pub fn ancestors(
        &self,
        context: ShortcutContext,
    ) -> impl Iterator<Item = ShortcutContext> + '_ {
        let mut current = Some(context);
        let mut steps = 0usize;
        std::iter::from_fn(move || {
            if steps > self.parents.len() {
                return None;
            }
            steps += 1;
            current = current.and_then(|c| self.parent(c));
            current
        })
    }

    /// Number of parent links above `context`.
    pub fn depth(&self, context: ShortcutContext) -> usize {
        self.ancestors(context).count()
    }

    /// Whether a shortcut registered in `candidate` is eligible while
    /// `requested` is the current context.
    pub fn is_within(&self, candidate: ShortcutContext, requested: ShortcutContext) -> bool {
        candidate == requested
            || candidate == self.universal
            || self.ancestors(requested).any(|ancestor| ancestor == candidate)
    }
}

impl Default for ContextHierarchy {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_context_is_within() {
        for context in ShortcutContext::ALL {
            assert!(ContextHierarchy::STANDARD.is_within(context, context));
        }
    }

    #[test]
    fn universal_is_within_everything() {
        for context in ShortcutContext::ALL {
            assert!(ContextHierarchy::STANDARD.is_within(ShortcutContext::Universal, context));
        }
    }

    #[test]
    fn parent_scope_is_within_child() {
        let h = ContextHierarchy::STANDARD;
        assert!(h.is_within(ShortcutContext::ListView, ShortcutContext::SelectedItem));
        assert!(h.is_within(ShortcutContext::DialogOpen, ShortcutContext::SearchDialog));
    }

    #[test]
    fn child_scope_is_not_within_parent() {
        let h = ContextHierarchy::STANDARD;
        assert!(!h.is_within(ShortcutContext::SelectedItem, ShortcutContext::ListView));
        assert!(!h.is_within(ShortcutContext::SearchDialog, ShortcutContext::DialogOpen));
    }

    #[test]
    fn unrelated_scopes_do_not_match() {
        let h = ContextHierarchy::STANDARD;
        assert!(!h.is_within(ShortcutContext::ListView, ShortcutContext::DialogOpen));
        assert!(!h.is_within(ShortcutContext::TextInput, ShortcutContext::Settings));
        assert!(!h.is_within(ShortcutContext::ListView, ShortcutContext::Universal));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let h = ContextHierarchy::STANDARD;
        let chain: Vec<_> = h.ancestors(ShortcutContext::SelectedItem).collect();
        assert_eq!(chain, vec![ShortcutContext::ListView]);
        assert_eq!(h.depth(ShortcutContext::Universal), 0);
        assert_eq!(h.depth(ShortcutContext::SearchDialog), 1);
    }

    #[test]
    fn deeper_custom_hierarchy_walks_every_level() {
        const DEEP: &[(ShortcutContext, ShortcutContext)] = &[
            (ShortcutContext::SearchDialog, ShortcutContext::DialogOpen),
            (ShortcutContext::DialogOpen, ShortcutContext::Settings),
        ];
        let h = ContextHierarchy::new(DEEP, ShortcutContext::Universal);
        assert!(h.is_within(ShortcutContext::Settings, ShortcutContext::SearchDialog));
        assert_eq!(h.depth(ShortcutContext::SearchDialog), 2);
    }

    #[test]
    fn cyclic_map_terminates() {
        const CYCLE: &[(ShortcutContext, ShortcutContext)] = &[
            (ShortcutContext::ListView, ShortcutContext::Settings),
            (ShortcutContext::Settings, ShortcutContext::ListView),
        ];
        let h = ContextHierarchy::new(CYCLE, ShortcutContext::Universal);
        assert!(!h.is_within(ShortcutContext::DialogOpen, ShortcutContext::ListView));
    }

    #[test]
    fn context_names_round_trip_through_parse() {
        assert_eq!(ShortcutContext::parse("list-view"), Some(ShortcutContext::ListView));
        assert_eq!(
            ShortcutContext::parse("text-input-scope"),
            Some(ShortcutContext::TextInput)
        );
        assert_eq!(ShortcutContext::parse("nowhere"), None);
    }

    #[test]
    fn serde_uses_kebab_case_names() {
        let json = serde_json::to_string(&ShortcutContext::DialogOpen).unwrap();
        assert_eq!(json, "\"dialog-open\"");
        let parsed: ShortcutContext = serde_json::from_str("\"text-input-scope\"").unwrap();
        assert_eq!(parsed, ShortcutContext::TextInput);
    }
}
