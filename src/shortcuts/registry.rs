//! Deterministic shortcut registry with Vec storage.
//!
//! Uses Vec for deterministic iteration (registration order) and HashMap
//! for O(1) lookup by action id. Entries are value snapshots: every
//! mutation replaces the stored metadata rather than editing it in place.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::{ContextHierarchy, ShortcutContext};
use super::defaults::default_shortcuts;
use super::types::Binding;

/// Abstract command identifier emitted when a binding matches.
pub type ActionId = String;

/// Category for organizing shortcuts in help listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShortcutCategory {
    General,
    Navigation,
    Messaging,
    Editing,
}

/// A shortcut definition with metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutMetadata {
    pub action: ActionId,
    pub binding: Binding,
    pub description: String,
    pub category: ShortcutCategory,
    pub context: ShortcutContext,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

fn default_enabled() -> bool {
    true
}

impl ShortcutMetadata {
    pub fn new(
        action: impl Into<ActionId>,
        binding: Binding,
        description: impl Into<String>,
        category: ShortcutCategory,
        context: ShortcutContext,
    ) -> Self {
        Self {
            action: action.into(),
            binding,
            description: description.into(),
            category,
            context,
            enabled: true,
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Missing priority counts as 0.
    pub fn effective_priority(&self) -> i32 {
        self.priority.unwrap_or(0)
    }
}

/// Shortcuts sharing one binding where at least two also share a context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutConflict {
    pub binding: Binding,
    pub conflicting_shortcuts: Vec<ShortcutMetadata>,
}

impl ShortcutConflict {
    pub fn involves(&self, action: &str) -> bool {
        self.conflicting_shortcuts.iter().any(|s| s.action == action)
    }
}

/// Authoritative in-memory store of shortcut metadata.
///
/// At most one entry per action id. Not internally synchronized; share it
/// across threads behind a lock (see [`crate::engine::SharedRegistry`]).
pub struct ShortcutRegistry {
    entries: Vec<ShortcutMetadata>,
    action_to_index: HashMap<ActionId, usize>,
    hierarchy: ContextHierarchy,
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortcutRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            action_to_index: HashMap::new(),
            hierarchy: ContextHierarchy::STANDARD,
        }
    }

    /// A registry populated with the default shortcut table.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.reset_to_defaults();
        registry
    }

    pub fn with_hierarchy(mut self, hierarchy: ContextHierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn hierarchy(&self) -> &ContextHierarchy {
        &self.hierarchy
    }

    /// Upsert by action id. An existing entry keeps its registration slot.
    pub fn register(&mut self, metadata: ShortcutMetadata) {
        debug!(
            action = %metadata.action,
            binding = %metadata.binding,
            context = %metadata.context,
            priority = metadata.effective_priority(),
            "Registering shortcut"
        );
        if let Some(&index) = self.action_to_index.get(&metadata.action) {
            self.entries[index] = metadata;
        } else {
            let index = self.entries.len();
            self.action_to_index.insert(metadata.action.clone(), index);
            self.entries.push(metadata);
        }
    }

    /// Returns true if an entry existed and was removed.
    pub fn unregister(&mut self, action: &str) -> bool {
        let Some(index) = self.action_to_index.remove(action) else {
            return false;
        };
        self.entries.remove(index);
        for slot in self.action_to_index.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        debug!(action = action, "Unregistered shortcut");
        true
    }

    pub fn get_by_action(&self, action: &str) -> Option<&ShortcutMetadata> {
        self.action_to_index
            .get(action)
            .and_then(|&i| self.entries.get(i))
    }

    pub fn get_by_category(&self, category: ShortcutCategory) -> Vec<&ShortcutMetadata> {
        self.entries
            .iter()
            .filter(|s| s.category == category)
            .collect()
    }

    /// Entries registered in `context`, plus entries in the universal context.
    pub fn get_by_context(&self, context: ShortcutContext) -> Vec<&ShortcutMetadata> {
        let universal = self.hierarchy.universal();
        self.entries
            .iter()
            .filter(|s| s.context == context || s.context == universal)
            .collect()
    }

    /// All entries in registration order.
    pub fn get_all(&self) -> &[ShortcutMetadata] {
        &self.entries
    }

    pub fn get_enabled(&self) -> Vec<&ShortcutMetadata> {
        self.entries.iter().filter(|s| s.enabled).collect()
    }

    /// Returns false if the action is unknown.
    pub fn set_enabled(&mut self, action: &str, enabled: bool) -> bool {
        let Some(&index) = self.action_to_index.get(action) else {
            return false;
        };
        let updated = ShortcutMetadata {
            enabled,
            ..self.entries[index].clone()
        };
        self.entries[index] = updated;
        debug!(action = action, enabled = enabled, "Shortcut enabled state changed");
        true
    }

    pub fn grouped_by_category(&self) -> BTreeMap<ShortcutCategory, Vec<&ShortcutMetadata>> {
        let mut groups: BTreeMap<ShortcutCategory, Vec<&ShortcutMetadata>> = BTreeMap::new();
        for shortcut in &self.entries {
            groups.entry(shortcut.category).or_default().push(shortcut);
        }
        groups
    }

    /// Find all binding conflicts in the registry.
    ///
    /// Entries are grouped by canonical binding regardless of context. A
    /// group of two or more is a conflict unless every member has a distinct
    /// context; a conflicting group is reported whole. Output follows the
    /// registration order of each group's first member.
    pub fn detect_conflicts(&self) -> Vec<ShortcutConflict> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<&ShortcutMetadata>> = HashMap::new();

        for shortcut in &self.entries {
            let key = shortcut.binding.canonical_key();
            if !groups.contains_key(&key) {
                order.push(key.clone());
            }
            groups.entry(key).or_default().push(shortcut);
        }

        let mut conflicts = Vec::new();
        for key in order {
            let Some(members) = groups.get(&key) else {
                continue;
            };
            if members.len() < 2 {
                continue;
            }
            let contexts: HashSet<ShortcutContext> = members.iter().map(|s| s.context).collect();
            if contexts.len() == members.len() {
                continue;
            }
            conflicts.push(ShortcutConflict {
                binding: members[0].binding.clone(),
                conflicting_shortcuts: members.iter().map(|s| (*s).clone()).collect(),
            });
        }

        if !conflicts.is_empty() {
            debug!(count = conflicts.len(), "Detected shortcut conflicts");
        }
        conflicts
    }

    /// Conflicts that involve `action`.
    pub fn conflicts_for(&self, action: &str) -> Vec<ShortcutConflict> {
        self.detect_conflicts()
            .into_iter()
            .filter(|c| c.involves(action))
            .collect()
    }

    /// Best enabled match for `binding` while `current` is the active context.
    ///
    /// Highest priority wins (missing = 0); ties go to the entry registered
    /// first.
    pub fn find_matching_shortcut(
        &self,
        binding: &Binding,
        current: ShortcutContext,
    ) -> Option<&ShortcutMetadata> {
        let mut candidates: Vec<&ShortcutMetadata> = self
            .entries
            .iter()
            .filter(|s| {
                s.enabled
                    && s.binding.matches_event(binding)
                    && self.hierarchy.is_within(s.context, current)
            })
            .collect();

        // Stable sort keeps registration order among equal priorities
        candidates.sort_by(|a, b| b.effective_priority().cmp(&a.effective_priority()));
        candidates.first().copied()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.action_to_index.clear();
        debug!("Cleared all shortcuts");
    }

    /// Replace the registry contents with the default table.
    pub fn reset_to_defaults(&mut self) {
        self.clear_all();
        for shortcut in default_shortcuts() {
            self.register(shortcut);
        }
        debug!(count = self.entries.len(), "Shortcut registry reset to defaults");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
