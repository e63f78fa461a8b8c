//! Key binding descriptors and the pure matching rules over them.
//!
//! This module provides:
//! - `Binding` - a key plus modifier flags (ctrl, alt, shift, meta)
//! - `ShortcutParseError` - detailed parse errors for `Binding::parse`
//! - `bindings_equal` / `normalize_event_to_binding` / `display_label`
//!
//! Everything here is stateless and safe to call from any thread.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Punctuation that can only be typed with Shift held on a US layout.
///
/// For these keys the shift flag is ignored during equality, so a binding
/// declared as `Shift+?` also matches an event reported as a bare `?`.
/// The set is layout-specific and deliberately not locale-aware.
pub const SHIFTED_PUNCTUATION: &[char] = &[
    '?', '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_', '+', '{', '}', '|', ':', '"',
    '<', '>', '~',
];

/// Errors that can occur when parsing a binding string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutParseError {
    #[error("binding string is empty")]
    Empty,
    #[error("binding has no key, only modifiers")]
    MissingKey,
    #[error("unexpected token '{0}' in binding")]
    UnknownToken(String),
}

/// A key plus modifier-key combination.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub meta: bool,
    /// Secondary key name that triggers the same binding (e.g. `Enter` / `NumpadEnter`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_key: Option<String>,
}

impl Binding {
    /// A binding with no modifiers held.
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self {
            ctrl: true,
            ..Self::key(key)
        }
    }

    pub fn alt(key: impl Into<String>) -> Self {
        Self {
            alt: true,
            ..Self::key(key)
        }
    }

    pub fn shift(key: impl Into<String>) -> Self {
        Self {
            shift: true,
            ..Self::key(key)
        }
    }

    pub fn with_alternate_key(mut self, key: impl Into<String>) -> Self {
        self.alternate_key = Some(key.into());
        self
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.alt || self.shift || self.meta
    }

    /// Parse a descriptor such as `"Ctrl+k"`, `"Alt+ArrowUp"` or `"Shift+?"`.
    ///
    /// Tokens are separated by `+` or whitespace. A literal plus key is
    /// written as a trailing `+` (`"Shift++"`) or on its own (`"+"`).
    pub fn parse(s: &str) -> Result<Self, ShortcutParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ShortcutParseError::Empty);
        }
        if s == "+" {
            return Ok(Self::key("+"));
        }

        // A trailing "++" means the key itself is '+'
        let (body, plus_key) = match s.strip_suffix("++") {
            Some(rest) => (rest, true),
            None => (s, false),
        };

        let normalized = body.replace('+', " ");
        let mut binding = Self::default();
        let mut key_part: Option<&str> = None;

        for part in normalized.split_whitespace() {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "ctl" => binding.ctrl = true,
                "alt" | "opt" | "option" => binding.alt = true,
                "shift" => binding.shift = true,
                "meta" | "cmd" | "command" | "super" | "win" => binding.meta = true,
                _ => {
                    if key_part.is_some() || plus_key {
                        return Err(ShortcutParseError::UnknownToken(part.to_string()));
                    }
                    key_part = Some(part);
                }
            }
        }

        binding.key = match (key_part, plus_key) {
            (_, true) => "+".to_string(),
            (Some(key), false) => key.to_string(),
            (None, false) => return Err(ShortcutParseError::MissingKey),
        };
        Ok(binding)
    }

    /// Context-independent grouping key: held modifiers in fixed order plus
    /// the lower-cased key, e.g. `ctrl+shift+k`.
    pub fn canonical_key(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(5);
        if self.ctrl {
            parts.push("ctrl".to_string());
        }
        if self.alt {
            parts.push("alt".to_string());
        }
        if self.shift {
            parts.push("shift".to_string());
        }
        if self.meta {
            parts.push("meta".to_string());
        }
        parts.push(self.key.to_lowercase());
        parts.join("+")
    }

    /// Human-readable label, e.g. `Ctrl+k`, `Alt+Up`, `Esc`.
    pub fn display_label(&self) -> String {
        display_label(self)
    }

    /// Whether an incoming event binding triggers this stored binding,
    /// honouring `alternate_key`.
    pub fn matches_event(&self, event: &Binding) -> bool {
        if bindings_equal(self, event) {
            return true;
        }
        match &self.alternate_key {
            Some(alternate) => {
                let aliased = Binding {
                    key: alternate.clone(),
                    alternate_key: None,
                    ..self.clone()
                };
                bindings_equal(&aliased, event)
            }
            None => false,
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_label(self))
    }
}

/// True when `key` is a single character from [`SHIFTED_PUNCTUATION`].
pub fn is_shifted_punctuation(key: &str) -> bool {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => SHIFTED_PUNCTUATION.contains(&c),
        _ => false,
    }
}

/// Compare key and all four modifier flags.
///
/// The shift flag is ignored when the key is inherently shifted punctuation.
/// `alternate_key` does not take part in equality.
pub fn bindings_equal(a: &Binding, b: &Binding) -> bool {
    if a.key != b.key || a.ctrl != b.ctrl || a.alt != b.alt || a.meta != b.meta {
        return false;
    }
    a.shift == b.shift || is_shifted_punctuation(&a.key)
}

/// Build a binding from a raw key name and the held modifiers.
///
/// Single-character keys are lower-cased when any modifier is held so that
/// `Ctrl+K` and `Ctrl+k` events are equivalent. Named keys (`Escape`,
/// `ArrowUp`) pass through unchanged.
pub fn normalize_event_to_binding(
    raw_key: &str,
    ctrl: bool,
    alt: bool,
    shift: bool,
    meta: bool,
) -> Binding {
    let any_modifier = ctrl || alt || shift || meta;
    let key = if any_modifier && raw_key.chars().count() == 1 {
        raw_key.to_lowercase()
    } else {
        raw_key.to_string()
    };
    Binding {
        key,
        ctrl,
        alt,
        shift,
        meta,
        alternate_key: None,
    }
}

/// Join modifier names (`Ctrl, Alt, Shift, Meta`) and the key with `+`.
pub fn display_label(binding: &Binding) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(5);
    if binding.ctrl {
        parts.push("Ctrl".to_string());
    }
    if binding.alt {
        parts.push("Alt".to_string());
    }
    if binding.shift {
        parts.push("Shift".to_string());
    }
    if binding.meta {
        parts.push("Meta".to_string());
    }
    parts.push(key_display_text(&binding.key));
    parts.join("+")
}

fn key_display_text(key: &str) -> String {
    match key {
        " " => "Space".to_string(),
        "Escape" => "Esc".to_string(),
        k => match k.strip_prefix("Arrow") {
            Some(direction) if !direction.is_empty() => direction.to_string(),
            _ => k.to_string(),
        },
    }
}
