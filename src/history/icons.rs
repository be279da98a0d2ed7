//! Event kind → icon lookup
//!
//! An immutable map owned by the row formatter. Defaults cover the event
//! kinds the monitor emits; the `[icons]` config table can override or
//! extend them.

use std::collections::BTreeMap;

/// Key in an override table that replaces the fallback icon
pub const DEFAULT_KEY: &str = "default";
/// Key in an override table that replaces the failure icon
pub const FAILURE_KEY: &str = "failure";

const DEFAULT_ICON: &str = "❔";
const FAILURE_ICON: &str = "❌";

const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("OPEN", "📂"),
    ("CLOSE", "📁"),
    ("READ", "📖"),
    ("WRITE", "📝"),
    ("STAT", "🔍"),
    ("ACCESS", "👀"),
    ("CHDIR", "📍"),
    ("DELETE", "🗑"),
    ("UNLINK", "🗑"),
    ("RENAME", "🔀"),
    ("TRUNCATE", "✂"),
    ("ERROR", FAILURE_ICON),
];

/// Icons keyed by uppercase event kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconMap {
    by_kind: BTreeMap<String, String>,
    default_icon: String,
    failure_icon: String,
}

impl Default for IconMap {
    fn default() -> Self {
        Self {
            by_kind: BUILTIN_ICONS
                .iter()
                .map(|(kind, icon)| (kind.to_string(), icon.to_string()))
                .collect(),
            default_icon: DEFAULT_ICON.to_string(),
            failure_icon: FAILURE_ICON.to_string(),
        }
    }
}

impl IconMap {
    /// Start from nothing but the given fallback and failure icons
    pub fn empty(default_icon: impl Into<String>, failure_icon: impl Into<String>) -> Self {
        Self {
            by_kind: BTreeMap::new(),
            default_icon: default_icon.into(),
            failure_icon: failure_icon.into(),
        }
    }

    /// Builtin icons with config overrides applied
    ///
    /// Keys are event kinds (any case) plus the special `default` and
    /// `failure` entries.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        overrides
            .iter()
            .fold(Self::default(), |map, (key, icon)| map.with_icon(key, icon))
    }

    /// Register `icon` for `kind` (or the special `default`/`failure` keys)
    pub fn with_icon(mut self, kind: &str, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        if kind.eq_ignore_ascii_case(DEFAULT_KEY) {
            self.default_icon = icon;
        } else if kind.eq_ignore_ascii_case(FAILURE_KEY) {
            self.failure_icon = icon;
        } else {
            self.by_kind.insert(kind.to_uppercase(), icon);
        }
        self
    }

    /// Icon for an event; failures always get the failure icon
    pub fn icon_for(&self, kind_upper: &str, success: bool) -> &str {
        if !success {
            return &self.failure_icon;
        }
        self.by_kind
            .get(kind_upper)
            .map(String::as_str)
            .unwrap_or(self.default_icon.as_str())
    }

    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    pub fn failure_icon(&self) -> &str {
        &self.failure_icon
    }

    /// Registered (kind, icon) pairs in kind order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_kind.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_kind_uses_registered_icon() {
        let icons = IconMap::default();
        assert_eq!(icons.icon_for("READ", true), "📖");
    }

    #[test]
    fn test_unknown_kind_falls_back_to_default() {
        let icons = IconMap::default();
        assert_eq!(icons.icon_for("MMAP", true), DEFAULT_ICON);
    }

    #[test]
    fn test_failure_overrides_kind_icon() {
        let icons = IconMap::default();
        assert_eq!(icons.icon_for("READ", false), FAILURE_ICON);
        assert_eq!(icons.icon_for("MMAP", false), FAILURE_ICON);
    }

    #[test]
    fn test_overrides_are_case_insensitive() {
        let mut overrides = BTreeMap::new();
        overrides.insert("read".to_string(), "R".to_string());
        overrides.insert("Default".to_string(), "?".to_string());
        overrides.insert("FAILURE".to_string(), "!".to_string());

        let icons = IconMap::with_overrides(&overrides);
        assert_eq!(icons.icon_for("READ", true), "R");
        assert_eq!(icons.icon_for("NOPE", true), "?");
        assert_eq!(icons.icon_for("READ", false), "!");
        assert_eq!(icons.icon_for("WRITE", true), "📝");
    }

    #[test]
    fn test_injected_map_is_independent_of_builtins() {
        let icons = IconMap::empty("-", "x").with_icon("open", "o");
        assert_eq!(icons.icon_for("OPEN", true), "o");
        assert_eq!(icons.icon_for("READ", true), "-");
        assert_eq!(icons.iter().count(), 1);
    }
}
