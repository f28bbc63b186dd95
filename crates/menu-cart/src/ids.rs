//! Newtype identifiers.
//!
//! A menu item id and a cart line key are both strings, and for a line
//! without a note they are even equal. Keeping them as separate types stops
//! a caller from passing an item id where a line key is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default separator between item id and note in a line key.
pub const DEFAULT_KEY_SEPARATOR: &str = "::";

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a menu item across the page catalog.
    ItemId
);
define_id!(
    /// Identifies one cart line: item id plus optional note.
    LineKey
);

impl LineKey {
    /// Derive the key for an item and an already-normalised note.
    ///
    /// With no note the key equals the item id.
    pub fn derive(item_id: &ItemId, note: Option<&str>, separator: &str) -> Self {
        match note {
            Some(note) => Self(format!("{}{}{}", item_id.as_str(), separator, note)),
            None => Self(item_id.as_str().to_string()),
        }
    }
}

/// Normalise free-text note input: trimmed, with blank meaning "no note".
pub fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_without_note_equals_item_id() {
        let item = ItemId::new("burger");
        let key = LineKey::derive(&item, None, DEFAULT_KEY_SEPARATOR);
        assert_eq!(key.as_str(), "burger");
    }

    #[test]
    fn test_key_with_note() {
        let item = ItemId::new("burger");
        let key = LineKey::derive(&item, Some("no onions"), DEFAULT_KEY_SEPARATOR);
        assert_eq!(key.as_str(), "burger::no onions");

        let other = LineKey::derive(&item, Some("extra cheese"), DEFAULT_KEY_SEPARATOR);
        assert_ne!(key, other);
    }

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note(None), None);
        assert_eq!(normalize_note(Some("")), None);
        assert_eq!(normalize_note(Some("   ")), None);
        assert_eq!(normalize_note(Some("  well done ")), Some("well done".to_string()));
    }

    #[test]
    fn test_id_from_str() {
        let id: ItemId = "salad".into();
        assert_eq!(id.as_str(), "salad");
        assert_eq!(format!("{}", id), "salad");
    }
}
