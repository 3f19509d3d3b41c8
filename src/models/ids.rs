//! Strongly-typed ID wrappers for line items and categories
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are opaque strings: freshly created ones
//! are random UUIDs, while IDs read from older saved files may be plain
//! numbers (millisecond timestamps or small counters). Both forms are kept
//! verbatim as text.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Wire forms an ID may take in a saved snapshot
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Integer(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Get the underlying opaque string
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether a user-supplied identifier is this exact ID,
            /// with or without the display prefix
            pub fn matches_exactly(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                !identifier.is_empty()
                    && (self.0 == identifier
                        || identifier.strip_prefix($display_prefix) == Some(self.0.as_str()))
            }

            /// Check whether a user-supplied identifier refers to this ID
            ///
            /// Accepts the full ID, the prefixed short form shown in listings,
            /// or an unprefixed prefix of at least 8 characters. Several IDs
            /// can match the same short form.
            pub fn matches(&self, identifier: &str) -> bool {
                let identifier = identifier.trim();
                let short = identifier.strip_prefix($display_prefix).unwrap_or(identifier);
                self.matches_exactly(identifier) || (short.len() >= 8 && self.0.starts_with(short))
            }

            /// Whether this is a generated UUID rather than a legacy number
            fn is_uuid(&self) -> bool {
                Uuid::parse_str(&self.0).is_ok()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_uuid() {
                    let short: String = self.0.chars().take(8).collect();
                    write!(f, "{}{}", $display_prefix, short)
                } else {
                    write!(f, "{}{}", $display_prefix, self.0)
                }
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Ok(Self(s.strip_prefix($display_prefix).unwrap_or(s).to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

define_id!(ItemId, "itm-");
define_id!(CategoryId, "cat-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_id_display() {
        let id = CategoryId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("cat-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_numeric_legacy_id() {
        let id: ItemId = serde_json::from_str("1763604728438").unwrap();
        assert_eq!(id.as_str(), "1763604728438");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1763604728438\"");
    }

    #[test]
    fn test_string_id_round_trip() {
        let id = ItemId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_matches_short_forms() {
        let id = CategoryId::new();
        let shown = id.to_string();
        assert!(id.matches(&shown));
        assert!(id.matches(&shown["cat-".len()..]));
        assert!(id.matches(id.as_str()));
        assert!(!id.matches(""));
        assert!(!id.matches("cat-zzzzzzzz"));
    }

    #[test]
    fn test_legacy_ids_display_in_full() {
        let first = ItemId::from("1763604728438");
        let second = ItemId::from("1763604761322");
        assert_eq!(first.to_string(), "itm-1763604728438");
        assert_ne!(first.to_string(), second.to_string());

        assert!(first.matches_exactly(&first.to_string()));
        assert!(!second.matches_exactly(&first.to_string()));

        // An 8-character prefix still reaches both
        assert!(first.matches("itm-17636047"));
        assert!(second.matches("itm-17636047"));
    }
}
