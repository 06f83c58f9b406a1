//! Strongly-typed ID wrappers for all entity types
//!
//! Identifiers are opaque strings. Fresh ones are random UUIDs, but ids read
//! from storage or an imported file are kept verbatim (the default seed uses
//! short ids such as `"1-1"`). Newtypes keep a `SubcategoryId` from being
//! passed where a `CategoryId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Short form for terminal output (first 8 characters)
            pub fn short(&self) -> &str {
                match self.0.char_indices().nth(8) {
                    Some((idx, _)) => &self.0[..idx],
                    None => &self.0,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(CategoryId);
define_id!(SubcategoryId);
define_id!(ExpenseId);
define_id!(ShoppingListId);
define_id!(ShoppingItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_uuids() {
        let id = ExpenseId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_id_equality() {
        let id1 = CategoryId::new();
        let id2 = id1.clone();
        assert_eq!(id1, id2);

        let id3 = CategoryId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_opaque_ids_kept_verbatim() {
        let id = SubcategoryId::from("1-1");
        assert_eq!(id.to_string(), "1-1");
        assert_eq!(id.short(), "1-1");
    }

    #[test]
    fn test_short_form() {
        let id = ShoppingListId::from("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(id.short(), "550e8400");
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryId::from("2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"2\"");

        let deserialized: CategoryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
