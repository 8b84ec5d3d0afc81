//! Natural keys used across the domain.

use serde::{Deserialize, Serialize};

/// Case-insensitive natural key of a pantry item.
///
/// Built from a display name by trimming surrounding whitespace and
/// lowercasing, so `"  Milk"` and `"MILK"` share one key. The same key is
/// used by the unit registry and by the pantry's duplicate index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
