//! Name → unit mapping used to auto-fill units for known ingredients.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pantry_core::{ItemKey, PantryResult, ParseError};

use crate::records;

/// Registry of known units, keyed by normalized item name.
///
/// A registry created with [`UnitRegistry::load`] or
/// [`UnitRegistry::with_path`] is backed by a file and rewrites it in full on
/// every [`UnitRegistry::set`]. A detached registry keeps assignments in
/// memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitRegistry {
    units: BTreeMap<ItemKey, String>,
    path: Option<PathBuf>,
}

impl UnitRegistry {
    /// Empty registry with no backing file.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Empty registry that persists to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            units: BTreeMap::new(),
            path: Some(path.into()),
        }
    }

    /// Load the registry from `path` and keep it as the backing file.
    ///
    /// A missing file yields an empty registry.
    pub fn load(path: impl Into<PathBuf>) -> PantryResult<Self> {
        let path = path.into();
        let mut units = BTreeMap::new();

        match records::read_units(&path)? {
            Some(pairs) => {
                for (name, unit) in pairs {
                    units.insert(ItemKey::new(&name), unit);
                }
                tracing::info!(path = %path.display(), units = units.len(), "unit registry loaded");
            }
            None => {
                tracing::info!(path = %path.display(), "unit registry file not found; starting empty");
            }
        }

        Ok(Self {
            units,
            path: Some(path),
        })
    }

    /// Write every mapping to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> PantryResult<()> {
        records::write_units(
            path,
            self.units.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        )?;
        tracing::debug!(path = %path.display(), units = self.units.len(), "unit registry saved");
        Ok(())
    }

    /// Save to the backing file, if any.
    pub fn persist(&self) -> PantryResult<()> {
        match &self.path {
            Some(path) => self.save(path),
            None => Ok(()),
        }
    }

    /// Look up the unit for `name` (case-insensitive, trimmed).
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.units.get(&ItemKey::new(name)).map(String::as_str)
    }

    /// Record `unit` for `name` and persist the whole registry immediately.
    ///
    /// If the write fails the previous mapping is restored.
    pub fn set(&mut self, name: &str, unit: &str) -> PantryResult<()> {
        let key = ItemKey::new(name);
        if key.is_empty() {
            return Err(ParseError::empty_field("name").into());
        }
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(ParseError::empty_field("unit").into());
        }

        let previous = self.units.insert(key.clone(), unit.to_string());
        if let Err(e) = self.persist() {
            match previous {
                Some(old) => self.units.insert(key, old),
                None => self.units.remove(&key),
            };
            return Err(e);
        }
        tracing::debug!(item = %key, unit, "unit assigned");
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
