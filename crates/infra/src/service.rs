//! File-backed pantry service shared by the console and web front ends.
//!
//! Every mutating call runs the pantry operation and then rewrites the pantry
//! file, so callers never have to remember to save. Unit assignments are
//! persisted by the unit registry itself.

use std::path::{Path, PathBuf};

use pantry_core::PantryResult;
use pantry_inventory::{AddOutcome, Item, ItemEdit, Pantry, UnitRegistry};

use crate::config::StorageArgs;

#[derive(Debug)]
pub struct PantryService {
    pantry: Pantry,
    pantry_file: PathBuf,
}

impl PantryService {
    /// Load the unit registry, then the pantry, from the configured files.
    pub fn open(storage: &StorageArgs) -> PantryResult<Self> {
        let units = UnitRegistry::load(&storage.units_file)?;
        let pantry = Pantry::open(&storage.pantry_file, units)?;
        tracing::info!(
            pantry_file = %storage.pantry_file.display(),
            units_file = %storage.units_file.display(),
            items = pantry.len(),
            known_units = pantry.units().len(),
            "pantry service ready"
        );
        Ok(Self {
            pantry,
            pantry_file: storage.pantry_file.clone(),
        })
    }

    pub fn pantry(&self) -> &Pantry {
        &self.pantry
    }

    pub fn pantry_file(&self) -> &Path {
        &self.pantry_file
    }

    pub fn items(&self) -> &[Item] {
        self.pantry.items()
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.pantry.get(name)
    }

    pub fn search(&self, term: &str) -> Vec<&Item> {
        self.pantry.search(term)
    }

    /// First phase of an add. Saves unless a unit is still required.
    pub fn add_or_merge(
        &mut self,
        name: &str,
        quantity: f64,
        exp_date: &str,
        unit: Option<&str>,
    ) -> PantryResult<AddOutcome> {
        let outcome = self.pantry.add_or_merge(name, quantity, exp_date, unit)?;
        if outcome.is_stored() {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Add more of an item that is already stocked, keeping its date.
    ///
    /// Returns `None` when no item with that name exists.
    pub fn restock(&mut self, name: &str, quantity: f64) -> PantryResult<Option<Item>> {
        let Some(date) = self.pantry.get(name).map(Item::expiration_date) else {
            return Ok(None);
        };
        let outcome = self.pantry.add_or_merge_dated(name, quantity, date, None)?;
        self.save()?;
        Ok(Some(outcome.into_item()))
    }

    /// Second phase of an add, after the caller supplied a unit.
    pub fn finalize_new_item(
        &mut self,
        name: &str,
        quantity: f64,
        exp_date: &str,
        unit: &str,
    ) -> PantryResult<Item> {
        let item = self
            .pantry
            .finalize_new_item(name, quantity, exp_date, unit)?;
        self.save()?;
        Ok(item)
    }

    pub fn edit(&mut self, name: &str, edit: ItemEdit) -> PantryResult<Option<Item>> {
        let updated = self.pantry.edit(name, edit)?.cloned();
        if updated.is_some() {
            self.save()?;
        }
        Ok(updated)
    }

    pub fn record_usage(&mut self, name: &str, amount: f64) -> PantryResult<Option<Item>> {
        let updated = self.pantry.record_usage(name, amount)?.cloned();
        if updated.is_some() {
            self.save()?;
        }
        Ok(updated)
    }

    pub fn remove(&mut self, name: &str) -> PantryResult<usize> {
        let removed = self.pantry.remove(name);
        self.save()?;
        Ok(removed)
    }

    pub fn save(&self) -> PantryResult<()> {
        self.pantry.save(&self.pantry_file)
    }
}
