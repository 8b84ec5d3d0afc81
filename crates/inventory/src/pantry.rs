//! The pantry collection: add-or-merge, edits, removal, search, save/load.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use pantry_core::{
    checked_quantity, parse_date, parse_quantity, Entity, ItemKey, PantryResult, ParseError,
};

use crate::item::Item;
use crate::records;
use crate::units::UnitRegistry;

/// Result of [`Pantry::add_or_merge`].
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// A new item was appended.
    Added(Item),
    /// The quantity was added to an existing item with the same name.
    Merged(Item),
    /// The unit is unknown. Nothing was stored; call
    /// [`Pantry::finalize_new_item`] once a unit has been supplied.
    UnitRequired(Item),
}

impl AddOutcome {
    pub fn item(&self) -> &Item {
        match self {
            AddOutcome::Added(item) | AddOutcome::Merged(item) | AddOutcome::UnitRequired(item) => {
                item
            }
        }
    }

    pub fn into_item(self) -> Item {
        match self {
            AddOutcome::Added(item) | AddOutcome::Merged(item) | AddOutcome::UnitRequired(item) => {
                item
            }
        }
    }

    pub fn requires_unit(&self) -> bool {
        matches!(self, AddOutcome::UnitRequired(_))
    }

    /// True when the pantry changed and should be saved.
    pub fn is_stored(&self) -> bool {
        !self.requires_unit()
    }
}

/// Partial update for [`Pantry::edit`]; `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemEdit {
    pub quantity: Option<f64>,
    pub expiration_date: Option<NaiveDate>,
}

impl ItemEdit {
    /// Parse form-style input where a blank string means "not supplied".
    pub fn parse(quantity: &str, exp_date: &str) -> Result<Self, ParseError> {
        let quantity = match quantity.trim() {
            "" => None,
            text => Some(parse_quantity(text)?),
        };
        let expiration_date = match exp_date.trim() {
            "" => None,
            text => Some(parse_date(text)?),
        };
        Ok(Self {
            quantity,
            expiration_date,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.quantity.is_none() && self.expiration_date.is_none()
    }
}

/// Ordered collection of pantry items with a case-insensitive name index.
///
/// Items keep insertion order for display. `index` maps each normalized name
/// to the position of its first item, so duplicate detection on add is a
/// single lookup. Loaded files may contain case-variant duplicates; only the
/// add path enforces one item per name.
#[derive(Debug, Clone)]
pub struct Pantry {
    items: Vec<Item>,
    index: HashMap<ItemKey, usize>,
    units: UnitRegistry,
}

impl Pantry {
    pub fn new(units: UnitRegistry) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            units,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn units(&self) -> &UnitRegistry {
        &self.units
    }

    /// First item whose name matches `name` case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.position(name).map(|i| &self.items[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.index.get(&ItemKey::new(name)).copied()
    }

    /// Add `quantity` of `name`, merging into an existing item when present.
    ///
    /// See [`AddOutcome`] for the three possible results.
    pub fn add_or_merge(
        &mut self,
        name: &str,
        quantity: f64,
        exp_date: &str,
        unit: Option<&str>,
    ) -> PantryResult<AddOutcome> {
        let expiration_date = parse_date(exp_date)?;
        self.add_or_merge_dated(name, quantity, expiration_date, unit)
    }

    /// [`Pantry::add_or_merge`] with an already-parsed date.
    pub fn add_or_merge_dated(
        &mut self,
        name: &str,
        quantity: f64,
        expiration_date: NaiveDate,
        unit: Option<&str>,
    ) -> PantryResult<AddOutcome> {
        if name.trim().is_empty() {
            return Err(ParseError::empty_field("name").into());
        }
        checked_quantity(quantity)?;

        if let Some(i) = self.position(name) {
            let item = &mut self.items[i];
            item.add_quantity(quantity)?;
            tracing::debug!(item = %item.name(), quantity = item.quantity(), "merged into existing item");
            return Ok(AddOutcome::Merged(item.clone()));
        }

        let explicit = unit.map(str::trim).filter(|u| !u.is_empty());
        let mut item = Item::with_date(name, quantity, expiration_date, explicit, &self.units);

        if let Some(unit) = explicit {
            item.set_unit(unit, &mut self.units)?;
        } else if !item.is_fully_specified() {
            tracing::debug!(item = %item.name(), "unit unknown; caller must supply one");
            return Ok(AddOutcome::UnitRequired(item));
        }

        self.push(item.clone());
        tracing::debug!(item = %item.name(), quantity = item.quantity(), "item added");
        Ok(AddOutcome::Added(item))
    }

    /// Second phase of an add that returned [`AddOutcome::UnitRequired`].
    ///
    /// Records `unit` in the registry so later adds of the same name resolve
    /// it. If an item with this name appeared in the meantime, the quantity is
    /// merged into it rather than creating a duplicate; the stored item's unit
    /// wins and the registry is left alone.
    pub fn finalize_new_item(
        &mut self,
        name: &str,
        quantity: f64,
        exp_date: &str,
        unit: &str,
    ) -> PantryResult<Item> {
        if name.trim().is_empty() {
            return Err(ParseError::empty_field("name").into());
        }
        checked_quantity(quantity)?;
        let mut item = Item::new(name, quantity, exp_date, Some(unit), &self.units)?;

        if let Some(i) = self.position(name) {
            let existing = &mut self.items[i];
            existing.add_quantity(quantity)?;
            tracing::debug!(item = %existing.name(), "finalized add merged into existing item");
            return Ok(existing.clone());
        }

        item.set_unit(unit, &mut self.units)?;

        self.push(item.clone());
        tracing::debug!(item = %item.name(), unit = ?item.unit(), "item added with new unit");
        Ok(item)
    }

    /// Apply `edit` to the first item named `name`.
    ///
    /// Returns the updated item, or `None` when nothing matched. A
    /// non-finite quantity fails before anything changes.
    pub fn edit(&mut self, name: &str, edit: ItemEdit) -> PantryResult<Option<&Item>> {
        let Some(i) = self.position(name) else {
            return Ok(None);
        };
        let item = &mut self.items[i];
        if let Some(quantity) = edit.quantity {
            item.set_quantity(quantity)?;
        }
        if let Some(date) = edit.expiration_date {
            item.set_expiration_date(date);
        }
        tracing::debug!(item = %item.name(), "item edited");
        Ok(Some(&self.items[i]))
    }

    /// Subtract `amount` from the first item named `name`.
    pub fn record_usage(&mut self, name: &str, amount: f64) -> PantryResult<Option<&Item>> {
        let Some(i) = self.position(name) else {
            return Ok(None);
        };
        self.items[i].apply_usage(amount)?;
        Ok(Some(&self.items[i]))
    }

    /// Remove every item whose name matches `name`; returns how many went.
    pub fn remove(&mut self, name: &str) -> usize {
        let key = ItemKey::new(name);
        let before = self.items.len();
        self.items.retain(|item| item.id() != key);
        let removed = before - self.items.len();
        if removed > 0 {
            self.rebuild_index();
            tracing::debug!(item = %key, removed, "items removed");
        }
        removed
    }

    /// Items whose name contains `term` (case-insensitive). An empty term
    /// matches everything.
    pub fn search(&self, term: &str) -> Vec<&Item> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.name().to_lowercase().contains(&needle))
            .collect()
    }

    /// Write all items to `path`, replacing its contents.
    pub fn save(&self, path: &Path) -> PantryResult<()> {
        records::write_pantry(
            path,
            self.items.iter().map(|item| {
                (
                    item.name(),
                    item.quantity(),
                    item.expiration_date(),
                    item.unit(),
                )
            }),
        )?;
        tracing::info!(path = %path.display(), items = self.items.len(), "pantry saved");
        Ok(())
    }

    /// Replace the current items with the contents of `path`.
    ///
    /// A missing file leaves the pantry empty. A malformed row fails the
    /// whole load and the current items are kept.
    pub fn load(&mut self, path: &Path) -> PantryResult<()> {
        let Some(rows) = records::read_pantry(path)? else {
            self.items.clear();
            self.index.clear();
            tracing::info!(path = %path.display(), "pantry file not found; starting empty");
            return Ok(());
        };

        self.items = rows
            .into_iter()
            .map(|row| {
                Item::with_date(
                    row.name,
                    row.quantity,
                    row.expiration_date,
                    row.unit.as_deref(),
                    &self.units,
                )
            })
            .collect();
        self.rebuild_index();

        tracing::info!(path = %path.display(), items = self.items.len(), "pantry loaded");
        Ok(())
    }

    /// Build a pantry around `units` and load it from `path`.
    pub fn open(path: &Path, units: UnitRegistry) -> PantryResult<Self> {
        let mut pantry = Self::new(units);
        pantry.load(path)?;
        Ok(pantry)
    }

    fn push(&mut self, item: Item) {
        self.index.entry(item.id()).or_insert(self.items.len());
        self.items.push(item);
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, item) in self.items.iter().enumerate() {
            self.index.entry(item.id()).or_insert(i);
        }
    }
}
