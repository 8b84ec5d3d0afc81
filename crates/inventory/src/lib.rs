//! Pantry inventory domain module.
//!
//! This crate holds the business rules for the pantry: items, the
//! case-insensitive duplicate merge, unit inference, and the flat-file
//! record format. It performs file IO only inside `save`/`load`.

pub mod format;
pub mod item;
pub mod pantry;
mod records;
pub mod units;

pub use format::{format_quantity, format_row};
pub use item::{ExpiryStatus, Item, EXPIRING_SOON_DAYS};
pub use pantry::{AddOutcome, ItemEdit, Pantry};
pub use units::UnitRegistry;
