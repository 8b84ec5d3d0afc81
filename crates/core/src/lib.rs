//! `pantry-core`: shared building blocks for the pantry tracker.
//!
//! This crate contains **pure domain** primitives (no file or network IO).

pub mod date;
pub mod entity;
pub mod error;
pub mod id;
pub mod quantity;

pub use date::{format_date, parse_date, today, DATE_FORMAT};
pub use entity::Entity;
pub use error::{PantryError, PantryResult, ParseError, StorageError};
pub use id::ItemKey;
pub use quantity::{checked_quantity, parse_quantity};
