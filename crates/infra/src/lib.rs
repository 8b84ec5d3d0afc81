//! Infrastructure layer: configuration and file-backed pantry service.

pub mod config;
pub mod service;

pub use config::StorageArgs;
pub use service::PantryService;
