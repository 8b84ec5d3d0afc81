//! Interactive text front end for the pantry.

pub mod prompt;
pub mod session;

pub use session::Session;
