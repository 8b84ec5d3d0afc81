//! Configuration loading and representation.
//!
//! Every setting is a CLI flag with an environment variable fallback, so the
//! same binaries run unchanged from a shell or a service manager.

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_PANTRY_FILE: &str = "pantry.csv";
pub const DEFAULT_UNITS_FILE: &str = "units.csv";

/// Locations of the two backing files.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct StorageArgs {
    /// Pantry inventory file (CSV with header).
    #[arg(long, env = "PANTRY_FILE", default_value = DEFAULT_PANTRY_FILE)]
    pub pantry_file: PathBuf,

    /// Known item units (CSV, name,unit).
    #[arg(long, env = "PANTRY_UNITS_FILE", default_value = DEFAULT_UNITS_FILE)]
    pub units_file: PathBuf,
}

impl StorageArgs {
    pub fn new(pantry_file: impl Into<PathBuf>, units_file: impl Into<PathBuf>) -> Self {
        Self {
            pantry_file: pantry_file.into(),
            units_file: units_file.into(),
        }
    }

    /// Both files inside `dir`, using the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(dir.join(DEFAULT_PANTRY_FILE), dir.join(DEFAULT_UNITS_FILE))
    }
}

impl Default for StorageArgs {
    fn default() -> Self {
        Self::new(DEFAULT_PANTRY_FILE, DEFAULT_UNITS_FILE)
    }
}
