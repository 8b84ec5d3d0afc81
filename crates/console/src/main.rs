use std::io;

use anyhow::Context;
use clap::Parser;

use pantry_console::Session;
use pantry_infra::{PantryService, StorageArgs};

/// Track pantry items and their expiration dates from the terminal.
#[derive(Debug, Parser)]
#[command(name = "pantry", version)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; keep them quiet unless RUST_LOG asks otherwise.
    pantry_observability::init("warn");
    let cli = Cli::parse();

    let service = PantryService::open(&cli.storage).with_context(|| {
        format!("failed to open pantry at {}", cli.storage.pantry_file.display())
    })?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(service, stdin.lock(), stdout.lock())
        .run()
        .context("console session failed")?;
    Ok(())
}
