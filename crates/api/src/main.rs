use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

use pantry_infra::{PantryService, StorageArgs};

/// Serve the pantry over HTTP.
#[derive(Debug, Parser)]
#[command(name = "pantry-web", version)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,

    /// Address to listen on.
    #[arg(long, env = "PANTRY_BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pantry_observability::init("info");
    let cli = Cli::parse();

    let service = PantryService::open(&cli.storage).with_context(|| {
        format!("failed to open pantry at {}", cli.storage.pantry_file.display())
    })?;
    let app = pantry_api::app::build_app(service);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
