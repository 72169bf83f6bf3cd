//! Keepsake server binary.

use tracing_subscriber::EnvFilter;

use keepsake_server::app::SharedState;
use keepsake_server::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Keepsake server");

    let (db, config, dir) = keepsake_server::init_foundation()?;
    let state = SharedState::new(db, config, dir);

    server::start_server(state).await
}
