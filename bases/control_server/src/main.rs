use clap::Parser;
use color_eyre::Result;
use player_client::RemotePlayer;
use std::sync::Arc;

mod config;
mod error;
mod server;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zitherd=info,player_client=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_args(config::CliArgs::parse());

    // No session, no service: a player we cannot reach is fatal here
    let player = RemotePlayer::connect_with(config.client.clone()).await?;
    if config.is_best_effort() {
        tracing::warn!("best-effort mode: player errors are logged and reported as OK");
    }

    server::run(Arc::new(player), &config).await?;

    Ok(())
}
