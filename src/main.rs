mod config;
mod models;
mod services;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::merger::PlaylistMerger;
use crate::services::serializer::render_playlist;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iptv_merge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Starting iptv-merge v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Sources configured: {}", config.source_urls.len());

    let output_file = config.output_file.clone();

    // Run the merge pipeline; failed sources are skipped inside
    let merger = PlaylistMerger::new(config);
    let (records, stats) = merger.merge().await;

    // An empty result still produces a playlist with the header line
    let content = render_playlist(&records);
    tokio::fs::write(&output_file, content)
        .await
        .with_context(|| format!("Failed to write playlist to {}", output_file))?;

    tracing::info!(
        "Merge complete: {} channels written to {} ({})",
        stats.channels_kept,
        output_file,
        serde_json::to_string(&stats).unwrap_or_default()
    );

    Ok(())
}
