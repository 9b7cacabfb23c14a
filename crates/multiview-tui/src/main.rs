mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod widgets;

use std::time::Duration;

use tokio::sync::mpsc;

use multiview_core::embed::EmbedRegistry;
use multiview_core::feed::{ChannelFeed, FeedEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = multiview_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("mview.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but quiet the
    // HTTP client internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("mview log: {}", log_path.display());

    tracing::info!("mview starting…");

    let config = multiview_core::config::Config::load().unwrap_or_default();
    let registry = EmbedRegistry::new()?;

    // ── Channel feed ─────────────────────────────────────────────────────────
    let (feed_tx, feed_rx) = mpsc::channel::<FeedEvent>(64);
    let feed = if config.feed.enabled {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Some(ChannelFeed::spawn(
            client,
            config.feed.channels_url(),
            Duration::from_secs(config.feed.poll_interval_secs.max(1)),
            feed_tx,
        ))
    } else {
        None
    };

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, registry, feed);
    app.run(feed_rx).await?;

    Ok(())
}
