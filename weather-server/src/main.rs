//! Binary crate for the weather proxy server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging and process lifecycle
//! - HTTP routing and response translation

use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{Config, provider::provider_from_config};

mod api;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather proxy server")]
struct Args {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address override, e.g. "0.0.0.0:5000".
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let id = config.provider_id()?;
    let provider = provider_from_config(id, &config)?;

    let state = Arc::new(api::AppState {
        provider,
        default_city: config.default_city(id),
    });

    let listen = args.listen.unwrap_or_else(|| config.listen_addr());
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind listen address: {listen}"))?;

    tracing::info!("listening on http://{listen} ({id} provider)");

    axum::serve(listener, api::router(state)).await.context("Server error")?;

    Ok(())
}
