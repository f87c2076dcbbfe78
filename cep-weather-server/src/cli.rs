use anyhow::Context;
use cep_weather_core::{Config, TemperatureService};
use clap::Parser;
use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cep-weather", version, about = "Current temperature for a Brazilian CEP")]
pub struct Cli {
    /// Env file loaded before reading configuration. A missing file is not an error.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,

    /// Listening port; overrides `PORT`.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        // Loaded before the subscriber so RUST_LOG may come from the env file.
        let env_file = dotenvy::from_path(&self.env_file);
        init_tracing();

        if let Err(err) = env_file {
            tracing::warn!(
                path = %self.env_file.display(),
                error = %err,
                "could not load env file, using process environment"
            );
        }

        let mut config = Config::from_env()?;
        if let Some(port) = self.port {
            config = config.with_port(port);
        }

        if !config.has_weather_api_key() {
            tracing::warn!("WEATHERAPI_KEY is not set; temperature lookups will fail");
        }

        let service = TemperatureService::from_config(&config)?;
        let app = cep_weather_core::router(service);

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;
        tracing::info!(%addr, "listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        tracing::info!("server stopped");
        Ok(())
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
