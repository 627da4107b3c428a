use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediaforge_core::{
    load_config, load_config_from_env, validate_config, BatchConverter, Config, Converter,
    FfmpegConverter, RetentionSweeper, StorageLayout,
};
use mediaforge_server::{api::create_router, state::AppState};

/// Environment variable naming the configuration file
const CONFIG_ENV: &str = "MEDIAFORGE_CONFIG";

/// Used when `MEDIAFORGE_CONFIG` is not set
const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load()?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Upload directory: {:?}", config.storage.upload_dir);
    info!("Converted directory: {:?}", config.storage.converted_dir);

    let storage = StorageLayout::new(&config.storage);
    storage
        .ensure_dirs()
        .await
        .context("Failed to create storage directories")?;

    // A missing encoder only fails individual conversions, so keep serving
    let converter = FfmpegConverter::new(config.converter.clone());
    match converter.validate().await {
        Ok(()) => info!("Using converter: {}", converter.name()),
        Err(e) => warn!("FFmpeg check failed, conversions will fail: {}", e),
    }

    let sweeper = config
        .retention
        .enabled
        .then(|| RetentionSweeper::new(storage.clone(), &config.retention));
    if let Some(ref sweeper) = sweeper {
        sweeper.start().await;
    } else {
        info!("Retention sweeper disabled in config");
    }

    let batch = BatchConverter::from_config(Arc::new(converter), &config);
    let state = Arc::new(AppState::new(config.clone(), batch));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");
    if let Some(sweeper) = sweeper {
        sweeper.stop().await;
    }

    Ok(())
}

/// Loads the configuration file named by `MEDIAFORGE_CONFIG`, falling back to
/// `config.toml` and then to defaults plus environment overrides.
fn load() -> Result<Config> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let path = PathBuf::from(path);
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        Err(_) => {
            let path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if path.exists() {
                info!("Loading configuration from {:?}", path);
                load_config(&path)
                    .with_context(|| format!("Failed to load config from {:?}", path))
            } else {
                info!("No config file found, using defaults and environment");
                load_config_from_env().context("Failed to load config from environment")
            }
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
