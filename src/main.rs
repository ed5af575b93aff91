//! Grid Splitter - slices uploaded images into a 3x3 puzzle grid.
//!
//! This binary starts the HTTP server and configures all components.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grid_splitter::{
    config::Config,
    grid::GridPartitioner,
    server::{create_router, AppState, RouterConfig},
    storage::ArtifactStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Static root: {}", config.static_root.display());
    info!("  JPEG quality: {}", config.jpeg_quality);
    info!("  Max upload: {} MB", config.max_upload_mb);
    if let Some(ref origins) = config.cors_origins {
        info!("  CORS origins: {}", origins.join(", "));
    } else {
        info!("  CORS origins: any");
    }

    // Prepare artifact directories before accepting uploads
    let store = ArtifactStore::new(&config.static_root);
    if let Err(e) = store.bootstrap().await {
        error!("Failed to prepare artifact directories: {}", e);
        return ExitCode::FAILURE;
    }

    let state = AppState::new(GridPartitioner::with_quality(config.jpeg_quality), store);
    let router = create_router(state, build_router_config(&config));

    let addr = config.bind_address();

    info!("");
    info!("Server listening on: http://{}", addr);
    info!("");
    info!("  Split an image:");
    info!("    curl -F file=@photo.jpg http://{}/upload", addr);
    info!("");
    info!("  Health check:");
    info!("    curl http://{}/health", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "grid_splitter=debug,tower_http=debug"
    } else {
        "grid_splitter=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config =
        RouterConfig::new().with_max_upload_bytes(config.max_upload_bytes());

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}
