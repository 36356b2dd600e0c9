use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use trip_planner_config::{load_settings, Settings};
use trip_planner_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("TRIP_PLANNER_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            // Tracing is not up yet.
            eprintln!("config load failed ({error}), using defaults");
            Settings::default()
        }
    };

    init_tracing(&settings);
    tracing::info!(
        environment = ?settings.environment,
        llm_enabled = settings.llm.enabled,
        "starting trip planner server"
    );

    let addr = SocketAddr::new(
        settings
            .server
            .host
            .parse()
            .with_context(|| format!("invalid server.host {:?}", settings.server.host))?,
        settings.server.port,
    );

    let state = AppState::new(settings);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down cleanly");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trip_planner=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if settings.environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => tracing::error!(%error, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
