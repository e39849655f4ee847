//! SafeRoute gateway server
//!
//! Entry point for the routing gateway.

use std::sync::Arc;

use infrastructure::{AppConfig, init_tracing};
use integration_directions::GoogleDirectionsClient;
use presentation_http::{AppState, create_router};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("saferoute_gateway=debug,presentation_http=debug,tower_http=info");

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = config.server.port,
        provider_key = config.directions.api_key.is_some(),
        "SafeRoute gateway v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let directions = GoogleDirectionsClient::new(&config.directions)
        .map_err(|e| anyhow::anyhow!("failed to initialize directions client: {e}"))?;
    let state = AppState::new(Arc::new(directions));

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(address = %config.server.bind_address(), "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

/// Resolve when the process receives Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) = signal::unix::signal(signal::unix::SignalKind::terminate()) {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
