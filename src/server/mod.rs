pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    analysis::Analyzer,
    config::{Config, CorsConfig},
    inference::HuggingFaceClient,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::post,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

pub use handlers::AppState;

pub async fn run(config: Config) -> Result<()> {
    if config.inference.api_key.is_empty() {
        warn!("No inference API key configured; upstream calls will likely be rejected");
    }

    let client = HuggingFaceClient::new(&config.inference)?;
    info!("Forwarding requests to {}", client.endpoint());

    let app_state = AppState {
        analyzer: Arc::new(Analyzer::new(Arc::new(client))),
    };

    let app = router(app_state, &config.server.cors)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    let app = Router::new()
        .route("/analyze", post(handlers::analyze))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http());

    Ok(match cors_layer(cors)? {
        Some(layer) => app.layer(layer),
        None => app,
    })
}

fn cors_layer(cors: &CorsConfig) -> Result<Option<CorsLayer>> {
    if cors.allowed_origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if cors.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = cors
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|_| Error::config(format!("invalid CORS origin: {}", origin)))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
