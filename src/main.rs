use anyhow::Result;
use emotion_relay::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from `RUST_LOG` or the configured level. Accepts
/// full directives such as `emotion_relay=debug,tower_http=info`.
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).map_err(|e| {
        anyhow::anyhow!(
            "Invalid log filter '{}': {}. Valid levels: error, warn, info, debug, trace",
            directives,
            e
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Read once; everything below receives it by value
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match log_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!(
        log_level = %log_level,
        model = %config.inference.model,
        endpoint = %config.inference.endpoint(),
        listen = %format!("{}:{}", config.server.host, config.server.port),
        timeout_secs = config.inference.timeout_secs,
        cors_origins = config.server.cors.allowed_origins.len(),
        "Starting emotion relay"
    );

    server::run(config).await?;

    Ok(())
}
