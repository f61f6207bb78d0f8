mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads configuration once at startup.
///
/// An explicit `CONFIG_PATH` must exist; the default `config.yaml` is optional.
/// Environment variables (including a local `.env`) are applied last.
pub async fn load() -> Result<Config> {
    dotenvy::dotenv().ok();

    let explicit = env::var("CONFIG_PATH").ok();
    let mut config = load_file_or_default(explicit.as_deref(), DEFAULT_CONFIG_PATH).await?;

    config.apply_env_overrides(|key| dotenvy::var(key).ok());

    Ok(config)
}

/// Reads `explicit` if given, else `fallback` if it exists, else defaults.
pub async fn load_file_or_default(explicit: Option<&str>, fallback: &str) -> Result<Config> {
    match explicit {
        Some(config_path) => load_from(config_path).await,
        None if Path::new(fallback).exists() => load_from(fallback).await,
        None => {
            debug!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path)
        .await
        .map_err(|e| Error::config(format!("cannot read {}: {}", config_path, e)))?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}
