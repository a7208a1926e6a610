//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_BASE_URL: &str = "SUPERQI_BASE_URL";
pub const ENV_CLIENT_ID: &str = "SUPERQI_CLIENT_ID";
pub const ENV_PRIVATE_KEY: &str = "SUPERQI_PRIVATE_KEY";
pub const ENV_PRIVATE_KEY_PATH: &str = "SUPERQI_PRIVATE_KEY_PATH";
pub const ENV_KEY_VERSION: &str = "SUPERQI_KEY_VERSION";
pub const ENV_TIMEOUT_MS: &str = "SUPERQI_TIMEOUT_MS";
pub const ENV_PORT: &str = "PORT";

/// Default dotenv file, relative to the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to load {path}: {reason}")]
    Dotenv { path: String, reason: String },

    #[error("Invalid value for {var}: {reason}")]
    Env { var: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load `KEY=value` lines from a dotenv file into the process environment.
///
/// Variables already present in the environment keep their value. Returns
/// `false` when the file does not exist.
pub fn load_dotenv(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::Dotenv {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Load a TOML file, apply environment overrides, and validate.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build configuration from defaults and environment only.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_BASE_URL) {
        config.provider.base_url = v;
    }
    if let Some(v) = get(ENV_CLIENT_ID) {
        config.provider.client_id = v;
    }
    if let Some(v) = get(ENV_PRIVATE_KEY) {
        config.provider.private_key = Some(v);
    }
    if let Some(v) = get(ENV_PRIVATE_KEY_PATH) {
        config.provider.private_key_path = Some(v);
    }
    if let Some(v) = get(ENV_KEY_VERSION) {
        config.provider.key_version = parse_env(ENV_KEY_VERSION, &v)?;
    }
    if let Some(v) = get(ENV_TIMEOUT_MS) {
        config.provider.request_timeout_ms = parse_env(ENV_TIMEOUT_MS, &v)?;
    }
    if let Some(v) = get(ENV_PORT) {
        let port: u16 = parse_env(ENV_PORT, &v)?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    Ok(())
}

fn parse_env<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        reason: e.to_string(),
    })
}
