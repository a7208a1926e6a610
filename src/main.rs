//! SuperQi proxy gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌────────────────────────────────────────────────┐
//!                          │                SUPERQI PROXY                    │
//!     Client Request       │  ┌──────────┐    ┌───────────┐                 │
//!     ─────────────────────┼─▶│  http    │───▶│ handlers  │                 │
//!                          │  │ server   │    │ + checks  │                 │
//!                          │  └──────────┘    └─────┬─────┘                 │
//!                          │                        ▼                        │
//!                          │                 ┌─────────────┐                │
//!                          │                 │  superqi    │                │
//!                          │                 │  client     │                │
//!                          │                 └─────┬───────┘                │
//!                          │        signer ◀───────┤                        │
//!                          │        request ◀──────┤                        │
//!                          │                       ▼                        │
//!     Client Response      │                 ┌─────────────┐                │    SuperQi
//!     ◀────────────────────┼─────────────────│  transport  │◀───────────────┼──── open API
//!                          │                 └─────────────┘                │
//!                          │  config · observability · lifecycle            │
//!                          └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use superqi_proxy::config::loader::DOTENV_FILE;
use superqi_proxy::config::{load_config, load_dotenv, load_from_env, ObservabilityConfig};
use superqi_proxy::lifecycle::startup;
use superqi_proxy::observability::init_logging;

#[derive(Parser)]
#[command(name = "superqi-proxy")]
#[command(about = "REST gateway for the SuperQi open API", long_about = None)]
struct Args {
    /// Path to a TOML config file. Without it, defaults plus environment are used.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dotenv file loaded before the environment is read. Missing is fine.
    #[arg(long, default_value = DOTENV_FILE)]
    env_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let loaded = load_dotenv(&args.env_file).and_then(|found| {
        let config = match &args.config {
            Some(path) => load_config(path),
            None => load_from_env(),
        }?;
        Ok((config, found))
    });

    let config = match loaded {
        Ok((config, dotenv_found)) => {
            init_logging(&config.observability);
            if dotenv_found {
                tracing::info!(path = %args.env_file.display(), "Loaded environment file");
            }
            config
        }
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        provider = %config.provider.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "superqi-proxy starting"
    );

    startup::run(config).await?;
    Ok(())
}
