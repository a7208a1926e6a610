//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env (optional, fills unset variables)
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → ProviderConfig moved into the ProviderClient at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; credentials live for the process
//! - All fields have defaults to allow minimal configs
//! - Missing credentials fail validation, which is fatal at startup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_dotenv, load_from_env, ConfigError};
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProviderConfig;
