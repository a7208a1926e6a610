//! SuperQi proxy gateway library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod superqi;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use superqi::ProviderClient;
