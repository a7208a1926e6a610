//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway handlers and the provider client produce:
//!     → logging.rs (structured log events, request id in every span)
//!     → metrics.rs (counters and histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
