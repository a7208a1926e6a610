//! SuperQi provider integration.
//!
//! # Data Flow
//! ```text
//! ProviderClient operation (params)
//!     → signer.rs (canonical body + RSA256 signature)
//!     → request.rs (Client-Id, Request-Time, Nonce, Signature headers)
//!     → transport.rs (single POST with deadline)
//!     → types.rs (typed decode, pass-through of unknown fields)
//! ```
//!
//! # Security Constraints
//! - The private key is loaded once at startup and never logged
//! - The signed bytes are the transmitted bytes

pub mod client;
pub mod error;
pub mod request;
pub mod signer;
pub mod transport;
pub mod types;

pub use client::ProviderClient;
pub use error::{ProviderError, ProviderResult, TransportError};
pub use signer::Signer;
pub use transport::{HttpTransport, Transport};
pub use types::{
    CardListResponse, PayOutcome, PaymentRequest, PaymentResponse, TokenResponse,
    UserInfoResponse,
};
