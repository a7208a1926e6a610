//! Rust client for the SuperQi proxy gateway.

pub mod client;

pub use client::{GatewayClient, GatewayReply, PayRequest};
