//! Outbound data fetching with timeouts.
//!
//! This crate provides:
//! - `FetchClient` - HTTP GET + JSON decode with connect/total timeouts
//! - `FetchPolicy` / `TimeoutConfig` - per-client timeout settings
//!
//! Requests are never retried automatically; a failed fetch is reported
//! once and the caller decides whether to try again.

mod client;
mod timeout;

pub use client::*;
pub use timeout::*;
