//! # HTTP Middleware
//!
//! - `rate_limit`: per-client fixed-window limits on selected routes
//! - `metrics`: request counters and latency for `/metrics`
//! - `tracing_layer`: request spans

pub mod metrics;
pub mod rate_limit;
pub mod tracing_layer;
