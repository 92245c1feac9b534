//! Buying-committee engine: signal scoring, role classification,
//! quota-bounded selection, and selection validation, plus the Apollo CSV
//! import adapter and the HTTP surface the API service mounts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
