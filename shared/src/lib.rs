//! Shared utilities and common types for the OTP service
//!
//! This crate provides common functionality used across all workspace crates:
//! - Configuration types
//! - Tracing subscriber initialisation

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CacheConfig, Environment, LogFormat, LoggingConfig};
pub use logging::init_tracing;
