//! One-time passcode lifecycle
//!
//! This module provides:
//! - Code generation from a configurable alphabet using a CSPRNG
//! - Storage with expiry in an injected [`ExpiringStore`]
//! - Validation against the live code
//! - Resend throttling driven by the code's remaining TTL
//! - An in-memory store and manual clock for development and tests

mod config;
mod generator;
mod manager;
mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use config::{OtpConfig, DEFAULT_ALPHABET, DEFAULT_CODE_LENGTH, DEFAULT_TTL, MAX_TTL, RESEND_WINDOW};
pub use generator::{CodeGenerator, OsRandom};
pub use manager::OtpManager;
pub use memory::{InMemoryStore, ManualClock, SystemClock};
pub use traits::{Clock, ExpiringStore, RandomSource};
