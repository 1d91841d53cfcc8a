//! # OTP Core
//!
//! Domain layer of the OTP service: the OTP manager and its lifecycle
//! state machine, the store and randomness capabilities it depends on,
//! and the error types shared by the workspace.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
