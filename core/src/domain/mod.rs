//! Domain layer containing the OTP value objects.

pub mod value_objects;

pub use value_objects::*;
