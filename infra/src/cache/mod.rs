//! Cache module for Redis-based storage
//!
//! This module provides the Redis client and the Redis-backed OTP store.

pub mod otp_store;
pub mod redis_client;


pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use otp_shared::config::CacheConfig;
