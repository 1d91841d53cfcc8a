//! # Infrastructure Layer
//!
//! Concrete implementations of the capabilities the OTP core depends on.
//!
//! - **Cache**: Redis client and the Redis-backed OTP store
//! - **Bootstrap**: configuration loading from the environment and wiring of
//!   the OTP manager over Redis
//!
//! ## Features
//!
//! - `redis-cache`: Enable Redis caching support (default)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Cache module - Redis client and OTP store
pub mod cache;

/// Configuration module for infrastructure services
pub mod config {
    //! Configuration management for infrastructure services
    //!
    //! Handles:
    //! - Redis configuration
    //! - OTP policy (alphabet, length, TTL, single-use)
    //! - Environment-specific logging settings

    use std::time::Duration;

    use otp_core::services::otp::OtpConfig;
    use otp_shared::config::{AppConfig, CacheConfig, Environment, LoggingConfig};

    use crate::InfrastructureError;

    /// Infrastructure configuration settings
    #[derive(Debug, Clone)]
    pub struct InfrastructureConfig {
        /// Deployment environment
        pub environment: Environment,
        /// Redis cache configuration
        pub cache: CacheConfig,
        /// Logging configuration
        pub logging: LoggingConfig,
        /// OTP manager configuration
        pub otp: OtpConfig,
    }

    impl Default for InfrastructureConfig {
        fn default() -> Self {
            let app = AppConfig::default();
            Self {
                environment: app.environment,
                cache: app.cache,
                logging: app.logging,
                otp: OtpConfig::default(),
            }
        }
    }

    /// Build an OTP configuration from `OTP_*` variables, falling back to defaults
    ///
    /// `lookup` resolves a variable name to its value. Unparseable values are
    /// configuration errors rather than silently ignored.
    pub fn otp_config_from_vars<F>(lookup: F) -> Result<OtpConfig, InfrastructureError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = OtpConfig::default();

        if let Some(alphabet) = lookup("OTP_ALPHABET") {
            config.alphabet = alphabet;
        }
        if let Some(length) = lookup("OTP_LENGTH") {
            config.length = parse_var("OTP_LENGTH", &length)?;
        }
        if let Some(ttl) = lookup("OTP_TTL_SECONDS") {
            config.ttl = Duration::from_secs(parse_var("OTP_TTL_SECONDS", &ttl)?);
        }
        if let Some(consume) = lookup("OTP_CONSUME_ON_SUCCESS") {
            config.consume_on_success = parse_var("OTP_CONSUME_ON_SUCCESS", &consume)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, InfrastructureError> {
        value.trim().parse().map_err(|_| {
            InfrastructureError::Config(format!("{} has invalid value '{}'", name, value))
        })
    }
}

use std::sync::Arc;

use otp_core::services::otp::OtpManager;

use cache::{RedisClient, RedisOtpStore};

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Shared Redis client
    pub redis_client: RedisClient,
    /// OTP manager backed by Redis
    pub otp_manager: OtpManager<RedisOtpStore>,
}

impl InfrastructureServices {
    /// Wire the OTP manager over an existing Redis client
    pub fn new(
        redis_client: RedisClient,
        otp_config: otp_core::services::otp::OtpConfig,
    ) -> Result<Self, InfrastructureError> {
        let store = Arc::new(RedisOtpStore::new(redis_client.clone()));
        let otp_manager = OtpManager::new(store, otp_config)?;
        Ok(Self {
            redis_client,
            otp_manager,
        })
    }
}

/// Initialize infrastructure services
///
/// This function:
/// - Loads configuration from the environment (and `.env` files if present)
/// - Connects to Redis
/// - Builds the OTP manager over the Redis store
pub async fn initialize() -> Result<InfrastructureServices, InfrastructureError> {
    let config = load_config()?;
    initialize_with(config).await
}

/// Initialize infrastructure services from an already loaded configuration
pub async fn initialize_with(
    config: config::InfrastructureConfig,
) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let redis_client = RedisClient::new(config.cache).await?;
    let services = InfrastructureServices::new(redis_client, config.otp)?;

    tracing::info!("Infrastructure services initialized successfully");

    Ok(services)
}

/// Load infrastructure configuration from environment
///
/// The environment-specific file (e.g. `.env.production`) is read first, then
/// `.env`. Neither overrides variables that are already set.
pub fn load_config() -> Result<config::InfrastructureConfig, InfrastructureError> {
    let env_file = otp_shared::Environment::from_env().env_file();
    if dotenvy::from_filename(env_file).is_ok() {
        tracing::debug!(file = env_file, "Loaded environment file");
    }
    dotenvy::dotenv().ok(); // Load .env file if present

    let app = otp_shared::AppConfig::from_env();
    let otp = config::otp_config_from_vars(|name| std::env::var(name).ok())?;

    Ok(config::InfrastructureConfig {
        environment: app.environment,
        cache: app.cache,
        logging: app.logging,
        otp,
    })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error raised by the OTP domain layer
    #[error(transparent)]
    Otp(#[from] OtpError),
}
