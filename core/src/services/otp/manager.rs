//! OTP manager: issuance, validation, resend throttling and revocation

use std::sync::Arc;
use std::time::Duration;

use constant_time_eq::constant_time_eq;

use crate::domain::{OtpKey, OtpState};
use crate::errors::OtpResult;

use super::config::OtpConfig;
use super::generator::{CodeGenerator, OsRandom};
use super::traits::{ExpiringStore, RandomSource};

/// Issues and checks one-time passcodes keyed by subject id
///
/// The store is the only holder of OTP state; the manager keeps nothing
/// between calls. Checking [`can_resend_otp`](Self::can_resend_otp) and then
/// calling [`generate_and_store_otp`](Self::generate_and_store_otp) is not
/// atomic: two concurrent requests for the same subject may both pass the
/// check, and the later write wins.
pub struct OtpManager<S: ExpiringStore> {
    /// Backing store for codes and their expiry
    store: Arc<S>,
    /// Process-lifetime random source
    random: Arc<dyn RandomSource>,
    /// Manager configuration
    config: OtpConfig,
    generator: CodeGenerator,
}

impl<S: ExpiringStore> Clone for OtpManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            random: Arc::clone(&self.random),
            config: self.config.clone(),
            generator: self.generator.clone(),
        }
    }
}

impl<S: ExpiringStore> OtpManager<S> {
    /// Create a manager drawing codes from the OS CSPRNG
    ///
    /// # Errors
    ///
    /// * `OtpError::Config` - if `config` fails validation
    pub fn new(store: Arc<S>, config: OtpConfig) -> OtpResult<Self> {
        Self::with_random_source(store, Arc::new(OsRandom), config)
    }

    /// Create a manager with an explicit random source
    pub fn with_random_source(
        store: Arc<S>,
        random: Arc<dyn RandomSource>,
        config: OtpConfig,
    ) -> OtpResult<Self> {
        config.validate()?;
        let generator = CodeGenerator::from_config(&config);

        tracing::debug!(
            length = config.length,
            ttl_secs = config.ttl.as_secs(),
            consume_on_success = config.consume_on_success,
            "OTP manager configured"
        );

        Ok(Self {
            store,
            random,
            config,
            generator,
        })
    }

    pub fn config(&self) -> &OtpConfig {
        &self.config
    }

    /// Generate a new code for `subject_id` and store it, replacing any live one
    ///
    /// The returned code is not exposed anywhere else; delivering it to the
    /// subject is the caller's job.
    pub async fn generate_and_store_otp(&self, subject_id: i64) -> OtpResult<String> {
        let key = OtpKey::new(subject_id);
        let code = self.generator.generate(self.random.as_ref());

        self.store
            .set_with_expiry(&key.to_string(), &code, self.config.ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    subject_id,
                    error = %e,
                    event = "otp_storage_failed",
                    "Failed to store OTP"
                );
                e
            })?;

        tracing::info!(
            subject_id,
            ttl_secs = self.config.ttl.as_secs(),
            event = "otp_generated",
            "Generated new OTP"
        );

        Ok(code)
    }

    /// Check `candidate` against the live code for `subject_id`
    ///
    /// Exact, case-sensitive match. Returns `false` when no code is live.
    /// The code stays valid after a match unless `consume_on_success` is set.
    pub async fn is_otp_valid(&self, subject_id: i64, candidate: &str) -> OtpResult<bool> {
        let key = OtpKey::new(subject_id).to_string();

        let stored = match self.store.get(&key).await? {
            Some(code) => code,
            None => {
                tracing::debug!(
                    subject_id,
                    event = "otp_absent",
                    "No OTP found (expired, deleted or never issued)"
                );
                return Ok(false);
            }
        };

        let is_valid = constant_time_eq(stored.as_bytes(), candidate.as_bytes());

        if is_valid {
            tracing::info!(subject_id, event = "otp_verified_success", "OTP matched");
            if self.config.consume_on_success {
                self.store.delete(&key).await?;
                tracing::debug!(subject_id, event = "otp_consumed", "OTP consumed");
            }
        } else {
            tracing::warn!(subject_id, event = "otp_verification_failed", "OTP mismatch");
        }

        Ok(is_valid)
    }

    /// Current lifecycle state of the subject's OTP
    pub async fn otp_state(&self, subject_id: i64) -> OtpResult<OtpState> {
        let remaining = self.remaining_validity(subject_id).await?;
        Ok(OtpState::from_remaining_ttl(
            remaining,
            self.config.fresh_threshold(),
        ))
    }

    /// Whether a new OTP may be issued to `subject_id`
    ///
    /// Blocked only while the live code is fresh, i.e. its remaining TTL is
    /// above `ttl - 1 minute`. Allowed when no code is live or once the code
    /// has aged past that point, even though it has not expired yet.
    pub async fn can_resend_otp(&self, subject_id: i64) -> OtpResult<bool> {
        let state = self.otp_state(subject_id).await?;
        let allowed = state.allows_resend();

        if !allowed {
            tracing::warn!(
                subject_id,
                event = "otp_resend_blocked",
                "OTP resend requested while code is fresh"
            );
        }

        Ok(allowed)
    }

    /// Time until a resend becomes possible; zero if it already is
    pub async fn resend_available_in(&self, subject_id: i64) -> OtpResult<Duration> {
        let threshold = self.config.fresh_threshold();
        let wait = self
            .remaining_validity(subject_id)
            .await?
            .map(|remaining| remaining.saturating_sub(threshold))
            .unwrap_or(Duration::ZERO);
        Ok(wait)
    }

    /// Remaining lifetime of the live OTP, `None` if there is none
    pub async fn remaining_validity(&self, subject_id: i64) -> OtpResult<Option<Duration>> {
        let key = OtpKey::new(subject_id).to_string();
        Ok(self.store.remaining_ttl(&key).await?)
    }

    /// Remove the subject's OTP; a missing code is not an error
    pub async fn delete_otp(&self, subject_id: i64) -> OtpResult<()> {
        let key = OtpKey::new(subject_id).to_string();
        self.store.delete(&key).await?;
        tracing::info!(subject_id, event = "otp_deleted", "OTP deleted");
        Ok(())
    }
}
