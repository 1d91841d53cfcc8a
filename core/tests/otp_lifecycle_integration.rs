//! Integration tests for the OTP lifecycle through the public API

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use otp_core::services::otp::{InMemoryStore, ManualClock, OtpConfig, OtpManager};
    use otp_core::OtpState;

    fn setup() -> (OtpManager<InMemoryStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let store = Arc::new(InMemoryStore::with_clock(clock.clone()));
        let manager = OtpManager::new(store, OtpConfig::default()).unwrap();
        (manager, clock)
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (manager, clock) = setup();

        // Absent
        assert_eq!(manager.otp_state(42).await.unwrap(), OtpState::Absent);
        assert!(manager.can_resend_otp(42).await.unwrap());

        // Fresh
        let code = manager.generate_and_store_otp(42).await.unwrap();
        assert_eq!(manager.otp_state(42).await.unwrap(), OtpState::Fresh);
        assert!(!manager.can_resend_otp(42).await.unwrap());
        assert!(manager.is_otp_valid(42, &code).await.unwrap());

        // Stale
        clock.advance(Duration::from_secs(4 * 60 + 1));
        assert_eq!(manager.otp_state(42).await.unwrap(), OtpState::Stale);
        assert!(manager.can_resend_otp(42).await.unwrap());
        assert!(manager.is_otp_valid(42, &code).await.unwrap());

        // Expired
        clock.advance(Duration::from_secs(60));
        assert_eq!(manager.otp_state(42).await.unwrap(), OtpState::Absent);
        assert!(!manager.is_otp_valid(42, &code).await.unwrap());
        assert!(manager.can_resend_otp(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_resend_flow_replaces_code() {
        let (manager, clock) = setup();

        let first = manager.generate_and_store_otp(7).await.unwrap();
        clock.advance(Duration::from_secs(90));

        assert!(manager.can_resend_otp(7).await.unwrap());
        let second = manager.generate_and_store_otp(7).await.unwrap();

        assert!(manager.is_otp_valid(7, &second).await.unwrap());
        if first != second {
            assert!(!manager.is_otp_valid(7, &first).await.unwrap());
        }
        assert!(!manager.can_resend_otp(7).await.unwrap());
        assert_eq!(
            manager.resend_available_in(7).await.unwrap(),
            Duration::from_secs(60)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_resend_last_write_wins() {
        let (manager, _clock) = setup();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move {
                    if manager.can_resend_otp(99).await.unwrap() {
                        Some(manager.generate_and_store_otp(99).await.unwrap())
                    } else {
                        None
                    }
                })
            })
            .collect();

        let mut issued = Vec::new();
        for handle in handles {
            if let Some(code) = handle.await.unwrap() {
                issued.push(code);
            }
        }

        // At least one request got through; exactly one code is live afterwards
        assert!(!issued.is_empty());
        issued.sort();
        issued.dedup();
        let mut valid = 0;
        for code in &issued {
            if manager.is_otp_valid(99, code).await.unwrap() {
                valid += 1;
            }
        }
        assert_eq!(valid, 1);
        assert_eq!(manager.otp_state(99).await.unwrap(), OtpState::Fresh);
    }
}
