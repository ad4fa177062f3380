//! OTP issuance and verification properties.
//!
//! Exercises the service end to end over the in-memory store, a fixed clock
//! and the capturing mock mailer.

#![allow(clippy::unwrap_used)]

use chrono::Duration;
use eventgate_auth::mocks::MockEmailProvider;
use eventgate_auth::{AuthError, InMemoryOtpStore, OtpConfig, OtpRegistry, OtpService};
use eventgate_testing::{FixedClock, test_clock};
use proptest::prelude::*;

type TestService = OtpService<InMemoryOtpStore, MockEmailProvider, FixedClock>;

fn service() -> (TestService, MockEmailProvider, FixedClock) {
    let clock = test_clock();
    let mailer = MockEmailProvider::new();
    let registry = OtpRegistry::new(InMemoryOtpStore::new(), clock.clone(), &OtpConfig::default());
    (OtpService::new(registry, mailer.clone()), mailer, clock)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn issued_code_verifies_exactly_once(
        local in "[a-z0-9]{1,16}",
        domain in "[a-z]{1,10}\\.[a-z]{2,4}",
    ) {
        let email = format!("{local}@{domain}");
        runtime().block_on(async {
            let (service, mailer, _clock) = service();

            service.request_otp(&email).await.unwrap();
            let code = mailer.last_code().unwrap();

            prop_assert_eq!(code.len(), 6);
            prop_assert!(service.verify_otp(&email, &code).await.is_ok());
            prop_assert_eq!(service.verify_otp(&email, &code).await, Err(AuthError::OtpNotFound));
            Ok(())
        })?;
    }

    #[test]
    fn wrong_code_never_consumes_entry(wrong in 100_000u32..=999_999) {
        runtime().block_on(async {
            let (service, mailer, _clock) = service();

            service.request_otp("guest@example.com").await.unwrap();
            let code = mailer.last_code().unwrap();
            prop_assume!(wrong.to_string() != code);

            prop_assert_eq!(
                service.verify_otp("guest@example.com", &wrong.to_string()).await,
                Err(AuthError::OtpMismatch)
            );
            prop_assert!(service.verify_otp("guest@example.com", &code).await.is_ok());
            Ok(())
        })?;
    }
}

#[tokio::test]
async fn test_code_expires_after_five_minutes() {
    let (service, mailer, clock) = service();
    service.request_otp("guest@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();

    clock.advance(Duration::minutes(5) + Duration::seconds(1));

    assert_eq!(
        service.verify_otp("guest@example.com", &code).await,
        Err(AuthError::OtpExpired)
    );
    assert_eq!(
        service.verify_otp("guest@example.com", &code).await,
        Err(AuthError::OtpNotFound)
    );
}

#[tokio::test]
async fn test_code_still_valid_just_before_expiry() {
    let (service, mailer, clock) = service();
    service.request_otp("guest@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();

    clock.advance(Duration::minutes(4) + Duration::seconds(59));

    service.verify_otp("guest@example.com", &code).await.unwrap();
}

#[tokio::test]
async fn test_reissue_replaces_previous_code() {
    let (service, mailer, _clock) = service();

    service.request_otp("guest@example.com").await.unwrap();
    let first = mailer.last_code().unwrap();
    service.request_otp("guest@example.com").await.unwrap();
    let second = mailer.last_code().unwrap();

    if first != second {
        assert_eq!(
            service.verify_otp("guest@example.com", &first).await,
            Err(AuthError::OtpMismatch)
        );
    }
    service.verify_otp("guest@example.com", &second).await.unwrap();
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let (service, _mailer, _clock) = service();

    assert_eq!(
        service.verify_otp("stranger@example.com", "123456").await,
        Err(AuthError::OtpNotFound)
    );
}

#[tokio::test]
async fn test_codes_are_independent_per_email() {
    let (service, mailer, _clock) = service();

    service.request_otp("a@example.com").await.unwrap();
    let code_a = mailer.last_code().unwrap();
    service.request_otp("b@example.com").await.unwrap();
    let code_b = mailer.last_code().unwrap();

    service.verify_otp("a@example.com", &code_a).await.unwrap();
    service.verify_otp("b@example.com", &code_b).await.unwrap();
}
