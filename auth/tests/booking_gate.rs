//! Booking gate driven by the in-process OTP service.

#![allow(clippy::unwrap_used)]

use eventgate_auth::mocks::MockEmailProvider;
use eventgate_auth::{
    AuthError, BookingGate, BookingState, InMemoryOtpStore, OtpConfig, OtpRegistry, OtpService,
};
use eventgate_testing::{FixedClock, sample_event, test_clock};
use std::sync::Arc;

type TestService = OtpService<InMemoryOtpStore, MockEmailProvider, FixedClock>;

fn service(mailer: MockEmailProvider) -> Arc<TestService> {
    let registry = OtpRegistry::new(InMemoryOtpStore::new(), test_clock(), &OtpConfig::default());
    Arc::new(OtpService::new(registry, mailer))
}

#[tokio::test]
async fn test_verified_user_gets_booking_url() {
    let mailer = MockEmailProvider::new();
    let event = sample_event("42");
    let mut gate = BookingGate::new(service(mailer.clone()), &event);

    gate.submit_email("guest@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();
    let url = gate.submit_code(&code).await.unwrap();

    assert_eq!(url, event.event_url);
    assert_eq!(
        gate.state(),
        &BookingState::Released {
            booking_url: event.event_url.clone()
        }
    );
}

#[tokio::test]
async fn test_gates_share_one_service() {
    let mailer = MockEmailProvider::new();
    let service = service(mailer.clone());
    let mut first = BookingGate::new(Arc::clone(&service), &sample_event("1"));
    let mut second = BookingGate::new(Arc::clone(&service), &sample_event("2"));

    first.submit_email("one@example.com").await.unwrap();
    let code_one = mailer.last_code().unwrap();
    second.submit_email("two@example.com").await.unwrap();
    let code_two = mailer.last_code().unwrap();

    assert!(second.submit_code(&code_two).await.is_ok());
    assert!(first.submit_code(&code_one).await.is_ok());
}

#[tokio::test]
async fn test_invalid_email_keeps_gate_at_start() {
    let mut gate = BookingGate::new(service(MockEmailProvider::new()), &sample_event("1"));

    let err = gate.submit_email("not-an-email").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidEmail(_)));
    assert_eq!(gate.state(), &BookingState::AwaitingEmail);
}

#[tokio::test]
async fn test_delivery_failure_reported_to_user() {
    let mut gate = BookingGate::new(service(MockEmailProvider::failing()), &sample_event("1"));

    let err = gate.submit_email("guest@example.com").await.unwrap_err();

    assert!(matches!(err, AuthError::EmailDeliveryFailed(_)));
    assert!(!err.is_user_error());
}

#[tokio::test]
async fn test_change_email_then_verify_new_address() {
    let mailer = MockEmailProvider::new();
    let mut gate = BookingGate::new(service(mailer.clone()), &sample_event("1"));

    gate.submit_email("typo@example.com").await.unwrap();
    gate.change_email().unwrap();
    gate.submit_email("right@example.com").await.unwrap();
    let code = mailer.last_code().unwrap();

    assert_eq!(mailer.sent().last().unwrap().to, "right@example.com");
    assert!(gate.submit_code(&code).await.is_ok());
}

#[tokio::test]
async fn test_released_gate_rejects_further_input() {
    let mailer = MockEmailProvider::new();
    let mut gate = BookingGate::new(service(mailer.clone()), &sample_event("1"));
    gate.submit_email("guest@example.com").await.unwrap();
    gate.submit_code(&mailer.last_code().unwrap()).await.unwrap();

    assert!(matches!(
        gate.submit_email("guest@example.com").await,
        Err(AuthError::InvalidTransition { .. })
    ));
    assert!(matches!(
        gate.submit_code("123456").await,
        Err(AuthError::InvalidTransition { .. })
    ));
}
