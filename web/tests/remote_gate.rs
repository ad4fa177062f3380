//! Booking gate driven over HTTP against a live server.

#![allow(clippy::unwrap_used, clippy::panic)]

use eventgate_auth::mocks::MockEmailProvider;
use eventgate_auth::providers::HttpOtpChallenge;
use eventgate_auth::{
    AuthError, BookingGate, BookingState, InMemoryOtpStore, OtpConfig, OtpRegistry, OtpService,
};
use eventgate_events::mocks::MockEventSource;
use eventgate_events::{EventCache, EventCacheConfig};
use eventgate_testing::{init_test_tracing, sample_event, test_clock};
use eventgate_web::{AppState, build_router};

struct Server {
    base_url: String,
    mailer: MockEmailProvider,
    _dir: tempfile::TempDir,
}

/// Serve the router on an ephemeral port for the rest of the test.
async fn serve(mailer: MockEmailProvider) -> Server {
    init_test_tracing();
    let dir = tempfile::tempdir().unwrap();
    let clock = test_clock();

    let config = OtpConfig::default();
    let registry = OtpRegistry::new(InMemoryOtpStore::new(), clock.clone(), &config);
    let otp = OtpService::new(registry, mailer.clone());
    let events = EventCache::new(
        MockEventSource::new(),
        clock,
        EventCacheConfig::new(dir.path().join("data.json")),
    );
    let app = build_router(AppState::new(otp, events));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        base_url: format!("http://{address}"),
        mailer,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_remote_gate_releases_booking_url() {
    let server = serve(MockEmailProvider::new()).await;
    let event = sample_event("42");
    let mut gate = BookingGate::new(HttpOtpChallenge::new(&server.base_url), &event);

    gate.submit_email("guest@example.com").await.unwrap();
    assert!(matches!(gate.state(), BookingState::AwaitingCode { .. }));

    let code = server.mailer.last_code().unwrap();
    let url = gate.submit_code(&code).await.unwrap();

    assert_eq!(url, event.event_url);
    assert!(matches!(gate.state(), BookingState::Released { .. }));
}

#[tokio::test]
async fn test_remote_gate_wrong_code_is_mismatch() {
    let server = serve(MockEmailProvider::new()).await;
    let challenge = HttpOtpChallenge::new(&server.base_url);
    let mut gate = BookingGate::new(challenge, &sample_event("1"));
    gate.submit_email("guest@example.com").await.unwrap();

    let code = server.mailer.last_code().unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    assert_eq!(gate.submit_code(wrong).await, Err(AuthError::OtpMismatch));
    assert!(matches!(gate.state(), BookingState::AwaitingCode { .. }));

    assert!(gate.submit_code(&code).await.is_ok());
}

#[tokio::test]
async fn test_remote_gate_delivery_failure_stays_awaiting_email() {
    let server = serve(MockEmailProvider::failing()).await;
    let challenge = HttpOtpChallenge::new(&server.base_url);
    let mut gate = BookingGate::new(challenge, &sample_event("1"));

    let result = gate.submit_email("guest@example.com").await;

    let Err(AuthError::EmailDeliveryFailed(reason)) = &result else {
        panic!("unexpected result: {result:?}");
    };
    assert!(reason.starts_with("Failed to send email"));
    assert_eq!(gate.state(), &BookingState::AwaitingEmail);
}

#[tokio::test]
async fn test_remote_gate_unreachable_server() {
    init_test_tracing();
    let challenge = HttpOtpChallenge::new("http://127.0.0.1:1");
    let mut gate = BookingGate::new(challenge, &sample_event("1"));

    let result = gate.submit_email("guest@example.com").await;

    assert!(matches!(result, Err(AuthError::ChallengeRequestFailed(_))));
    assert_eq!(gate.state(), &BookingState::AwaitingEmail);
}
