//! HTTP router.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use eventgate_auth::providers::{EmailProvider, OtpStore};
use eventgate_core::environment::Clock;
use eventgate_events::EventSource;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Create the EventGate router with all endpoints.
///
/// # Routes
///
/// - `GET /events` - Cached event listing
/// - `POST /otp` - Issue and email a code
/// - `PUT /otp` - Verify a code
/// - `POST /email` - Send an HTML email
/// - `GET /health` - Liveness
/// - `GET /metrics` - Prometheus metrics
///
/// Every response carries an `x-request-id` header, generated when the
/// client did not send one.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(otp_service, event_cache).with_metrics(handle);
/// let app = build_router(state);
/// axum::serve(listener, app).await?;
/// ```
pub fn build_router<S, E, C, Src>(state: AppState<S, E, C, Src>) -> Router
where
    S: OtpStore + 'static,
    E: EmailProvider + 'static,
    C: Clock + 'static,
    Src: EventSource + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/events", get(handlers::events::list_events::<S, E, C, Src>))
        .route(
            "/otp",
            post(handlers::otp::request_otp::<S, E, C, Src>)
                .put(handlers::otp::verify_otp::<S, E, C, Src>),
        )
        .route("/email", post(handlers::email::send_email::<S, E, C, Src>))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::health::render_metrics::<S, E, C, Src>))
        .with_state(state)
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
