//! Application state for Axum handlers.

use eventgate_auth::OtpService;
use eventgate_events::EventCache;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Generic over the OTP store `S`, email provider `E`, clock `C` and event
/// source `Src`, so tests can run the real handlers over in-memory mocks.
pub struct AppState<S, E, C, Src> {
    /// OTP issuance, verification and email delivery.
    pub otp: Arc<OtpService<S, E, C>>,

    /// Cached event listing.
    pub events: Arc<EventCache<Src, C>>,

    /// Prometheus exporter handle; `GET /metrics` renders it.
    pub metrics: Option<PrometheusHandle>,
}

impl<S, E, C, Src> AppState<S, E, C, Src> {
    /// Create application state.
    #[must_use]
    pub fn new(otp: OtpService<S, E, C>, events: EventCache<Src, C>) -> Self {
        Self {
            otp: Arc::new(otp),
            events: Arc::new(events),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

// Manual impl: cloning shares the Arcs and needs no bounds on the parameters.
impl<S, E, C, Src> Clone for AppState<S, E, C, Src> {
    fn clone(&self) -> Self {
        Self {
            otp: Arc::clone(&self.otp),
            events: Arc::clone(&self.events),
            metrics: self.metrics.clone(),
        }
    }
}
