//! Booking gate.
//!
//! Client-side two-step flow that releases an event's external booking URL
//! only after the user proves control of an email inbox.
//!
//! # States
//!
//! ```text
//!              submit_email ok               submit_code ok
//! AwaitingEmail ─────────────▶ AwaitingCode ─────────────▶ Released { booking_url }
//!      ▲   │ err: stay              │  │ err: stay
//!      │   └────┘                   │  └────┘
//!      └────────── change_email ────┘
//! ```
//!
//! Abandoning the flow needs no cleanup: an unverified code simply expires.

use crate::error::{AuthError, Result};
use crate::providers::OtpChallenge;
use eventgate_core::Event;

/// Where a booking gate is in the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    /// Waiting for the user's email address.
    AwaitingEmail,

    /// A code was sent to `email`; waiting for the user to enter it.
    AwaitingCode {
        /// Address the code was sent to.
        email: String,
    },

    /// Verification succeeded; the caller should navigate to `booking_url`.
    Released {
        /// The event's external booking URL.
        booking_url: String,
    },
}

impl BookingState {
    /// Short state name for errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AwaitingEmail => "awaiting email",
            Self::AwaitingCode { .. } => "awaiting code",
            Self::Released { .. } => "released",
        }
    }
}

/// Drives one booking attempt for one event.
#[derive(Debug)]
pub struct BookingGate<C> {
    challenge: C,
    event_id: String,
    booking_url: String,
    state: BookingState,
}

impl<C: OtpChallenge> BookingGate<C> {
    /// Start a booking attempt for `event`.
    #[must_use]
    pub fn new(challenge: C, event: &Event) -> Self {
        Self {
            challenge,
            event_id: event.id.clone(),
            booking_url: event.event_url.clone(),
            state: BookingState::AwaitingEmail,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Request a code for `email`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidTransition`] unless awaiting an email
    /// - whatever the challenge reports (e.g. `EmailDeliveryFailed`); the gate
    ///   stays in `AwaitingEmail`
    pub async fn submit_email(&mut self, email: &str) -> Result<()> {
        if self.state != BookingState::AwaitingEmail {
            return Err(self.invalid("submit an email"));
        }

        if let Err(err) = self.challenge.request_code(email).await {
            tracing::warn!(event_id = %self.event_id, error = %err, "OTP request failed");
            return Err(err);
        }

        self.state = BookingState::AwaitingCode {
            email: email.to_string(),
        };
        Ok(())
    }

    /// Submit the code the user received.
    ///
    /// Returns the booking URL to navigate to.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidTransition`] unless awaiting a code
    /// - `OtpNotFound`, `OtpExpired` or `OtpMismatch`; the gate stays in
    ///   `AwaitingCode` so the user can resubmit
    pub async fn submit_code(&mut self, code: &str) -> Result<String> {
        let BookingState::AwaitingCode { email } = &self.state else {
            return Err(self.invalid("submit a code"));
        };

        if let Err(err) = self.challenge.confirm_code(email, code).await {
            tracing::warn!(event_id = %self.event_id, error = %err, "OTP verification failed");
            return Err(err);
        }

        tracing::info!(event_id = %self.event_id, "Booking link released");
        self.state = BookingState::Released {
            booking_url: self.booking_url.clone(),
        };
        Ok(self.booking_url.clone())
    }

    /// Go back to entering an email address.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidTransition`] unless awaiting a code.
    pub fn change_email(&mut self) -> Result<()> {
        if !matches!(self.state, BookingState::AwaitingCode { .. }) {
            return Err(self.invalid("change the email"));
        }
        self.state = BookingState::AwaitingEmail;
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> AuthError {
        AuthError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}
