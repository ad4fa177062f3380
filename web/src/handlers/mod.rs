//! HTTP handlers.
//!
//! - `events`: `GET /events`
//! - `otp`: `POST /otp` and `PUT /otp`
//! - `email`: `POST /email`
//! - `health`: `GET /health` and `GET /metrics`

pub mod email;
pub mod events;
pub mod health;
pub mod otp;
