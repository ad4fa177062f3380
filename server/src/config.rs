//! Configuration management for the EventGate server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unset or blank variables fall back to their default. Set but unparseable
//! values are rejected.

use eventgate_events::eventyay::{DEFAULT_API_URL, DEFAULT_PAGE_SIZE};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be parsed.
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Offending value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// A duration that must be positive was set to zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// A duration exceeds the supported maximum.
    #[error("{key} must be at most {max} seconds")]
    TooLarge {
        /// Variable name.
        key: &'static str,
        /// Largest accepted value, in seconds.
        max: u64,
    },
}

/// Largest accepted value for any `*_SECS` variable (ten years).
pub const MAX_DURATION_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Upstream events API and cache configuration
    pub events: EventsConfig,
    /// Outbound email configuration
    pub email: EmailConfig,
    /// OTP configuration
    pub otp: OtpSettings,
    /// Redis connection URL; the in-memory OTP store is used when unset
    pub redis_url: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Events API and cache configuration
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Upstream base URL
    pub api_url: String,
    /// Events requested per fetch
    pub page_size: u32,
    /// Cache file location
    pub cache_path: PathBuf,
    /// Minimum age before the cache refreshes
    pub refresh_interval: Duration,
    /// Offset written to the envelope's `expiresAt`
    pub cache_ttl: Duration,
    /// Upstream request timeout
    pub http_timeout: Duration,
}

/// Email configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP relay; the console provider is used when unset
    pub smtp: Option<SmtpConfig>,
    /// Sender address
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
}

/// SMTP relay configuration
#[derive(Clone)]
pub struct SmtpConfig {
    /// Relay host
    pub host: String,
    /// Relay port
    pub port: u16,
    /// Username (empty for unauthenticated relays)
    pub username: String,
    /// Password
    pub password: String,
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// OTP configuration
#[derive(Debug, Clone)]
pub struct OtpSettings {
    /// Code lifetime
    pub ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a value that cannot be
    /// parsed or is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set to a value that cannot be
    /// parsed or is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let smtp = match vars.string("SMTP_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: vars.parse("SMTP_PORT", 587)?,
                username: vars.string("SMTP_USER").unwrap_or_default(),
                password: vars.string("SMTP_PASSWORD").unwrap_or_default(),
            }),
            None => None,
        };

        Ok(Self {
            server: ServerConfig {
                host: vars.string("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: vars.parse("PORT", 8080)?,
            },
            events: EventsConfig {
                api_url: vars
                    .string("EVENTS_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                page_size: vars.parse("EVENTS_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,
                cache_path: vars
                    .string("EVENTS_CACHE_PATH")
                    .map_or_else(|| PathBuf::from("public/data.json"), PathBuf::from),
                refresh_interval: vars.seconds("EVENTS_REFRESH_INTERVAL_SECS", 300)?,
                cache_ttl: vars.seconds("EVENTS_CACHE_TTL_SECS", 86_400)?,
                http_timeout: vars.seconds("HTTP_TIMEOUT_SECS", 10)?,
            },
            email: EmailConfig {
                smtp,
                from_email: vars
                    .string("FROM_EMAIL")
                    .unwrap_or_else(|| "noreply@localhost".to_string()),
                from_name: vars
                    .string("FROM_NAME")
                    .unwrap_or_else(|| "Event Booking".to_string()),
            },
            otp: OtpSettings {
                ttl: non_zero("OTP_TTL_SECS", vars.seconds("OTP_TTL_SECS", 300)?)?,
            },
            redis_url: vars.string("REDIS_URL"),
        })
    }
}

fn non_zero(key: &'static str, value: Duration) -> Result<Duration, ConfigError> {
    if value.is_zero() {
        Err(ConfigError::Zero(key))
    } else {
        Ok(value)
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Trimmed value; unset and blank are both `None`.
    fn string(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: fmt::Display,
    {
        match self.string(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }

    fn seconds(&self, key: &'static str, default: u64) -> Result<Duration, ConfigError> {
        let secs = self.parse(key, default)?;
        if secs > MAX_DURATION_SECS {
            return Err(ConfigError::TooLarge {
                key,
                max: MAX_DURATION_SECS,
            });
        }
        Ok(Duration::from_secs(secs))
    }
}
