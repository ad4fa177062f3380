//! Wiring of concrete providers from configuration.
//!
//! The providers are chosen at runtime (SMTP or console, Redis or in-memory),
//! so each choice is a small enum that dispatches to the selected
//! implementation.

use crate::config::{Config, EmailConfig};
use eventgate_auth::providers::{
    ConsoleEmailProvider, EmailProvider, OtpEntry, OtpStore, SmtpEmailProvider,
};
use eventgate_auth::{InMemoryOtpStore, OtpConfig, OtpRegistry, OtpService, RedisOtpStore};
use eventgate_core::environment::SystemClock;
use eventgate_events::{EventCache, EventCacheConfig, EventyayClient};
use eventgate_web::AppState;
use tracing::info;

/// Application state with the production provider choices.
pub type ServerState = AppState<OtpBackend, Mailer, SystemClock, EventyayClient>;

/// Outbound email transport selected from configuration.
#[derive(Clone)]
pub enum Mailer {
    /// SMTP relay.
    Smtp(SmtpEmailProvider),
    /// Log to the console (development).
    Console(ConsoleEmailProvider),
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smtp(_) => f.write_str("Mailer::Smtp"),
            Self::Console(_) => f.write_str("Mailer::Console"),
        }
    }
}

impl Mailer {
    /// Build the mailer described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP relay address is invalid.
    pub fn from_config(config: &EmailConfig) -> eventgate_auth::Result<Self> {
        match &config.smtp {
            Some(smtp) => Ok(Self::Smtp(SmtpEmailProvider::new(
                &smtp.host,
                smtp.port,
                smtp.username.clone(),
                smtp.password.clone(),
                config.from_email.clone(),
                config.from_name.clone(),
            )?)),
            None => {
                info!("SMTP_HOST not set, emails will be printed to the console");
                Ok(Self::Console(ConsoleEmailProvider::new()))
            }
        }
    }
}

impl EmailProvider for Mailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> eventgate_auth::Result<()> {
        match self {
            Self::Smtp(smtp) => smtp.send(to, subject, html_body).await,
            Self::Console(console) => console.send(to, subject, html_body).await,
        }
    }
}

/// OTP store selected from configuration.
#[derive(Clone)]
pub enum OtpBackend {
    /// Process-local map.
    Memory(InMemoryOtpStore),
    /// Shared Redis instance.
    Redis(RedisOtpStore),
}

impl std::fmt::Debug for OtpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory(_) => f.write_str("OtpBackend::Memory"),
            Self::Redis(_) => f.write_str("OtpBackend::Redis"),
        }
    }
}

impl OtpBackend {
    /// Connect to Redis when `redis_url` is set, otherwise use memory.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StoreUnavailable`](eventgate_auth::AuthError::StoreUnavailable)
    /// if Redis cannot be reached.
    pub async fn connect(redis_url: Option<&str>, otp: &OtpConfig) -> eventgate_auth::Result<Self> {
        match redis_url {
            Some(url) => {
                let store = RedisOtpStore::new(url, otp.expired_retention).await?;
                info!("Using Redis OTP store");
                Ok(Self::Redis(store))
            }
            None => {
                info!("REDIS_URL not set, using in-memory OTP store");
                Ok(Self::Memory(InMemoryOtpStore::new()))
            }
        }
    }
}

impl OtpStore for OtpBackend {
    async fn put(&self, email: &str, entry: OtpEntry) -> eventgate_auth::Result<()> {
        match self {
            Self::Memory(store) => store.put(email, entry).await,
            Self::Redis(store) => store.put(email, entry).await,
        }
    }

    async fn get(&self, email: &str) -> eventgate_auth::Result<Option<OtpEntry>> {
        match self {
            Self::Memory(store) => store.get(email).await,
            Self::Redis(store) => store.get(email).await,
        }
    }

    async fn remove(&self, email: &str) -> eventgate_auth::Result<()> {
        match self {
            Self::Memory(store) => store.remove(email).await,
            Self::Redis(store) => store.remove(email).await,
        }
    }
}

/// Build the application state from configuration.
///
/// # Errors
///
/// Returns an error if a configured backend (SMTP relay, Redis, HTTP client)
/// cannot be initialized.
pub async fn build_state(config: &Config) -> anyhow::Result<ServerState> {
    let otp_config = OtpConfig::new().with_ttl(chrono::Duration::from_std(config.otp.ttl)?);

    let store = OtpBackend::connect(config.redis_url.as_deref(), &otp_config).await?;
    let mailer = Mailer::from_config(&config.email)?;
    let registry = OtpRegistry::new(store, SystemClock, &otp_config);
    let otp = OtpService::new(registry, mailer);

    let source = EventyayClient::new(
        config.events.api_url.clone(),
        config.events.page_size,
        config.events.http_timeout,
    )?;
    let cache_config = EventCacheConfig::new(config.events.cache_path.clone())
        .with_refresh_interval(chrono::Duration::from_std(config.events.refresh_interval)?)
        .with_ttl(chrono::Duration::from_std(config.events.cache_ttl)?);
    let events = EventCache::new(source, SystemClock, cache_config);

    info!(
        api_url = %config.events.api_url,
        cache_path = %config.events.cache_path.display(),
        "Event cache configured"
    );

    Ok(AppState::new(otp, events))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_defaults_use_local_providers() {
        let config = Config::from_lookup(|_| None).unwrap();

        let state = build_state(&config).await.unwrap();

        assert!(matches!(state.otp.email_provider(), Mailer::Console(_)));
        assert!(matches!(state.otp.registry().store(), OtpBackend::Memory(_)));
    }

    #[tokio::test]
    async fn test_smtp_host_selects_smtp_mailer() {
        let vars = HashMap::from([("SMTP_HOST".to_string(), "smtp.example.com".to_string())]);
        let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

        let mailer = Mailer::from_config(&config.email).unwrap();

        assert!(matches!(mailer, Mailer::Smtp(_)));
    }

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = OtpBackend::connect(None, &OtpConfig::default()).await.unwrap();
        let now = chrono::Utc::now();

        backend
            .put("a@x.com", OtpEntry::new("123456".into(), now, now))
            .await
            .unwrap();

        assert_eq!(backend.get("a@x.com").await.unwrap().unwrap().code, "123456");
        backend.remove("a@x.com").await.unwrap();
        assert!(backend.get("a@x.com").await.unwrap().is_none());
    }
}
