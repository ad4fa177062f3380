//! In-memory OTP store.

use crate::error::Result;
use crate::providers::{OtpEntry, OtpStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Process-local OTP store.
///
/// A mutex-protected map shared by all clones. Entries live for the lifetime
/// of the process; a restart forgets every outstanding code.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOtpStore {
    entries: Arc<Mutex<HashMap<String, OtpEntry>>>,
}

impl InMemoryOtpStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OtpEntry>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OtpStore for InMemoryOtpStore {
    async fn put(&self, email: &str, entry: OtpEntry) -> Result<()> {
        self.lock().insert(email.to_string(), entry);
        Ok(())
    }

    async fn get(&self, email: &str) -> Result<Option<OtpEntry>> {
        Ok(self.lock().get(email).cloned())
    }

    async fn remove(&self, email: &str) -> Result<()> {
        self.lock().remove(email);
        Ok(())
    }
}
