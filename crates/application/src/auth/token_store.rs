//! In-memory credential slot with expiry tracking.
//!
//! The slot holds at most one credential. Independently of the credential's
//! own expiry, an entry is evicted once it is older than the store's maximum
//! age, after which reads return `None`.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sf_report_domain::CachedCredential;
use tokio::sync::RwLock;

/// Default maximum age of a stored entry.
pub const DEFAULT_MAX_AGE_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
struct Entry {
    credential: CachedCredential,
    stored_at: DateTime<Utc>,
}

/// Thread-safe single-credential store.
#[derive(Debug, Clone)]
pub struct TokenStore {
    slot: Arc<RwLock<Option<Entry>>>,
    max_age: Duration,
}

impl TokenStore {
    /// Create a new token store with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_age(Duration::seconds(DEFAULT_MAX_AGE_SECS))
    }

    /// Create with a custom maximum entry age.
    #[must_use]
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            max_age,
        }
    }

    /// Store a credential, replacing any previous one.
    pub async fn store(&self, credential: CachedCredential, now: DateTime<Utc>) {
        let mut slot = self.slot.write().await;
        *slot = Some(Entry {
            credential,
            stored_at: now,
        });
    }

    /// Get the stored credential unless the entry has aged out.
    pub async fn get(&self, now: DateTime<Utc>) -> Option<CachedCredential> {
        let slot = self.slot.read().await;
        slot.as_ref()
            .filter(|entry| now - entry.stored_at < self.max_age)
            .map(|entry| entry.credential.clone())
    }

    /// Get the credential only if it is present and not expired.
    pub async fn get_valid(&self, now: DateTime<Utc>) -> Option<CachedCredential> {
        self.get(now).await.filter(|c| !c.is_expired_at(now))
    }

    /// Empty the slot.
    pub async fn clear(&self) {
        let mut slot = self.slot.write().await;
        *slot = None;
    }

    /// Get token status for display.
    pub async fn status(&self, now: DateTime<Utc>) -> TokenStatus {
        self.get(now)
            .await
            .map_or(TokenStatus::NotAuthenticated, |credential| {
                if credential.is_expired_at(now) {
                    TokenStatus::Expired
                } else {
                    TokenStatus::Valid {
                        seconds_remaining: credential.seconds_until_expiry(now),
                    }
                }
            })
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Status of the credential slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// No credential is stored.
    NotAuthenticated,
    /// A credential is stored and usable.
    Valid {
        /// Seconds until expiry.
        seconds_remaining: i64,
    },
    /// A credential is stored but past its expiry.
    Expired,
}

impl TokenStatus {
    /// Returns true if the token is valid (not expired).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// Get a user-friendly display message.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Not authenticated".to_string(),
            Self::Valid { seconds_remaining } => {
                let secs = *seconds_remaining;
                if secs > 3600 {
                    format!("Valid for {} hours", secs / 3600)
                } else if secs > 60 {
                    format!("Valid for {} minutes", secs / 60)
                } else {
                    format!("Valid for {secs} seconds")
                }
            }
            Self::Expired => "Expired".to_string(),
        }
    }
}
