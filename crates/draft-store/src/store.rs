//! In-memory session storage with TTL expiration.

use crate::error::DraftError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Storage capability the registration workflow is written against.
///
/// The real site keeps drafts in browser session storage; injecting the
/// store lets the workflow run against any key-value backend in tests.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), DraftError>;

    /// Remove the value under `key`. Returns whether anything was removed.
    async fn remove(&self, key: &str) -> Result<bool, DraftError>;
}

/// Entry in the session store with expiration tracking.
struct SessionEntry {
    value: String,
    expires_at: std::time::Instant,
}

/// In-memory session-scoped store with automatic TTL expiration.
///
/// Entries behave like browser session storage: each write refreshes the
/// session lifetime, and expired entries read as absent.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a new session store.
    ///
    /// Spawns a background task to periodically sweep expired entries.
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!("Session store initialized (ttl={:?})", ttl);

        store
    }

    /// Background task that periodically removes expired entries.
    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let now = std::time::Instant::now();
            let mut entries = self.entries.write().await;
            let before_count = entries.len();

            entries.retain(|_, entry| entry.expires_at > now);

            let removed = before_count - entries.len();
            if removed > 0 {
                debug!("Cleaned up {} expired session entries", removed);
            }
        }
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        let now = std::time::Instant::now();
        entries
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DraftStore for SessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DraftError> {
        let entries = self.entries.read().await;
        let now = std::time::Instant::now();

        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), DraftError> {
        let mut entries = self.entries.write().await;
        let expires_at = std::time::Instant::now() + self.ttl;

        entries.insert(
            key.to_string(),
            SessionEntry {
                value: value.to_string(),
                expires_at,
            },
        );

        debug!(key = %key, "Stored session entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool, DraftError> {
        let mut entries = self.entries.write().await;
        let removed = entries.remove(key).is_some();

        if removed {
            debug!(key = %key, "Removed session entry");
        }

        Ok(removed)
    }
}
