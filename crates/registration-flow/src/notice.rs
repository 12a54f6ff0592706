//! Transient user-facing notices.

use std::time::Duration;
use tokio::time::Instant;

/// Lifetime of the "draft restored" notice.
pub const RESTORE_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Lifetime of success notices (code sent, phone verified, registered).
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(3);

/// A notice that dismisses itself by expiring rather than by a timer:
/// once the deadline passes it reads as absent.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    expires_at: Instant,
}

impl Notice {
    pub fn new(message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// The notice text, or `None` once it has auto-dismissed.
    pub fn message(&self) -> Option<&str> {
        if self.is_expired() {
            None
        } else {
            Some(&self.message)
        }
    }
}
