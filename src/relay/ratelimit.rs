//! Per-user cooldown gate for link submissions.
//!
//! Keeps one last-allowed timestamp per user. There is no eviction: entries
//! live for the process lifetime, which is an accepted tradeoff for this
//! deployment (a TTL cache would be the fix if that ever changes).

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed; the user's timestamp was advanced.
    Allowed,
    /// The user is still cooling down; the stored timestamp is untouched.
    Cooldown {
        /// Whole seconds (rounded up) until the next request is allowed
        remaining_secs: u64,
    },
}

/// Gate that admits at most one request per user per cooldown window.
pub struct RateLimiter {
    cooldown: Duration,
    last_allowed: Mutex<HashMap<i64, Instant>>,
}

impl RateLimiter {
    /// Creates a limiter with the given cooldown window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_allowed: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether `user_id` may submit at `now`.
    ///
    /// A user with no recorded request is always allowed. On allow, the
    /// stored timestamp becomes `now`; on cooldown it is left unchanged so
    /// repeated attempts cannot push the window forward.
    pub async fn check(&self, user_id: i64, now: Instant) -> Decision {
        let mut map = self.last_allowed.lock().await;
        if let Some(&last) = map.get(&user_id) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                let mut secs = remaining.as_secs();
                if remaining.subsec_nanos() > 0 {
                    secs += 1;
                }
                return Decision::Cooldown {
                    remaining_secs: secs,
                };
            }
        }
        map.insert(user_id, now);
        Decision::Allowed
    }

    /// Number of users ever seen, for monitoring.
    pub async fn entry_count(&self) -> usize {
        self.last_allowed.lock().await.len()
    }
}
