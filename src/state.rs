//! Process-wide liveness state shared between the bot pipeline and the
//! keepalive HTTP server.
//!
//! The original service kept these as loose globals mutated from two
//! execution contexts; here they live in one container with mutex-guarded
//! accessors so a torn read/write is impossible.

use serde::Serialize;
use std::time::Instant;
use tokio::sync::Mutex;

/// Liveness timestamps written by the message pipeline and `/ping`,
/// read by `/health`.
pub struct Liveness {
    started_at: Instant,
    last_user_activity: Mutex<Option<i64>>,
    last_ping: Mutex<Option<i64>>,
}

/// Point-in-time view of the process health, computed on demand.
#[derive(Debug, Serialize)]
pub struct HealthSnapshot {
    /// Always `true`; the process answered, so it is alive
    pub ok: bool,
    /// Seconds since process start
    pub uptime: u64,
    /// Operating-system process id
    pub pid: u32,
    /// Epoch seconds of the most recent inbound message, if any
    pub last_user_activity: Option<i64>,
    /// Epoch seconds of the most recent `/ping`, if any
    pub last_ping: Option<i64>,
}

impl Liveness {
    /// Creates the container with no recorded activity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            last_user_activity: Mutex::new(None),
            last_ping: Mutex::new(None),
        }
    }

    /// Records an inbound user message at `epoch_secs`.
    ///
    /// The stored value never moves backwards, so a late writer cannot
    /// shadow a more recent observation from the other task.
    pub async fn mark_user_activity(&self, epoch_secs: i64) {
        let mut guard = self.last_user_activity.lock().await;
        if guard.is_none_or(|prev| prev <= epoch_secs) {
            *guard = Some(epoch_secs);
        }
    }

    /// Records a keepalive ping and returns the stored timestamp.
    pub async fn mark_ping(&self, epoch_secs: i64) -> i64 {
        let mut guard = self.last_ping.lock().await;
        *guard = Some(epoch_secs);
        epoch_secs
    }

    /// Computes the current health view.
    pub async fn snapshot(&self) -> HealthSnapshot {
        HealthSnapshot {
            ok: true,
            uptime: self.started_at.elapsed().as_secs(),
            pid: std::process::id(),
            last_user_activity: *self.last_user_activity.lock().await,
            last_ping: *self.last_ping.lock().await,
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}
