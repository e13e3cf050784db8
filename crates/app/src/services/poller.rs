//! State poller — background refresh of the snapshot while logged in.
//!
//! The poller is a single tokio task owned by the [`GameClient`]. It is
//! started on login, aborted on logout, and holds only a weak reference to
//! the client so it never keeps it alive on its own.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::{EventPublisher, GameApi};
use crate::services::game_client::GameClient;

/// Time between two background refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

/// A warning is traced every time the consecutive failure count reaches a
/// multiple of this.
const WARN_EVERY: u32 = 5;

/// Running poll task. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct PollHandle {
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub(crate) fn spawn<A, P>(client: Weak<GameClient<A, P>>, interval: Duration) -> Self
    where
        A: GameApi + 'static,
        P: EventPublisher + 'static,
    {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            handle: tokio::spawn(poll_loop(client, interval)),
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn poll_loop<A, P>(client: Weak<GameClient<A, P>>, interval: Duration)
where
    A: GameApi + 'static,
    P: EventPublisher + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick is immediate; whoever started us has just fetched.
    ticker.tick().await;

    let mut streak = FailureStreak::default();
    loop {
        ticker.tick().await;

        let Some(client) = client.upgrade() else {
            tracing::debug!("client dropped, poller exiting");
            break;
        };
        if !client.is_logged_in() {
            continue;
        }

        match client.fetch_state().await {
            Ok(()) => streak.reset(),
            Err(err) => {
                let warn = streak.record_failure();
                let failures = streak.count();
                tracing::debug!(error = %err, failures, "background refresh failed");
                if warn {
                    tracing::warn!(failures, "background refresh keeps failing");
                }
            }
        }
    }
}

/// Consecutive background refresh failures.
#[derive(Debug, Default)]
struct FailureStreak {
    count: u32,
}

impl FailureStreak {
    fn reset(&mut self) {
        self.count = 0;
    }

    /// Count one more failure. Returns `true` when a warning is due.
    fn record_failure(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        self.count % WARN_EVERY == 0
    }

    fn count(&self) -> u32 {
        self.count
    }
}
