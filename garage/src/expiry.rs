//! Periodic session expiry enforcement
//!
//! Claims expiry is not checked on every read. Instead the watcher compares the held claims
//! against the clock once per interval, and right after every session change, logging out when
//! they elapsed. Between checks an expired session can still be reported as authenticated.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, instrument};

use crate::clock::Clock;
use crate::session::SessionStore;

/// Ticker logging out expired sessions
pub struct ExpiryWatcher {
    session: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
}

/// Handle to a spawned `ExpiryWatcher`
pub struct ExpiryHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ExpiryHandle {
    /// Stops the watcher and waits for it to finish
    pub async fn shutdown(self) -> Result<()> {
        // Watcher might be already gone, joining tells what happened to it
        let _ = self.shutdown.send(());
        self.task.await.wrap_err("Expiry watcher panicked")
    }
}

impl ExpiryWatcher {
    /// Check interval used unless configured otherwise
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    pub fn new(session: Arc<SessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session,
            clock,
            interval: Self::DEFAULT_INTERVAL,
        }
    }

    /// Overrides the check interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Performs a single expiry check
    ///
    /// Returns `true` if the session was terminated.
    pub async fn check(&self) -> Result<bool> {
        self.session.check_expiry(self.clock.now()).await
    }

    /// Runs checks until `shutdown` completes
    ///
    /// The first check happens immediately. Failing checks are logged and do not stop the
    /// watcher.
    #[instrument(skip_all, fields(interval = ?self.interval))]
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut changes = self.session.subscribe();

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {},
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    // Session changed, start counting the interval from now
                    ticker.reset();
                }
            }

            if let Err(err) = self.check().await {
                error!(?err, "Session expiry check failed");
            }
        }

        debug!("Expiry watcher stopped");
    }

    /// Runs the watcher in a background task
    pub fn spawn(self) -> ExpiryHandle {
        let (shutdown, rx) = oneshot::channel();
        let task = tokio::spawn(self.run(async move {
            let _ = rx.await;
        }));

        ExpiryHandle { shutdown, task }
    }
}
