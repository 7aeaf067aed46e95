//! Guests and their visits.
//!
//! A guest goes through two states, enforced by ownership:
//! - `Guest`: arrived but not seated yet; never finished
//! - `Visit`: seated, timer running; finished once its duration has elapsed
//!
//! `Guest::seat()` consumes the guest, so a visit can only ever be started once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::service_time::ServiceTime;

/// A guest that has not been seated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guest {
    name: String,
    duration: Duration,
}

impl Guest {
    /// Create a guest whose stay is drawn from `service_time`.
    pub fn new<R: Rng + ?Sized>(
        name: impl Into<String>,
        service_time: &ServiceTime,
        rng: &mut R,
    ) -> Self {
        Self {
            name: name.into(),
            duration: service_time.sample(rng),
        }
    }

    /// Create a guest with a fixed stay.
    pub fn with_duration(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// A guest that was never seated has not finished.
    pub fn is_finished(&self) -> bool {
        false
    }

    /// Seat the guest and start the visit timer.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn seat(self) -> Visit {
        let finished = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = watch::channel(false);

        let flag = Arc::clone(&finished);
        let duration = self.duration;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            flag.store(true, Ordering::Release);
            let _ = done_tx.send(true);
        });

        Visit {
            name: self.name,
            duration: self.duration,
            seated_at: Instant::now(),
            finished,
            done: done_rx,
            timer,
        }
    }
}

/// A seated guest whose visit timer is running or has run out.
///
/// Dropping a visit aborts its timer.
#[derive(Debug)]
pub struct Visit {
    name: String,
    duration: Duration,
    seated_at: Instant,
    finished: Arc<AtomicBool>,
    done: watch::Receiver<bool>,
    timer: JoinHandle<()>,
}

impl Visit {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// True once the visit has lasted its full duration.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Wait until the visit is finished.
    pub async fn wait(&self) {
        let mut done = self.done.clone();
        // Err means the timer was aborted; nothing left to wait for.
        let _ = done.wait_for(|finished| *finished).await;
    }

    pub fn elapsed(&self) -> Duration {
        self.seated_at.elapsed()
    }
}

impl Drop for Visit {
    fn drop(&mut self) {
        if !self.is_finished() {
            tracing::warn!(guest = %self.name, "Visit dropped before finishing");
        }
        self.timer.abort();
    }
}
