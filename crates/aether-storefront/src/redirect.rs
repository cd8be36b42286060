//! The delayed redirect that follows a placed order.
//!
//! A redirect is a Tokio task that sleeps for the configured delay and
//! then asks the [`Navigator`] to move. Exactly one of "fired" and
//! "cancelled" wins: both sides claim the shared state with a
//! compare-exchange before acting.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aether_commerce::checkout::RedirectRequest;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::StorefrontError;
use crate::navigation::{Navigator, Route};

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Where a scheduled redirect stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectStatus {
    Pending,
    Fired,
    Cancelled,
}

impl RedirectStatus {
    fn from_state(state: u8) -> Self {
        match state {
            FIRED => RedirectStatus::Fired,
            CANCELLED => RedirectStatus::Cancelled,
            _ => RedirectStatus::Pending,
        }
    }
}

/// Handle to a scheduled redirect. Dropping it cancels the redirect.
#[derive(Debug)]
pub struct PendingRedirect {
    route: Route,
    delay: Duration,
    state: Arc<AtomicU8>,
    task: Option<JoinHandle<()>>,
}

impl PendingRedirect {
    /// Spawn the redirect timer on the current Tokio runtime.
    pub fn schedule(
        request: &RedirectRequest,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, StorefrontError> {
        let runtime = Handle::try_current().map_err(|_| StorefrontError::NotInRuntime)?;

        let route = Route::from(&request.target);
        let delay = request.delay;
        let state = Arc::new(AtomicU8::new(PENDING));

        let task_route = route.clone();
        let task_state = Arc::clone(&state);
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if task_state
                .compare_exchange(PENDING, FIRED, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                debug!(route = %task_route, "Redirect fired");
                navigator.navigate(&task_route);
            }
        });

        debug!(route = %route, delay_ms = delay.as_millis() as u64, "Redirect scheduled");

        Ok(Self {
            route,
            delay,
            state,
            task: Some(task),
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn status(&self) -> RedirectStatus {
        RedirectStatus::from_state(self.state.load(Ordering::Acquire))
    }

    pub fn is_pending(&self) -> bool {
        self.status() == RedirectStatus::Pending
    }

    /// Cancel the redirect.
    ///
    /// Returns `true` if this call stopped it, `false` if it had already
    /// fired or been cancelled.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self
            .state
            .compare_exchange(PENDING, CANCELLED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if let Some(task) = self.task.take() {
            task.abort();
        }

        if cancelled {
            debug!(route = %self.route, "Redirect cancelled");
        }
        cancelled
    }

    /// Wait until the redirect fires or is cancelled.
    pub async fn wait(&mut self) -> RedirectStatus {
        if let Some(task) = self.task.take() {
            // An aborted task resolves with a JoinError; the state says why.
            let _ = task.await;
        }
        self.status()
    }
}

impl Drop for PendingRedirect {
    fn drop(&mut self) {
        self.cancel();
    }
}
