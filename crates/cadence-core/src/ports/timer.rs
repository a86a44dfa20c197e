//! Timer port: auto-reloading software timers.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::domain::TimerId;

/// Callback invoked on each expiry.
///
/// Callbacks run on a shared timer context: they must return quickly and
/// never block, or every other timer stalls with them.
pub type TimerCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Error)]
pub enum TimerError {
    /// No slot left for another timer.
    #[error("timer capacity exhausted ({active}/{max} timers in use)")]
    CapacityExhausted { active: usize, max: usize },

    /// A period of zero ticks would fire continuously.
    #[error("timer period must be positive")]
    ZeroPeriod,

    /// The timer service rejected the request outright.
    #[error("timer service unavailable: {0}")]
    HostUnavailable(String),
}

/// Handle to a started timer.
#[derive(Debug)]
pub struct TimerHandle {
    timer_id: TimerId,
    join: JoinHandle<()>,
}

impl TimerHandle {
    pub fn new(timer_id: TimerId, join: JoinHandle<()>) -> Self {
        Self { timer_id, join }
    }

    pub fn timer_id(&self) -> TimerId {
        self.timer_id
    }

    /// Stop the timer. No further firings after this returns.
    pub fn cancel(&self) {
        self.join.abort();
    }
}

/// Auto-reload timer service.
///
/// Every started timer re-arms itself from its previous expiry instant, so
/// firings land on period boundaries and do not drift.
#[async_trait]
pub trait TimerService: Send + Sync {
    async fn start(
        &self,
        name: &str,
        period_ticks: u64,
        callback: TimerCallback,
    ) -> Result<TimerHandle, TimerError>;
}
