//! TokioTimerService: auto-reload timers over any clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::ports::{
    ClockSource, IdGenerator, TimerCallback, TimerError, TimerHandle, TimerService,
};

/// Timer service backed by one spawned loop per timer.
///
/// Each timer re-arms from its previous expiry instant (absolute
/// arithmetic), so callbacks land on period boundaries without accumulating
/// drift, whatever the callback's own duration.
pub struct TokioTimerService {
    clock: Arc<dyn ClockSource>,
    ids: Arc<dyn IdGenerator>,
    active: AtomicUsize,
    max_timers: usize,
}

impl TokioTimerService {
    pub fn new(clock: Arc<dyn ClockSource>, ids: Arc<dyn IdGenerator>, max_timers: usize) -> Self {
        Self {
            clock,
            ids,
            active: AtomicUsize::new(0),
            max_timers,
        }
    }
}

#[async_trait]
impl TimerService for TokioTimerService {
    async fn start(
        &self,
        _name: &str,
        period_ticks: u64,
        callback: TimerCallback,
    ) -> Result<TimerHandle, TimerError> {
        if period_ticks == 0 {
            return Err(TimerError::ZeroPeriod);
        }

        let claimed = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |active| {
                (active < self.max_timers).then_some(active + 1)
            });
        if claimed.is_err() {
            return Err(TimerError::CapacityExhausted {
                active: self.max_timers,
                max: self.max_timers,
            });
        }

        let timer_id = self.ids.timer_id();
        let clock = Arc::clone(&self.clock);
        // First expiry is anchored here, not at the spawned task's first
        // poll: the timer is armed the moment start() returns.
        let mut next = clock.now().plus(period_ticks);
        let join = tokio::spawn(async move {
            loop {
                clock.sleep_until(next).await;
                callback();
                next = next.plus(period_ticks);
            }
        });
        Ok(TimerHandle::new(timer_id, join))
    }
}
