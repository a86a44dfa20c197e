//! SimulatedClock: manually advanced time for tests and dry runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::domain::TickCount;
use crate::ports::ClockSource;

/// Clock that only moves when told to.
///
/// `sleep_until` parks on a notify and re-checks after every advance, so
/// sleepers wake exactly at (or past) their deadline with no real delay.
/// Busy-polling code is exercised with `drive`, which advances the clock
/// one step per scheduler turn.
pub struct SimulatedClock {
    now: AtomicU64,
    tick_hz: u64,
    advanced: Notify,
}

impl SimulatedClock {
    pub fn new(tick_hz: u64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicU64::new(0),
            tick_hz,
            advanced: Notify::new(),
        })
    }

    /// Advance by `ticks` and wake every parked sleeper.
    pub fn advance(&self, ticks: u64) {
        self.now.fetch_add(ticks, Ordering::SeqCst);
        self.advanced.notify_waiters();
    }

    /// Advance to an absolute tick. Never moves backwards.
    pub fn advance_to(&self, deadline: TickCount) {
        let mut current = self.now.load(Ordering::SeqCst);
        while current < deadline.value() {
            match self.now.compare_exchange(
                current,
                deadline.value(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => break,
                Err(observed) => current = observed,
            }
        }
        self.advanced.notify_waiters();
    }

    /// Spawn a cooperative ticker advancing `step` ticks per scheduler
    /// turn. Abort the returned handle when the test is done with it.
    pub fn drive(self: &Arc<Self>, step: u64) -> JoinHandle<()> {
        let clock = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                clock.advance(step);
                tokio::task::yield_now().await;
            }
        })
    }
}

#[async_trait]
impl ClockSource for SimulatedClock {
    fn now(&self) -> TickCount {
        TickCount::new(self.now.load(Ordering::SeqCst))
    }

    fn tick_hz(&self) -> u64 {
        self.tick_hz
    }

    async fn sleep_until(&self, deadline: TickCount) {
        loop {
            // Register the waiter before checking, so an advance racing
            // between the check and the await cannot be lost.
            let advanced = self.advanced.notified();
            tokio::pin!(advanced);
            advanced.as_mut().enable();
            if self.now() >= deadline {
                return;
            }
            advanced.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn sleep_wakes_when_advanced_past_deadline() {
        let clock = SimulatedClock::new(10);
        let sleeper = tokio::spawn({
            let clock = Arc::clone(&clock);
            async move {
                clock.sleep_until(TickCount::new(25)).await;
                clock.now()
            }
        });

        // Not enough yet.
        clock.advance(10);
        tokio::task::yield_now().await;
        assert!(!sleeper.is_finished());

        clock.advance(20);
        let woke_at = tokio::time::timeout(Duration::from_secs(5), sleeper)
            .await
            .unwrap()
            .unwrap();
        assert!(woke_at >= TickCount::new(25));
    }

    #[tokio::test]
    async fn sleep_until_past_deadline_returns_immediately() {
        let clock = SimulatedClock::new(10);
        clock.advance(50);
        clock.sleep_until(TickCount::new(25)).await;
        assert_eq!(clock.now(), TickCount::new(50));
    }

    #[tokio::test]
    async fn advance_to_never_moves_backwards() {
        let clock = SimulatedClock::new(10);
        clock.advance_to(TickCount::new(40));
        clock.advance_to(TickCount::new(30));
        assert_eq!(clock.now(), TickCount::new(40));
    }

    #[tokio::test]
    async fn drive_advances_while_others_poll() {
        let clock = SimulatedClock::new(10);
        let ticker = clock.drive(1);

        let deadline = TickCount::new(100);
        while clock.now() < deadline {
            tokio::task::yield_now().await;
        }
        ticker.abort();
        assert!(clock.now() >= deadline);
    }
}
