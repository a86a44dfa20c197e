//! SystemClock: monotonic host time as ticks.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::TickCount;
use crate::ports::ClockSource;

/// Production clock. Ticks are derived from monotonic elapsed time since
/// construction, at a fixed rate (default 1000 ticks per second), so the
/// count can never decrease. `sleep_until` maps onto the tokio timer.
#[derive(Debug, Clone)]
pub struct SystemClock {
    epoch: Instant,
    tick_hz: u64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_tick_hz(1000)
    }

    pub fn with_tick_hz(tick_hz: u64) -> Self {
        assert!(tick_hz > 0, "tick rate must be positive");
        Self {
            epoch: Instant::now(),
            tick_hz,
        }
    }

    fn instant_at(&self, tick: TickCount) -> Instant {
        let secs = tick.value() / self.tick_hz;
        let rem = tick.value() % self.tick_hz;
        let nanos = rem.saturating_mul(1_000_000_000) / self.tick_hz;
        self.epoch + Duration::new(secs, nanos as u32)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClockSource for SystemClock {
    fn now(&self) -> TickCount {
        let nanos = self.epoch.elapsed().as_nanos();
        let ticks = nanos.saturating_mul(self.tick_hz as u128) / 1_000_000_000;
        TickCount::new(ticks as u64)
    }

    fn tick_hz(&self) -> u64 {
        self.tick_hz
    }

    async fn sleep_until(&self, deadline: TickCount) {
        tokio::time::sleep_until(self.instant_at(deadline).into()).await;
    }
}
