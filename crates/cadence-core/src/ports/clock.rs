//! Clock port - 時刻の抽象化
//!
//! trait により時刻を差し替え可能。本番は `SystemClock`、テストは
//! `SimulatedClock` を使用します。

use async_trait::async_trait;

use crate::domain::TickCount;

/// Monotonic tick source with a fixed tick-to-seconds conversion.
///
/// `now` is read-only and safe for concurrent sampling from any number of
/// instances. `sleep_until` is the one scheduler-visible wait in the whole
/// protocol: it must not consume CPU while blocked.
#[async_trait]
pub trait ClockSource: Send + Sync {
    /// Current tick count. Never decreases.
    fn now(&self) -> TickCount;

    /// Ticks per second. Fixed for the lifetime of the clock.
    fn tick_hz(&self) -> u64;

    /// Block the calling task, without consuming CPU, until `deadline` is
    /// reached or passed. A deadline already in the past returns
    /// immediately.
    async fn sleep_until(&self, deadline: TickCount);
}
