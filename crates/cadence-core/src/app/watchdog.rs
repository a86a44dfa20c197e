//! Watchdog: an independent auto-reload narration timer.

use std::sync::Arc;

use crate::domain::ChainEvent;
use crate::ports::{ClockSource, EventSink, TimerCallback, TimerError, TimerHandle, TimerService};

/// Configuration of the watchdog timer. Its period is given in whole
/// seconds and, in the demo scenario, is longer than any chain's period.
#[derive(Debug, Clone)]
pub struct WatchdogSpec {
    pub name: String,
    pub period_secs: u64,
    pub message: String,
}

impl WatchdogSpec {
    pub fn new(name: impl Into<String>, period_secs: u64, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            period_secs,
            message: message.into(),
        }
    }
}

/// Start the watchdog. It fires every `period_secs`, forever, unrelated to
/// any chain's state; each firing emits one `WatchdogFired` line and
/// nothing else — the callback runs on the shared timer context and must
/// never block.
pub async fn start_watchdog(
    timers: &dyn TimerService,
    clock: Arc<dyn ClockSource>,
    sink: Arc<dyn EventSink>,
    spec: &WatchdogSpec,
) -> Result<TimerHandle, TimerError> {
    let period_ticks = spec.period_secs.saturating_mul(clock.tick_hz());
    let timer = spec.name.clone();
    let message = spec.message.clone();
    let callback: TimerCallback = Arc::new(move || {
        sink.emit(ChainEvent::WatchdogFired {
            timer: timer.clone(),
            message: message.clone(),
            at: clock.now(),
        });
    });
    timers.start(&spec.name, period_ticks, callback).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TickCount;
    use crate::impls::{RecordingEventSink, SimulatedClock, TokioTimerService};
    use crate::ports::UlidGenerator;
    use std::time::Duration;

    async fn wait_until(cond: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !cond() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn fires_on_its_own_cadence_with_no_chains_around() {
        let clock = SimulatedClock::new(10);
        let sink = Arc::new(RecordingEventSink::new());
        let timers = TokioTimerService::new(Arc::clone(&clock) as _, Arc::new(UlidGenerator), 1);

        let spec = WatchdogSpec::new("watchdog", 2, "the order of execution repeats");
        let handle = start_watchdog(
            &timers,
            Arc::clone(&clock) as _,
            Arc::clone(&sink) as _,
            &spec,
        )
        .await
        .unwrap();

        // 2 s at 10 ticks/s: boundaries at 20, 40, 60.
        for (nth, boundary) in [20u64, 40, 60].into_iter().enumerate() {
            clock.advance_to(TickCount::new(boundary));
            wait_until(|| sink.events().len() == nth + 1).await;
        }
        handle.cancel();

        for (nth, event) in sink.events().into_iter().enumerate() {
            match event {
                ChainEvent::WatchdogFired { timer, message, at } => {
                    assert_eq!(timer, "watchdog");
                    assert_eq!(message, "the order of execution repeats");
                    // ± one tick of the exact boundary.
                    let boundary = 20 * (nth as u64 + 1);
                    assert!(at.value().abs_diff(boundary) <= 1);
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }
}
