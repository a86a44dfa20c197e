//! Burst executor: simulated CPU-bound work.

use crate::domain::{ChainEvent, ChainName, InstanceIndex};
use crate::ports::{ClockSource, EventSink};

/// Consume `seconds` of logical execution time against `clock`.
///
/// This is a voluntary busy-wait: the instance samples the clock and
/// advances its counter once per elapsed one-second interval, actively
/// polling for the remainder of each interval instead of taking a timed
/// wait. The `yield_now` between samples keeps the poll honest on a
/// cooperative host; it is not a scheduler-visible sleep, and the burst
/// still completes only when the clock says so.
///
/// Returns once at least `seconds` of clock time have elapsed since entry;
/// `seconds == 0` returns immediately. Emits one `BurstProgress` per
/// completed second. Cannot fail, only run long.
pub async fn run_burst(
    clock: &dyn ClockSource,
    sink: &dyn EventSink,
    chain: &ChainName,
    instance: InstanceIndex,
    seconds: u32,
) {
    let one_second = clock.tick_hz();
    for seconds_done in 1..=seconds {
        let interval_start = clock.now();
        while clock.now().since(interval_start) < one_second {
            tokio::task::yield_now().await;
        }
        sink.emit(ChainEvent::BurstProgress {
            chain: chain.clone(),
            instance,
            seconds_done,
            seconds_total: seconds,
            at: clock.now(),
        });
    }
}
