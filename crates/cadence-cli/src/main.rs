//! Demo scenario: three periodic chains and one watchdog on the real host.
//!
//! Runs the rate-monotonic style taskset for a little over one watchdog
//! period, printing one line per state transition, then dumps the final
//! registry snapshot as JSON.

use std::sync::Arc;
use std::time::Duration;

use cadence_core::app::{AdmissionHarness, ChainSpec, WatchdogSpec, fatal};
use cadence_core::domain::{Period, Priority};
use cadence_core::impls::{StdoutEventSink, SystemClock, TokioAdmission, TokioTimerService};
use cadence_core::ports::{Admission, ClockSource, EventSink, IdGenerator, TimerService, UlidGenerator};

#[tokio::main]
async fn main() {
    // (A) Host adapters: millisecond ticks, a handful of instance slots
    // (three chains plus one transient respawn slot each), one timer slot.
    let clock: Arc<dyn ClockSource> = Arc::new(SystemClock::with_tick_hz(1000));
    let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator);
    let sink: Arc<dyn EventSink> = Arc::new(StdoutEventSink);
    let admission: Arc<dyn Admission> = Arc::new(TokioAdmission::new(Arc::clone(&ids), 6));
    let timers: Arc<dyn TimerService> = Arc::new(TokioTimerService::new(
        Arc::clone(&clock),
        Arc::clone(&ids),
        1,
    ));

    // (B) The taskset: periods in tenths of a second, bursts in seconds.
    // Shorter period, higher priority — the priorities themselves are
    // opaque to this binary and to the host adapter.
    let period = |decis| Period::from_decis(decis).expect("scenario period out of range");
    let harness = AdmissionHarness::new(clock, admission, timers, sink)
        .chain(ChainSpec::new("alpha", period(20), 1, Priority::new(3)))
        .chain(ChainSpec::new("beta", period(30), 1, Priority::new(2)))
        .chain(ChainSpec::new("gamma", period(40), 2, Priority::new(1)))
        .watchdog(WatchdogSpec::new(
            "watchdog",
            12,
            "From here on, the order of execution is always the same.",
        ));

    // (C) Fail-fast start-up: either everything is admitted, or nothing runs.
    let system = match harness.start().await {
        Ok(system) => system,
        Err(err) => fatal::halt(err),
    };
    println!("all chains and the watchdog admitted; running");

    // (D) Let the chains respawn for a bit more than one watchdog period.
    tokio::time::sleep(Duration::from_millis(12_500)).await;

    let status = serde_json::to_string_pretty(&system.status()).expect("status is serializable");
    println!("{status}");

    if let Some(watchdog) = system.watchdog() {
        watchdog.cancel();
    }
}
