//! Release arithmetic and the release wait.

use crate::domain::{InstanceIndex, TickCount};
use crate::ports::ClockSource;

/// Absolute release schedule of one chain.
///
/// Every instance computes its release from the chain's immutable anchor:
/// `release(k) = anchor + k * period`. Delays suffered by one instance
/// therefore never shift the releases of later ones — there is no drift to
/// accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseSchedule {
    anchor: TickCount,
    period_ticks: u64,
}

impl ReleaseSchedule {
    pub fn new(anchor: TickCount, period_ticks: u64) -> Self {
        Self {
            anchor,
            period_ticks,
        }
    }

    /// Release instant of instance `index`.
    pub fn release_at(&self, index: InstanceIndex) -> TickCount {
        self.anchor
            .plus(index.value().saturating_mul(self.period_ticks))
    }
}

/// Outcome of waiting for a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Released at the scheduled instant.
    OnTime { at: TickCount },

    /// The scheduled instant was already past when computed: released
    /// immediately. The caller logs this as a deadline miss.
    Late { scheduled: TickCount, at: TickCount },
}

impl Release {
    pub fn at(&self) -> TickCount {
        match self {
            Release::OnTime { at } | Release::Late { at, .. } => *at,
        }
    }
}

/// Block until the release instant of `index`, without consuming CPU.
///
/// A release instant already in the past degenerates to an immediate
/// release, reported as `Late` — never undefined or negative blocking.
pub async fn wait_for_release(
    clock: &dyn ClockSource,
    schedule: ReleaseSchedule,
    index: InstanceIndex,
) -> Release {
    let scheduled = schedule.release_at(index);
    let now = clock.now();
    if now >= scheduled {
        return Release::Late { scheduled, at: now };
    }

    clock.sleep_until(scheduled).await;
    Release::OnTime { at: clock.now() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::SimulatedClock;
    use rstest::rstest;
    use std::sync::Arc;
    use std::time::Duration;

    #[rstest]
    #[case::first(40, 20, 1, 60)]
    #[case::second(40, 20, 2, 80)]
    #[case::tenth(40, 20, 10, 240)]
    #[case::zero_anchor(0, 30, 4, 120)]
    fn release_instants_come_from_the_anchor(
        #[case] anchor: u64,
        #[case] period: u64,
        #[case] index: u64,
        #[case] expected: u64,
    ) {
        let schedule = ReleaseSchedule::new(TickCount::new(anchor), period);
        let mut idx = InstanceIndex::FIRST;
        while idx.value() < index {
            idx = idx.next();
        }
        assert_eq!(schedule.release_at(idx), TickCount::new(expected));
    }

    #[test]
    fn consecutive_releases_are_one_period_apart() {
        let schedule = ReleaseSchedule::new(TickCount::new(7), 25);
        let mut index = InstanceIndex::FIRST;
        for _ in 0..20 {
            let this = schedule.release_at(index);
            let next = schedule.release_at(index.next());
            assert_eq!(next.since(this), 25);
            index = index.next();
        }
    }

    #[tokio::test]
    async fn wait_blocks_until_the_scheduled_instant() {
        let clock = SimulatedClock::new(10);
        let schedule = ReleaseSchedule::new(TickCount::ZERO, 20);

        let waiter = tokio::spawn({
            let clock = Arc::clone(&clock);
            async move { wait_for_release(clock.as_ref(), schedule, InstanceIndex::FIRST).await }
        });

        clock.advance(19);
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        clock.advance(1);
        let release = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            release,
            Release::OnTime {
                at: TickCount::new(20)
            }
        );
    }

    #[tokio::test]
    async fn past_instant_is_an_immediate_late_release() {
        let clock = SimulatedClock::new(10);
        clock.advance(35);

        let schedule = ReleaseSchedule::new(TickCount::ZERO, 20);
        // No one advances the clock here: a late release must not wait.
        let release = wait_for_release(clock.as_ref(), schedule, InstanceIndex::FIRST).await;
        assert_eq!(
            release,
            Release::Late {
                scheduled: TickCount::new(20),
                at: TickCount::new(35),
            }
        );
    }

    #[tokio::test]
    async fn earlier_delays_do_not_shift_later_releases() {
        // Instance 1 released 15 ticks late; instance 2's instant is still
        // computed from the anchor, not from instance 1's actual release.
        let clock = SimulatedClock::new(10);
        clock.advance(35);

        let schedule = ReleaseSchedule::new(TickCount::ZERO, 20);
        let late = wait_for_release(clock.as_ref(), schedule, InstanceIndex::FIRST).await;
        assert!(matches!(late, Release::Late { .. }));

        assert_eq!(
            schedule.release_at(InstanceIndex::FIRST.next()),
            TickCount::new(40)
        );
    }
}
