//! Tick counts and periods.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Monotonic tick count sampled from a `ClockSource`.
///
/// Plain transport of the host's tick counter: arithmetic is saturating so
/// schedule computations can never wrap into the past.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TickCount(u64);

impl TickCount {
    pub const ZERO: TickCount = TickCount(0);

    pub fn new(ticks: u64) -> Self {
        Self(ticks)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// This instant plus `ticks`.
    pub fn plus(self, ticks: u64) -> Self {
        Self(self.0.saturating_add(ticks))
    }

    /// Ticks elapsed since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: TickCount) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for TickCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Largest admissible period, in tenths of a second.
pub const PERIOD_MAX_DECIS: u32 = 100;

/// A chain's period: a count of tenths of a second in `[1, 100]`.
///
/// The unit and the upper bound are scenario parameters, not protocol
/// requirements; what the protocol needs is only that a period is positive.
/// Validation happens here, at construction, so a `Period` in hand is always
/// usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Period(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("period must be positive")]
    Zero,

    #[error("period of {0} tenths of a second exceeds the maximum of 100")]
    TooLong(u32),
}

impl Period {
    pub fn from_decis(decis: u32) -> Result<Self, PeriodError> {
        if decis == 0 {
            return Err(PeriodError::Zero);
        }
        if decis > PERIOD_MAX_DECIS {
            return Err(PeriodError::TooLong(decis));
        }
        Ok(Self(decis))
    }

    pub fn as_decis(self) -> u32 {
        self.0
    }

    /// Length of this period in host ticks at the given tick rate.
    pub fn ticks(self, tick_hz: u64) -> u64 {
        (self.0 as u64).saturating_mul(tick_hz) / 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn tick_arithmetic_saturates() {
        let t = TickCount::new(u64::MAX).plus(1);
        assert_eq!(t.value(), u64::MAX);

        // since() never goes negative
        assert_eq!(TickCount::new(5).since(TickCount::new(9)), 0);
        assert_eq!(TickCount::new(9).since(TickCount::new(5)), 4);
    }

    #[rstest]
    #[case::min(1)]
    #[case::typical(30)]
    #[case::max(100)]
    fn period_accepts_valid_range(#[case] decis: u32) {
        let period = Period::from_decis(decis).unwrap();
        assert_eq!(period.as_decis(), decis);
    }

    #[test]
    fn period_rejects_zero() {
        assert_eq!(Period::from_decis(0), Err(PeriodError::Zero));
    }

    #[test]
    fn period_rejects_too_long() {
        assert_eq!(Period::from_decis(101), Err(PeriodError::TooLong(101)));
    }

    #[rstest]
    #[case::millisecond_ticks(20, 1000, 2000)]
    #[case::decisecond_ticks(20, 10, 20)]
    #[case::one_deci(1, 1000, 100)]
    fn period_converts_to_ticks(#[case] decis: u32, #[case] hz: u64, #[case] expected: u64) {
        let period = Period::from_decis(decis).unwrap();
        assert_eq!(period.ticks(hz), expected);
    }
}
