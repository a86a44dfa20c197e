//! Observable state transitions.
//!
//! One `ChainEvent` per transition, one line per event at the sink. The
//! `Display` form is the log line; the serde form feeds structured sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::descriptor::{ChainName, InstanceIndex};
use super::time::TickCount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChainEvent {
    /// A release instant was reached; the instance starts its burst.
    ChainStarted {
        chain: ChainName,
        instance: InstanceIndex,
        at: TickCount,
    },

    /// One more second of the declared burst has been consumed.
    BurstProgress {
        chain: ChainName,
        instance: InstanceIndex,
        seconds_done: u32,
        seconds_total: u32,
        at: TickCount,
    },

    /// The declared burst is fully consumed.
    ChainFinished {
        chain: ChainName,
        instance: InstanceIndex,
        at: TickCount,
    },

    /// The computed release instant was already in the past when the
    /// instance looked; it released immediately instead.
    DeadlineMissed {
        chain: ChainName,
        instance: InstanceIndex,
        scheduled: TickCount,
        at: TickCount,
    },

    /// Admission of the successor (`instance` is the rejected index) failed;
    /// the chain produces nothing further.
    SuccessorRejected {
        chain: ChainName,
        instance: InstanceIndex,
        reason: String,
        at: TickCount,
    },

    /// The watchdog timer expired.
    WatchdogFired {
        timer: String,
        message: String,
        at: TickCount,
    },
}

impl ChainEvent {
    /// Chain this event belongs to (`None` for timer events).
    pub fn chain(&self) -> Option<&ChainName> {
        match self {
            ChainEvent::ChainStarted { chain, .. }
            | ChainEvent::BurstProgress { chain, .. }
            | ChainEvent::ChainFinished { chain, .. }
            | ChainEvent::DeadlineMissed { chain, .. }
            | ChainEvent::SuccessorRejected { chain, .. } => Some(chain),
            ChainEvent::WatchdogFired { .. } => None,
        }
    }

    pub fn at(&self) -> TickCount {
        match self {
            ChainEvent::ChainStarted { at, .. }
            | ChainEvent::BurstProgress { at, .. }
            | ChainEvent::ChainFinished { at, .. }
            | ChainEvent::DeadlineMissed { at, .. }
            | ChainEvent::SuccessorRejected { at, .. }
            | ChainEvent::WatchdogFired { at, .. } => *at,
        }
    }
}

impl fmt::Display for ChainEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainEvent::ChainStarted {
                chain,
                instance,
                at,
            } => {
                write!(f, "{chain}#{instance} is running (tick {at})")
            }
            ChainEvent::BurstProgress {
                chain,
                instance,
                seconds_done,
                seconds_total,
                at,
            } => {
                write!(
                    f,
                    "{chain}#{instance} burst {seconds_done}/{seconds_total}s (tick {at})"
                )
            }
            ChainEvent::ChainFinished {
                chain,
                instance,
                at,
            } => {
                write!(f, "{chain}#{instance} finished (tick {at})")
            }
            ChainEvent::DeadlineMissed {
                chain,
                instance,
                scheduled,
                at,
            } => {
                write!(
                    f,
                    "{chain}#{instance} missed its release: scheduled tick {scheduled}, released at {at}"
                )
            }
            ChainEvent::SuccessorRejected {
                chain,
                instance,
                reason,
                at,
            } => {
                write!(
                    f,
                    "{chain}#{instance} was not admitted ({reason}); chain ends (tick {at})"
                )
            }
            ChainEvent::WatchdogFired { timer, message, at } => {
                write!(f, "[{timer}] {message} (tick {at})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_line_per_event() {
        let event = ChainEvent::ChainStarted {
            chain: ChainName::new("alpha"),
            instance: InstanceIndex::FIRST,
            at: TickCount::new(20),
        };
        let line = event.to_string();
        assert_eq!(line, "alpha#1 is running (tick 20)");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn watchdog_events_have_no_chain() {
        let event = ChainEvent::WatchdogFired {
            timer: "watchdog".to_string(),
            message: "tick".to_string(),
            at: TickCount::new(7),
        };
        assert!(event.chain().is_none());
        assert_eq!(event.at(), TickCount::new(7));
    }

    #[test]
    fn events_survive_serde() {
        let event = ChainEvent::DeadlineMissed {
            chain: ChainName::new("beta"),
            instance: InstanceIndex::FIRST.next(),
            scheduled: TickCount::new(60),
            at: TickCount::new(75),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"deadline_missed\""));
        let back: ChainEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
