//! Event sinks: stdout for the demo binary, in-memory recording for tests.

use std::sync::Mutex;

use chrono::Utc;

use crate::domain::ChainEvent;
use crate::ports::EventSink;

/// One line per event on stdout, stamped with wall-clock UTC time.
pub struct StdoutEventSink;

impl EventSink for StdoutEventSink {
    fn emit(&self, event: ChainEvent) {
        println!("{} {event}", Utc::now().format("%H:%M:%S%.3f"));
    }
}

/// Keeps every emitted event in order. 開発・テスト用。
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<ChainEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far, in emission order.
    pub fn events(&self) -> Vec<ChainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: ChainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainName, InstanceIndex, TickCount};

    #[test]
    fn recording_sink_keeps_emission_order() {
        let sink = RecordingEventSink::new();
        for tick in [1u64, 2, 3] {
            sink.emit(ChainEvent::ChainStarted {
                chain: ChainName::new("alpha"),
                instance: InstanceIndex::FIRST,
                at: TickCount::new(tick),
            });
        }

        let at: Vec<u64> = sink.events().iter().map(|e| e.at().value()).collect();
        assert_eq!(at, vec![1, 2, 3]);
    }
}
