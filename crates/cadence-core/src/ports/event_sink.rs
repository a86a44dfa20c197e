//! EventSink port - イベント記録の抽象化

use crate::domain::ChainEvent;

/// Consumes one event per observable state transition.
///
/// `emit` is called from instance bodies and from timer callbacks alike, so
/// implementations must be cheap and must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ChainEvent);
}

/// Sink that drops everything.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: ChainEvent) {}
}
