//! IdGenerator port - ID 生成の抽象化

use chrono::Utc;
use ulid::Ulid;

use crate::domain::{InstanceId, TimerId};

/// Mints the opaque identifiers handed out by the host adapters.
pub trait IdGenerator: Send + Sync {
    fn instance_id(&self) -> InstanceId;

    fn timer_id(&self) -> TimerId;
}

/// ULID-backed generator: wall-clock millisecond timestamp plus a random
/// tail, so ids sort by creation time and need no coordination.
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn instance_id(&self) -> InstanceId {
        let timestamp_ms = Utc::now().timestamp_millis() as u64;
        InstanceId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }

    fn timer_id(&self) -> TimerId {
        let timestamp_ms = Utc::now().timestamp_millis() as u64;
        TimerId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
