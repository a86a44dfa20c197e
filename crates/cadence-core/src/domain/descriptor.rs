//! Task descriptors: the immutable identity of one admitted instance.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::{Period, TickCount};

/// Stable identity of a chain, shared by every instance of the same logical
/// periodic task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChainName(String);

impl ChainName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Host scheduler priority. Opaque here: handed to the host unchanged and
/// copied to every successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(u8);

impl Priority {
    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

/// Position of an instance within its chain. Starts at 1 and increases by
/// exactly one per successor; a typed field, never encoded in a pointer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceIndex(u64);

impl InstanceIndex {
    pub const FIRST: InstanceIndex = InstanceIndex(1);

    pub fn value(self) -> u64 {
        self.0
    }

    /// Index of the successor instance.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for InstanceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One admitted instance of a periodic task.
///
/// Immutable once admitted: the running instance owns its descriptor until
/// handoff, and a successor always gets a freshly built one. The anchor is
/// recorded once, when the chain's first instance is admitted, and every
/// later release is computed from it — an instance that runs late therefore
/// never drags the rest of its chain with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    name: ChainName,
    period: Period,
    cpu_burst_secs: u32,
    instance_index: InstanceIndex,
    priority: Priority,
    anchor: TickCount,
}

impl TaskDescriptor {
    /// Descriptor for the first instance of a chain. `anchor` is the tick at
    /// which the chain was admitted.
    pub fn first(
        name: ChainName,
        period: Period,
        cpu_burst_secs: u32,
        priority: Priority,
        anchor: TickCount,
    ) -> Self {
        Self {
            name,
            period,
            cpu_burst_secs,
            instance_index: InstanceIndex::FIRST,
            priority,
            anchor,
        }
    }

    /// Descriptor for the next instance in the chain: index + 1, everything
    /// else copied unchanged.
    pub fn successor(&self) -> Self {
        Self {
            name: self.name.clone(),
            period: self.period,
            cpu_burst_secs: self.cpu_burst_secs,
            instance_index: self.instance_index.next(),
            priority: self.priority,
            anchor: self.anchor,
        }
    }

    pub fn name(&self) -> &ChainName {
        &self.name
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn cpu_burst_secs(&self) -> u32 {
        self.cpu_burst_secs
    }

    pub fn instance_index(&self) -> InstanceIndex {
        self.instance_index
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn anchor(&self) -> TickCount {
        self.anchor
    }
}
