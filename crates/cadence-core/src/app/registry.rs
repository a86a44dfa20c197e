//! Chain registry: chain identity → current instance.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::{ChainName, InstanceId, InstanceIndex};

/// Whether a chain is still producing instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChainState {
    /// An instance is admitted and somewhere in wait → burst → respawn.
    Live,

    /// Successor admission failed; no further instances will appear.
    Terminated { reason: String },
}

/// Current instance of one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSlot {
    pub instance_id: InstanceId,
    pub instance_index: InstanceIndex,
    pub state: ChainState,
}

/// Single source of truth for which instance currently represents each
/// chain. One mutex over the whole map: the slot swap at every respawn is
/// atomic, so no reader ever observes a chain between instances.
#[derive(Default)]
pub struct ChainRegistry {
    slots: Mutex<HashMap<ChainName, ChainSlot>>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the current instance of `chain` — at initial admission, and
    /// again at every respawn handoff.
    pub fn install(&self, chain: ChainName, instance_id: InstanceId, instance_index: InstanceIndex) {
        let mut slots = self.slots.lock().unwrap();
        slots.insert(
            chain,
            ChainSlot {
                instance_id,
                instance_index,
                state: ChainState::Live,
            },
        );
    }

    /// Mark a chain terminated, keeping its last instance for the report.
    pub fn mark_terminated(&self, chain: &ChainName, reason: impl Into<String>) {
        let mut slots = self.slots.lock().unwrap();
        if let Some(slot) = slots.get_mut(chain) {
            slot.state = ChainState::Terminated {
                reason: reason.into(),
            };
        }
    }

    pub fn slot(&self, chain: &ChainName) -> Option<ChainSlot> {
        self.slots.lock().unwrap().get(chain).cloned()
    }

    /// Serializable snapshot, chains sorted by name for stable output.
    pub fn status(&self) -> SystemStatus {
        let slots = self.slots.lock().unwrap();
        let mut chains: Vec<ChainStatus> = slots
            .iter()
            .map(|(chain, slot)| ChainStatus {
                chain: chain.clone(),
                instance_index: slot.instance_index,
                state: slot.state.clone(),
            })
            .collect();
        chains.sort_by(|a, b| a.chain.cmp(&b.chain));

        let live = chains
            .iter()
            .filter(|c| c.state == ChainState::Live)
            .count();
        SystemStatus {
            live,
            terminated: chains.len() - live,
            chains,
        }
    }
}

/// Per-chain view inside a status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStatus {
    pub chain: ChainName,
    pub instance_index: InstanceIndex,
    #[serde(flatten)]
    pub state: ChainState,
}

/// Snapshot of every registered chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub live: usize,
    pub terminated: usize,
    pub chains: Vec<ChainStatus>,
}
