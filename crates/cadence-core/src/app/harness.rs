//! Admission harness: start-up admission with a fail-fast policy.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{ChainName, InstanceIndex, Period, Priority, TaskDescriptor};
use crate::ports::{Admission, ClockSource, EventSink, TimerHandle, TimerService};

use super::chain::{self, ChainContext};
use super::registry::{ChainRegistry, SystemStatus};
use super::watchdog::{self, WatchdogSpec};

/// Start-up description of one chain.
#[derive(Debug, Clone)]
pub struct ChainSpec {
    pub name: ChainName,
    pub period: Period,
    pub cpu_burst_secs: u32,
    pub priority: Priority,
}

impl ChainSpec {
    pub fn new(
        name: impl Into<String>,
        period: Period,
        cpu_burst_secs: u32,
        priority: Priority,
    ) -> Self {
        Self {
            name: ChainName::new(name),
            period,
            cpu_burst_secs,
            priority,
        }
    }
}

/// One admission the harness could not complete, named by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedAdmission {
    pub identity: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum StartupError {
    /// At least one start-up admission failed. Everything that had been
    /// admitted was revoked again: a failed start leaves nothing running.
    #[error("start-up admission failed: {0:?}")]
    Rejected(Vec<RejectedAdmission>),
}

/// Admits the first instance of every configured chain plus the watchdog,
/// aggregating the outcomes. All-or-nothing: on any failure the harness
/// rolls the admitted rest back and reports every failed identity, instead
/// of starting a partial system.
pub struct AdmissionHarness {
    clock: Arc<dyn ClockSource>,
    admission: Arc<dyn Admission>,
    timers: Arc<dyn TimerService>,
    sink: Arc<dyn EventSink>,
    chains: Vec<ChainSpec>,
    watchdog: Option<WatchdogSpec>,
}

impl AdmissionHarness {
    pub fn new(
        clock: Arc<dyn ClockSource>,
        admission: Arc<dyn Admission>,
        timers: Arc<dyn TimerService>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            clock,
            admission,
            timers,
            sink,
            chains: Vec::new(),
            watchdog: None,
        }
    }

    pub fn chain(mut self, spec: ChainSpec) -> Self {
        self.chains.push(spec);
        self
    }

    pub fn watchdog(mut self, spec: WatchdogSpec) -> Self {
        self.watchdog = Some(spec);
        self
    }

    /// Admit everything and hand the system over to the host scheduler.
    ///
    /// On success the admitted instances are already waiting for their
    /// first release (one period after their anchor); the returned
    /// `RunningSystem` is the observation surface. On failure, every
    /// admission that did succeed is revoked before the error is returned.
    pub async fn start(self) -> Result<RunningSystem, StartupError> {
        let registry = Arc::new(ChainRegistry::new());
        let ctx = Arc::new(ChainContext {
            clock: Arc::clone(&self.clock),
            admission: Arc::clone(&self.admission),
            registry: Arc::clone(&registry),
            sink: Arc::clone(&self.sink),
        });

        let mut rejected = Vec::new();
        let mut admitted = Vec::new();
        for spec in &self.chains {
            let anchor = self.clock.now();
            let descriptor = TaskDescriptor::first(
                spec.name.clone(),
                spec.period,
                spec.cpu_burst_secs,
                spec.priority,
                anchor,
            );
            let entry = chain::instance_entry(Arc::clone(&ctx));
            match self.admission.admit(entry, descriptor).await {
                Ok(handle) => {
                    registry.install(spec.name.clone(), handle.instance_id(), InstanceIndex::FIRST);
                    admitted.push(handle);
                }
                Err(err) => rejected.push(RejectedAdmission {
                    identity: spec.name.to_string(),
                    reason: err.to_string(),
                }),
            }
        }

        let mut watchdog_handle = None;
        if let Some(spec) = &self.watchdog {
            match watchdog::start_watchdog(
                self.timers.as_ref(),
                Arc::clone(&self.clock),
                Arc::clone(&self.sink),
                spec,
            )
            .await
            {
                Ok(handle) => watchdog_handle = Some(handle),
                Err(err) => rejected.push(RejectedAdmission {
                    identity: spec.name.clone(),
                    reason: err.to_string(),
                }),
            }
        }

        if !rejected.is_empty() {
            for handle in &admitted {
                handle.revoke();
            }
            if let Some(handle) = &watchdog_handle {
                handle.cancel();
            }
            return Err(StartupError::Rejected(rejected));
        }

        // Dropping the handles detaches the instances; from here on the
        // registry tracks them through their respawn handoffs.
        drop(admitted);
        Ok(RunningSystem {
            registry,
            watchdog: watchdog_handle,
        })
    }
}

/// A started system: the chain registry plus the watchdog handle.
pub struct RunningSystem {
    registry: Arc<ChainRegistry>,
    watchdog: Option<TimerHandle>,
}

impl RunningSystem {
    pub fn registry(&self) -> &Arc<ChainRegistry> {
        &self.registry
    }

    pub fn status(&self) -> SystemStatus {
        self.registry.status()
    }

    pub fn watchdog(&self) -> Option<&TimerHandle> {
        self.watchdog.as_ref()
    }
}
