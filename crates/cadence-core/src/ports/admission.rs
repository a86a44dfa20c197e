//! Admission port: registering a new schedulable instance with the host.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::domain::{InstanceId, TaskDescriptor};

/// Body of one instance, as the host runs it.
pub type InstanceFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Entry point shared by every instance of a chain: given a descriptor,
/// yields the body the host will run for that instance.
pub type InstanceEntry = Arc<dyn Fn(TaskDescriptor) -> InstanceFuture + Send + Sync>;

#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The host has no slot left for another instance.
    #[error("instance capacity exhausted ({active}/{max} slots in use)")]
    CapacityExhausted { active: usize, max: usize },

    /// The host scheduler rejected the instance outright.
    #[error("host scheduler unavailable: {0}")]
    HostUnavailable(String),
}

/// Handle to an admitted instance.
///
/// Opaque on purpose: the id names the instance in logs and the registry,
/// and `revoke` exists solely for the harness's failed-start-up rollback.
/// Admitted instances are otherwise never cancelled.
#[derive(Debug)]
pub struct InstanceHandle {
    instance_id: InstanceId,
    join: JoinHandle<()>,
}

impl InstanceHandle {
    pub fn new(instance_id: InstanceId, join: JoinHandle<()>) -> Self {
        Self { instance_id, join }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    /// Abort the underlying host task. Only called while rolling back a
    /// failed start-up, before the system counts as started.
    pub fn revoke(&self) {
        self.join.abort();
    }
}

/// Admission primitive of the host scheduler.
///
/// The one mutually-exclusive resource in the design: the host serializes
/// admissions internally, and callers must not assume an admit is
/// instantaneous or free of contention.
#[async_trait]
pub trait Admission: Send + Sync {
    /// Admit a new instance. On success the host runs `entry(descriptor)`
    /// as an independent execution context.
    async fn admit(
        &self,
        entry: InstanceEntry,
        descriptor: TaskDescriptor,
    ) -> Result<InstanceHandle, AdmissionError>;
}
