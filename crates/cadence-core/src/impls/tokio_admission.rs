//! TokioAdmission: instances as tokio tasks, with a fixed slot budget.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::TaskDescriptor;
use crate::ports::{Admission, AdmissionError, IdGenerator, InstanceEntry, InstanceHandle};

/// Host admission backed by `tokio::spawn`.
///
/// Capacity is bounded: an admit while the active-instance count is at
/// `max_instances` fails synchronously, the way a kernel with an exhausted
/// heap rejects task creation. The slot frees when the instance body
/// returns. Note that a respawning chain admits its successor before the
/// current instance exits, so it transiently occupies two slots.
///
/// Descriptor priorities are opaque here: the tokio scheduler has no
/// priority lanes and this adapter does not invent any.
pub struct TokioAdmission {
    ids: Arc<dyn IdGenerator>,
    active: Arc<AtomicUsize>,
    max_instances: usize,
}

impl TokioAdmission {
    pub fn new(ids: Arc<dyn IdGenerator>, max_instances: usize) -> Self {
        Self {
            ids,
            active: Arc::new(AtomicUsize::new(0)),
            max_instances,
        }
    }

    /// Instances currently holding a slot.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Admission for TokioAdmission {
    async fn admit(
        &self,
        entry: InstanceEntry,
        descriptor: TaskDescriptor,
    ) -> Result<InstanceHandle, AdmissionError> {
        let claimed = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |active| {
                (active < self.max_instances).then_some(active + 1)
            });
        if claimed.is_err() {
            return Err(AdmissionError::CapacityExhausted {
                active: self.max_instances,
                max: self.max_instances,
            });
        }

        let instance_id = self.ids.instance_id();
        let body = entry(descriptor);
        let active = Arc::clone(&self.active);
        let join = tokio::spawn(async move {
            body.await;
            active.fetch_sub(1, Ordering::SeqCst);
        });
        Ok(InstanceHandle::new(instance_id, join))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainName, Period, Priority, TickCount};
    use crate::ports::UlidGenerator;
    use std::time::Duration;

    fn descriptor(name: &str) -> TaskDescriptor {
        TaskDescriptor::first(
            ChainName::new(name),
            Period::from_decis(10).unwrap(),
            0,
            Priority::new(1),
            TickCount::ZERO,
        )
    }

    fn idle_entry() -> InstanceEntry {
        Arc::new(|_descriptor| {
            Box::pin(async {
                // Park forever; the test only needs the slot occupied.
                std::future::pending::<()>().await;
            })
        })
    }

    #[tokio::test]
    async fn admit_at_capacity_fails() {
        let admission = TokioAdmission::new(Arc::new(UlidGenerator), 1);

        let first = admission.admit(idle_entry(), descriptor("alpha")).await;
        assert!(first.is_ok());

        let second = admission.admit(idle_entry(), descriptor("beta")).await;
        assert!(matches!(
            second,
            Err(AdmissionError::CapacityExhausted { active: 1, max: 1 })
        ));
    }

    #[tokio::test]
    async fn slot_frees_when_the_instance_body_returns() {
        let admission = TokioAdmission::new(Arc::new(UlidGenerator), 1);

        let quick: InstanceEntry = Arc::new(|_descriptor| Box::pin(async {}));
        admission.admit(quick, descriptor("alpha")).await.unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            while admission.active() != 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("slot was never released");

        // Capacity is available again.
        let again = admission.admit(idle_entry(), descriptor("beta")).await;
        assert!(again.is_ok());
    }
}
