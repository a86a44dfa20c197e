//! Instance lifecycle: wait → burst → respawn → terminate.
//!
//! A chain "loops" by being an unbounded sequence of one-shot instances.
//! Each instance waits for its own release, consumes its burst, admits its
//! successor and then terminates — it never resumes after the handoff.

use std::sync::Arc;

use crate::domain::{ChainEvent, TaskDescriptor};
use crate::ports::{Admission, ClockSource, EventSink, InstanceEntry, InstanceFuture};

use super::burst;
use super::registry::ChainRegistry;
use super::release::{self, Release, ReleaseSchedule};

/// Everything an instance body needs from its environment.
pub struct ChainContext {
    pub clock: Arc<dyn ClockSource>,
    pub admission: Arc<dyn Admission>,
    pub registry: Arc<ChainRegistry>,
    pub sink: Arc<dyn EventSink>,
}

/// The entry point handed to the admission primitive, shared by every
/// instance of every chain. The descriptor alone distinguishes instances.
pub fn instance_entry(ctx: Arc<ChainContext>) -> InstanceEntry {
    Arc::new(move |descriptor| run_instance(Arc::clone(&ctx), descriptor))
}

/// One complete instance lifecycle.
pub fn run_instance(ctx: Arc<ChainContext>, descriptor: TaskDescriptor) -> InstanceFuture {
    Box::pin(async move {
        let clock = ctx.clock.as_ref();
        let schedule = ReleaseSchedule::new(
            descriptor.anchor(),
            descriptor.period().ticks(clock.tick_hz()),
        );

        // The single scheduler-visible wait of the lifecycle.
        let released =
            release::wait_for_release(clock, schedule, descriptor.instance_index()).await;
        if let Release::Late { scheduled, at } = released {
            ctx.sink.emit(ChainEvent::DeadlineMissed {
                chain: descriptor.name().clone(),
                instance: descriptor.instance_index(),
                scheduled,
                at,
            });
        }

        ctx.sink.emit(ChainEvent::ChainStarted {
            chain: descriptor.name().clone(),
            instance: descriptor.instance_index(),
            at: released.at(),
        });

        burst::run_burst(
            clock,
            ctx.sink.as_ref(),
            descriptor.name(),
            descriptor.instance_index(),
            descriptor.cpu_burst_secs(),
        )
        .await;

        ctx.sink.emit(ChainEvent::ChainFinished {
            chain: descriptor.name().clone(),
            instance: descriptor.instance_index(),
            at: clock.now(),
        });

        // Single-owner handoff. A rejected successor ends the chain: no
        // retry, but the termination is logged and recorded.
        let successor = descriptor.successor();
        let entry = instance_entry(Arc::clone(&ctx));
        match ctx.admission.admit(entry, successor.clone()).await {
            Ok(handle) => {
                ctx.registry.install(
                    successor.name().clone(),
                    handle.instance_id(),
                    successor.instance_index(),
                );
            }
            Err(err) => {
                ctx.sink.emit(ChainEvent::SuccessorRejected {
                    chain: successor.name().clone(),
                    instance: successor.instance_index(),
                    reason: err.to_string(),
                    at: clock.now(),
                });
                ctx.registry
                    .mark_terminated(descriptor.name(), err.to_string());
            }
        }
    })
}
