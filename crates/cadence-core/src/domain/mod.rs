//! Domain model (ticks, periods, IDs, descriptors, events).
//!
//! 値オブジェクトのみ。構築後は不変で、状態遷移はすべて app 層が担います。

pub mod descriptor;
pub mod events;
pub mod ids;
pub mod time;

pub use descriptor::{ChainName, InstanceIndex, Priority, TaskDescriptor};
pub use events::ChainEvent;
pub use ids::{Id, IdMarker, InstanceId, TimerId};
pub use time::{PERIOD_MAX_DECIS, Period, PeriodError, TickCount};
