//! App - アプリケーション層
//!
//! ports を組み合わせて release/respawn プロトコルを実装します。
//!
//! # 主要コンポーネント
//! - **release**: anchor 基準の絶対時刻スケジュール + release 待ち
//! - **burst**: CPU バースト消費（意図的な busy-wait）
//! - **chain**: インスタンスのライフサイクル（wait → burst → respawn → terminate）
//! - **registry**: chain 識別子 → 現インスタンスのレジストリ
//! - **watchdog**: 独立した auto-reload ナレーションタイマ
//! - **harness**: 起動時 admission（fail-fast）
//! - **fatal**: 回復不能エラーの停止ポリシー

pub mod burst;
pub mod chain;
pub mod fatal;
pub mod harness;
pub mod registry;
pub mod release;
pub mod watchdog;

pub use self::chain::{ChainContext, instance_entry, run_instance};
pub use self::harness::{
    AdmissionHarness, ChainSpec, RejectedAdmission, RunningSystem, StartupError,
};
pub use self::registry::{ChainRegistry, ChainSlot, ChainState, ChainStatus, SystemStatus};
pub use self::release::{Release, ReleaseSchedule, wait_for_release};
pub use self::watchdog::{WatchdogSpec, start_watchdog};
