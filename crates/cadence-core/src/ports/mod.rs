//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! ホストスケジューラへの依存はすべてここを経由します。
//!
//! # ポート一覧
//! - **ClockSource**: tick カウンタ（読み取り専用、並行サンプリング可）
//! - **Admission**: インスタンスの登録（ホスト側で直列化される）
//! - **TimerService**: auto-reload ソフトウェアタイマ
//! - **EventSink**: 状態遷移ログの出力先
//! - **IdGenerator**: 不透明ハンドル ID の生成

pub mod admission;
pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod timer;

pub use self::admission::{
    Admission, AdmissionError, InstanceEntry, InstanceFuture, InstanceHandle,
};
pub use self::clock::ClockSource;
pub use self::event_sink::{EventSink, NoopEventSink};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::timer::{TimerCallback, TimerError, TimerHandle, TimerService};
