//! Implementations of the ports.
//!
//! - **SystemClock / SimulatedClock**: 本番用 / テスト用の tick ソース
//! - **TokioAdmission**: tokio タスクとしてのインスタンス登録（slot 上限つき）
//! - **TokioTimerService**: auto-reload タイマ（任意の ClockSource 上で動く）
//! - **StdoutEventSink / RecordingEventSink**: ログ出力先

pub mod event_sinks;
pub mod sim_clock;
pub mod system_clock;
pub mod tokio_admission;
pub mod tokio_timer;

pub use self::event_sinks::{RecordingEventSink, StdoutEventSink};
pub use self::sim_clock::SimulatedClock;
pub use self::system_clock::SystemClock;
pub use self::tokio_admission::TokioAdmission;
pub use self::tokio_timer::TokioTimerService;
