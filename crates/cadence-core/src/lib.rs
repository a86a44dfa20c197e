//! cadence-core
//!
//! Core building blocks for the Cadence runtime: periodic task chains that
//! release on an absolute schedule, consume a declared CPU burst, and hand
//! off to a freshly admitted successor instance before terminating. An
//! independent watchdog timer narrates on its own cadence. The host
//! scheduler is reached only through ports and is never reimplemented.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（time, ids, descriptor, events）
//! - **ports**: 抽象化レイヤー（ClockSource, Admission, TimerService, EventSink, IdGenerator）
//! - **app**: アプリケーションロジック（release, burst, chain, registry, watchdog, harness, fatal）
//! - **impls**: 実装（SystemClock, SimulatedClock, TokioAdmission, TokioTimerService, sinks）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
