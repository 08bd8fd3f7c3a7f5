//! switchyard-core
//!
//! `kind` で識別される JSON envelope のストリームを、閉じた型集合へ decode して
//! handler に配送するためのビルディングブロック。
//!
//! # モジュール構成
//! - **domain**: Envelope と具体的なメッセージ集合（StartMessage, StopMessage, Command）
//! - **typed**: 型付き API（Message trait, Handler trait, TypedRegistry）
//! - **app**: Dispatcher, DispatcherBuilder, 設定, 集計
//! - **impls**: Handler の参照実装（PrintingHandler）
//! - **error**: エラー型

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod typed;

pub use app::{DecodeMode, DispatchStats, Dispatcher, DispatcherBuilder, DispatcherConfig};
pub use domain::{Command, CommandHandler, Envelope, StartMessage, StopMessage};
pub use error::{DecodeError, DispatchError, HandlerError, RegistryError};
pub use typed::{Handler, Message, TypedRegistry, kind_of};

/// The three envelopes the demo mode replays.
pub const SAMPLE_STREAM: &str = r#"
{"kind": "start", "payload": {"memory": 4, "num_cpu": 8}}
{"kind": "stop",  "payload": {"id": "6870b39"}}
{"kind": "start", "payload": {"memory": 32, "num_cpu": 4}}
"#;
