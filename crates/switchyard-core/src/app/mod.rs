//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **DispatcherBuilder**: 登録表と設定のワイヤリング
//! - **Dispatcher**: envelope ストリームの decode と配送
//! - **DispatcherConfig**: decode モードなどの設定
//! - **DispatchStats**: consume の集計

pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod status;

// 主要な型を再エクスポート
pub use self::builder::DispatcherBuilder;
pub use self::config::{DecodeMode, DispatcherConfig};
pub use self::dispatcher::Dispatcher;
pub use self::status::DispatchStats;
