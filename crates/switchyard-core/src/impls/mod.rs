//! Impls - Handler の参照実装
//!
//! # 含まれる実装
//! - **PrintingHandler**: 受け取ったメッセージを 1 行ずつ書き出す

pub mod printing;

pub use self::printing::PrintingHandler;
