//! Typed - 型付きメッセージ API
//!
//! このモジュールは discriminator の typo を型で排除し、
//! decode 関数との対応付けを静的に保証します。
//!
//! # 二層構造
//! - **表層（Typed）**: `Message` trait, `Handler<M>` trait - 型安全
//! - **内部（登録表）**: `TypedRegistry<T>` - kind 文字列 → decode 関数

pub mod message;
pub mod handler;
pub mod registry;

// 主要な trait/型 を再エクスポート
pub use self::message::{Message, kind_of};
pub use self::handler::Handler;
pub use self::registry::TypedRegistry;
