//! Message trait - discriminator と型の対応付け
//!
//! # 学習ポイント
//! - Associated Constants (`const KIND`)
//! - Trait bounds の組み合わせ (Serialize + DeserializeOwned + Default + 'static)

use std::fmt::Debug;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Message は discriminator (`kind`) と payload の型を対応付ける
///
/// # 使用例
/// ```ignore
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default)]
/// struct PauseMessage {
///     id: String,
/// }
///
/// impl Message for PauseMessage {
///     const KIND: &'static str = "pause";
/// }
/// ```
///
/// # Trait Bounds
/// - `DeserializeOwned`: payload からの復元のため
/// - `Serialize`: envelope への包み直しと strict モードのフィールド列挙のため
/// - `Default`: payload に無いフィールドをゼロ値で埋めるため（`#[serde(default)]`）
pub trait Message: Serialize + DeserializeOwned + Default + Debug + 'static {
    /// discriminator の文字列リテラル。variant 集合の中で一意であること。
    const KIND: &'static str;
}

/// Returns the discriminator literal of `M`.
pub fn kind_of<M: Message>() -> &'static str {
    M::KIND
}
