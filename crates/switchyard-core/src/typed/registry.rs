//! TypedRegistry - discriminator から decode 関数への登録表
//!
//! # 学習ポイント
//! - ジェネリック関数を関数ポインタとして HashMap に格納する
//! - `Into<T>` で各 variant を和型 `T` に持ち上げる
//! - 起動時に一度だけ構築し、実行中は参照のみ（ロック不要）

use std::collections::HashMap;

use super::message::Message;
use crate::app::config::DecodeMode;
use crate::domain::Envelope;
use crate::error::{DecodeError, DispatchError, RegistryError};

type DecodeFn<T> = fn(&Envelope, DecodeMode) -> Result<T, DecodeError>;

/// TypedRegistry は kind ごとの decode 関数を管理
///
/// # 使用例
/// ```ignore
/// let mut registry = TypedRegistry::<Command>::new();
/// registry.register::<StartMessage>()?;
///
/// let command = registry.decode(&envelope, DecodeMode::Permissive)?;
/// ```
///
/// # 内部実装
/// - `register::<M>()` が `decode_into::<M, T>` を `M::KIND` で登録
/// - decode 自体は `Envelope::decode_with` に委譲するので kind ごとの追加実装は不要
pub struct TypedRegistry<T> {
    decoders: HashMap<&'static str, DecodeFn<T>>,
}

fn decode_into<M, T>(envelope: &Envelope, mode: DecodeMode) -> Result<T, DecodeError>
where
    M: Message + Into<T>,
{
    envelope.decode_with::<M>(mode).map(Into::into)
}

impl<T> TypedRegistry<T> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    pub fn register<M>(&mut self) -> Result<(), RegistryError>
    where
        M: Message + Into<T>,
    {
        if self.decoders.contains_key(M::KIND) {
            return Err(RegistryError::AlreadyRegistered(M::KIND));
        }
        self.decoders.insert(M::KIND, decode_into::<M, T>);
        Ok(())
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.decoders.contains_key(kind)
    }

    /// Looks the envelope's kind up and decodes its payload.
    pub fn decode(&self, envelope: &Envelope, mode: DecodeMode) -> Result<T, DispatchError> {
        let decode = self
            .decoders
            .get(envelope.kind.as_str())
            .ok_or_else(|| DispatchError::UnknownKind(envelope.kind.clone()))?;
        Ok(decode(envelope, mode)?)
    }

    /// Registered kinds, sorted.
    pub fn registered_kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.decoders.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl<T> Default for TypedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
