//! DispatcherBuilder - Dispatcher の構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 登録時の重複チェック（Fail-fast 設計）

use super::config::DispatcherConfig;
use super::dispatcher::Dispatcher;
use crate::error::RegistryError;
use crate::typed::{Message, TypedRegistry};

/// DispatcherBuilder は Dispatcher を構築
///
/// # 使用例
/// ```ignore
/// let dispatcher = DispatcherBuilder::<Command>::new()
///     .register::<StartMessage>()?
///     .register::<StopMessage>()?
///     .config(DispatcherConfig::strict())
///     .build();
/// ```
///
/// # Fail-fast 設計
/// - 同じ kind の二重登録は register() の時点で RegistryError になる
pub struct DispatcherBuilder<T> {
    registry: TypedRegistry<T>,
    config: DispatcherConfig,
}

impl<T> DispatcherBuilder<T> {
    pub fn new() -> Self {
        Self::from_registry(TypedRegistry::new())
    }

    /// 既存の登録表から始める
    pub fn from_registry(registry: TypedRegistry<T>) -> Self {
        Self {
            registry,
            config: DispatcherConfig::default(),
        }
    }

    pub fn register<M>(mut self) -> Result<Self, RegistryError>
    where
        M: Message + Into<T>,
    {
        self.registry.register::<M>()?;
        Ok(self)
    }

    pub fn config(mut self, config: DispatcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Dispatcher<T> {
        Dispatcher::new(self.registry, self.config)
    }
}

impl<T> Default for DispatcherBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
