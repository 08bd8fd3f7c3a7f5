//! Config - Dispatcher の設定
//!
//! 既定値 → 設定ファイル（JSON）→ CLI フラグの順に上書きされる。

use serde::{Deserialize, Serialize};

/// How payloads treat fields the variant declares but the payload omits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeMode {
    /// Missing fields take their zero value.
    #[default]
    Permissive,
    /// Missing fields are a decode error.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatcherConfig {
    pub decode_mode: DecodeMode,
}

impl DispatcherConfig {
    pub fn strict() -> Self {
        Self {
            decode_mode: DecodeMode::Strict,
        }
    }
}
