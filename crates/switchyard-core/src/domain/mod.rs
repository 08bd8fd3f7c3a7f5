//! Domain - Envelope と閉じたメッセージ集合
//!
//! - **envelope**: `kind` と未デコードの payload
//! - **messages**: StartMessage, StopMessage と和型 Command

pub mod envelope;
pub mod messages;

pub use self::envelope::Envelope;
pub use self::messages::{Command, CommandHandler, StartMessage, StopMessage};
