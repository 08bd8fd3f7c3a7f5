//! Messages - このクレートが扱う閉じたメッセージ集合
//!
//! # kind の追加手順
//! 1. 構造体を定義して [`Message`] を実装する
//! 2. [`Command`] に variant を追加する
//! 3. [`Command::registry`] に `register` を 1 行追加する
//!
//! [`Command::kind`] と [`Command::dispatch`] の match が網羅的でなければ
//! コンパイルが通らない。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HandlerError, RegistryError};
use crate::typed::{Handler, Message, TypedRegistry};

/// Asks for a machine with the given resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartMessage {
    /// Memory in GB.
    pub memory: i64,
    pub num_cpu: i64,
}

impl Message for StartMessage {
    const KIND: &'static str = "start";
}

impl fmt::Display for StartMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "memory={}GB num_cpu={}", self.memory, self.num_cpu)
    }
}

/// Stops the machine identified by `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopMessage {
    pub id: String,
}

impl Message for StopMessage {
    const KIND: &'static str = "stop";
}

impl fmt::Display for StopMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id={}", self.id)
    }
}

/// Any decoded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(StartMessage),
    Stop(StopMessage),
}

impl From<StartMessage> for Command {
    fn from(message: StartMessage) -> Self {
        Self::Start(message)
    }
}

impl From<StopMessage> for Command {
    fn from(message: StopMessage) -> Self {
        Self::Stop(message)
    }
}

/// A handler for every [`Command`] variant.
pub trait CommandHandler: Handler<StartMessage> + Handler<StopMessage> {}

impl<H> CommandHandler for H where H: Handler<StartMessage> + Handler<StopMessage> {}

impl Command {
    /// Decode table for every variant.
    pub fn registry() -> Result<TypedRegistry<Command>, RegistryError> {
        let mut registry = TypedRegistry::new();
        registry.register::<StartMessage>()?;
        registry.register::<StopMessage>()?;
        Ok(registry)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Start(_) => StartMessage::KIND,
            Self::Stop(_) => StopMessage::KIND,
        }
    }

    /// Hands the message to the matching `Handler` impl.
    pub fn dispatch<H: CommandHandler + ?Sized>(self, handler: &mut H) -> Result<(), HandlerError> {
        match self {
            Self::Start(message) => Handler::<StartMessage>::handle(handler, message),
            Self::Stop(message) => Handler::<StopMessage>::handle(handler, message),
        }
    }
}
