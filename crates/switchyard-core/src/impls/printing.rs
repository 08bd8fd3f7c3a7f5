//! PrintingHandler - 1 メッセージにつき 1 行を書き出す参照実装

use std::io::Write;

use crate::domain::{StartMessage, StopMessage};
use crate::error::HandlerError;
use crate::typed::{Handler, Message};

/// Writes `handling <kind>: <fields>` for every message it receives.
pub struct PrintingHandler<W> {
    out: W,
}

impl<W: Write> PrintingHandler<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line<M: Message + std::fmt::Display>(&mut self, message: &M) -> Result<(), HandlerError> {
        writeln!(self.out, "handling {}: {message}", M::KIND)?;
        Ok(())
    }
}

impl<W: Write> Handler<StartMessage> for PrintingHandler<W> {
    fn handle(&mut self, message: StartMessage) -> Result<(), HandlerError> {
        self.line(&message)
    }
}

impl<W: Write> Handler<StopMessage> for PrintingHandler<W> {
    fn handle(&mut self, message: StopMessage) -> Result<(), HandlerError> {
        self.line(&message)
    }
}
