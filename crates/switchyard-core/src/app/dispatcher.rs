//! Dispatcher - envelope ストリームの decode と配送
//!
//! stream → envelope → kind 解決 → payload decode → handler を、
//! ストリーム終端か最初のエラーまで繰り返す。

use std::io::Read;

use tracing::{debug, trace};

use super::builder::DispatcherBuilder;
use super::config::DispatcherConfig;
use super::status::DispatchStats;
use crate::domain::{Command, CommandHandler, Envelope};
use crate::error::{DispatchError, HandlerError, RegistryError};
use crate::typed::TypedRegistry;

/// Decodes a stream of envelopes into `T` and feeds them to a handler.
///
/// Built once, then used read-only.
pub struct Dispatcher<T> {
    registry: TypedRegistry<T>,
    config: DispatcherConfig,
}

impl<T> Dispatcher<T> {
    pub fn new(registry: TypedRegistry<T>, config: DispatcherConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &TypedRegistry<T> {
        &self.registry
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Reads every envelope from `reader` and hands each decoded message to
    /// `handle`, in stream order.
    ///
    /// Envelopes are self-delimiting JSON objects separated by any whitespace.
    /// The first error of any kind stops the loop; nothing after it is read.
    pub fn consume<R, F>(&self, reader: R, mut handle: F) -> Result<DispatchStats, DispatchError>
    where
        R: Read,
        F: FnMut(T) -> Result<(), HandlerError>,
    {
        let result = self.run(reader, &mut handle);
        match &result {
            Ok(stats) => debug!(handled = stats.handled, "stream exhausted"),
            Err(err) => debug!(error = %err, "consume aborted"),
        }
        result
    }

    fn run<R, F>(&self, reader: R, handle: &mut F) -> Result<DispatchStats, DispatchError>
    where
        R: Read,
        F: FnMut(T) -> Result<(), HandlerError>,
    {
        let envelopes = serde_json::Deserializer::from_reader(reader).into_iter::<Envelope>();
        let mut stats = DispatchStats::default();

        for (offset, next) in envelopes.enumerate() {
            let index = offset + 1;
            let envelope = next.map_err(|source| DispatchError::from_stream(index, source))?;
            trace!(index, kind = %envelope.kind, "envelope read");

            let message = self.registry.decode(&envelope, self.config.decode_mode)?;
            debug!(index, kind = %envelope.kind, "envelope decoded");

            handle(message).map_err(|source| DispatchError::Handler {
                kind: envelope.kind.clone(),
                source,
            })?;
            stats.record(&envelope.kind);
        }

        Ok(stats)
    }
}

impl Dispatcher<Command> {
    /// A dispatcher for the full [`Command`] set.
    pub fn for_commands(config: DispatcherConfig) -> Result<Self, RegistryError> {
        Ok(DispatcherBuilder::from_registry(Command::registry()?)
            .config(config)
            .build())
    }

    /// [`consume`](Self::consume) with one handler covering every variant.
    pub fn consume_commands<R, H>(
        &self,
        reader: R,
        handler: &mut H,
    ) -> Result<DispatchStats, DispatchError>
    where
        R: Read,
        H: CommandHandler + ?Sized,
    {
        self.consume(reader, |command| command.dispatch(&mut *handler))
    }
}
