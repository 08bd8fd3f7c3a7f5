//! Errors - decode と配送のエラー型
//!
//! どのエラーも consume を即座に打ち切る。リトライや読み飛ばしはしない。

use thiserror::Error;

/// Failure to turn an [`Envelope`](crate::domain::Envelope) into one concrete message.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The envelope was routed to the wrong variant.
    #[error("expected kind {expected:?}, got {actual:?}")]
    KindMismatch {
        expected: &'static str,
        actual: String,
    },

    /// The payload does not fit the variant's field types.
    #[error("unmarshal {kind:?} payload")]
    Payload {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind:?} envelope has no payload")]
    MissingPayload { kind: &'static str },

    /// Only raised in strict decode mode.
    #[error("{kind:?} payload is missing field {field:?}")]
    MissingField { kind: &'static str, field: String },
}

/// Error returned by a message handler. Aborts the stream like any other error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("write: {err}"))
    }
}

/// Fatal outcome of [`Dispatcher::consume`](crate::app::Dispatcher::consume).
///
/// `index` fields are the 1-based ordinal of the envelope being read.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{0:?}: unknown message kind")]
    UnknownKind(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("malformed JSON at envelope #{index}")]
    StreamSyntax {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("envelope #{index} is not a {{\"kind\", \"payload\"}} object")]
    InvalidEnvelope {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("read envelope #{index}")]
    Io {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("handle {kind:?}")]
    Handler {
        kind: String,
        #[source]
        source: HandlerError,
    },
}

impl DispatchError {
    /// Sorts a tokenizer error into syntax, shape, or I/O failure.
    pub(crate) fn from_stream(index: usize, source: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match source.classify() {
            Category::Syntax | Category::Eof => Self::StreamSyntax { index, source },
            Category::Data => Self::InvalidEnvelope { index, source },
            Category::Io => Self::Io { index, source },
        }
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("decoder for kind '{0}' is already registered")]
    AlreadyRegistered(&'static str),
}
