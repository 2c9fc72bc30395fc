use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("message error: {source}")]
    MessageError {
        #[from]
        source: MessageError,
    },

    #[error("stream error: {source}")]
    StreamError {
        #[from]
        source: StreamError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// Errors raised while building or transforming a message.
///
/// Every failure is a caller input error: nothing here is transient and none of
/// the message operations retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl MessageError {
    pub fn invalid_argument<S: ToString>(str: S) -> Self {
        Self::InvalidArgument { reason: str.to_string() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// The stream was closed or detached; this state is terminal.
    #[error("stream is detached")]
    Detached,
}

impl StreamError {
    pub fn invalid_argument<S: ToString>(str: S) -> Self {
        Self::InvalidArgument { reason: str.to_string() }
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        matches!(self, StreamError::Detached)
    }
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::InvalidArgument { .. } => io::Error::new(io::ErrorKind::InvalidInput, e),
            StreamError::Detached => io::Error::other(e),
        }
    }
}
