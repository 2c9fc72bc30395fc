//! Message body streams.
//!
//! A message body is any value implementing [`MessageStream`], the narrow
//! capability set of a readable, writable, seekable buffer. [`MemoryStream`] is
//! the one implementation this crate ships: a fixed in-memory buffer with a
//! cursor.
//!
//! # State machine
//!
//! A stream starts **open** and becomes **detached** after [`close`] or
//! [`detach`]. Detached is terminal: every fallible operation then fails with
//! [`StreamError::Detached`].
//!
//! [`close`]: MessageStream::close
//! [`detach`]: MessageStream::detach

use bytes::Bytes;
use serde_json::{Map, Value};

use crate::protocol::StreamError;

mod memory_stream;
pub use memory_stream::MemoryStream;

/// Reference point of a [`seek`](MessageStream::seek).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Whence {
    /// Offset from the start of the buffer (`SEEK_SET`)
    Start,
    /// Offset from the current position (`SEEK_CUR`)
    Current,
    /// Offset from the end of the buffer (`SEEK_END`)
    End,
}

/// Maps the C `SEEK_SET`, `SEEK_CUR` and `SEEK_END` constants.
impl TryFrom<i32> for Whence {
    type Error = StreamError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Whence::Start),
            1 => Ok(Whence::Current),
            2 => Ok(Whence::End),
            other => Err(StreamError::invalid_argument(format!("unsupported seek whence {other}"))),
        }
    }
}

/// The capability set of a message body.
///
/// Positions and lengths are byte offsets.
pub trait MessageStream {
    /// Reads up to `length` bytes from the cursor and advances the cursor by the
    /// number of bytes actually returned.
    fn read(&mut self, length: usize) -> Result<Bytes, StreamError>;

    /// Writes `data` at the cursor, overwriting and extending the buffer as
    /// needed, and returns the number of bytes written.
    fn write(&mut self, data: &[u8]) -> Result<usize, StreamError>;

    /// Moves the cursor. The resulting position must lie within the buffer.
    fn seek(&mut self, offset: i64, whence: Whence) -> Result<(), StreamError>;

    fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(0, Whence::Start)
    }

    fn tell(&self) -> Result<usize, StreamError>;

    fn eof(&self) -> Result<bool, StreamError>;

    fn size(&self) -> Result<usize, StreamError>;

    fn is_readable(&self) -> bool;

    fn is_writable(&self) -> bool;

    fn is_seekable(&self) -> bool;

    /// Returns every metadata entry of the stream.
    fn metadata(&self) -> Result<Map<String, Value>, StreamError>;

    /// Returns a single metadata entry.
    fn metadata_value(&self, key: &str) -> Result<Option<Value>, StreamError>;

    /// Returns the whole buffer regardless of the cursor, without moving it.
    fn contents(&self) -> Result<String, StreamError>;

    /// Returns everything from the cursor to the end and moves the cursor to the
    /// end.
    fn remaining(&mut self) -> Result<String, StreamError>;

    /// Releases the buffer. Closing twice is a no-op.
    fn close(&mut self);

    /// Releases the buffer and hands it to the caller, or returns `None` when the
    /// stream is already detached.
    fn detach(&mut self) -> Option<Bytes>;
}
