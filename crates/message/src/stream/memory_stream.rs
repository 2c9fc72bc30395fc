//! In-memory message body.
//!
//! [`MemoryStream`] wraps a single buffer and a cursor with
//! `0 <= cursor <= buffer.len()`. It is the only mutable value in this crate and
//! has a single owner; there is no internal locking.
//!
//! Besides [`MessageStream`] it implements `std::io::{Read, Write, Seek}` and
//! [`http_body::Body`], so the same value can be handed to code written against
//! either interface.

use std::cmp;
use std::io;
use std::io::SeekFrom;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use http_body::{Body, Frame, SizeHint};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::ensure;
use crate::protocol::StreamError;
use crate::stream::{MessageStream, Whence};

#[derive(Debug, Clone)]
struct Buffer {
    data: BytesMut,
    cursor: usize,
}

impl Buffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    fn read(&mut self, length: usize) -> Bytes {
        let end = self.cursor + cmp::min(length, self.remaining());
        let chunk = Bytes::copy_from_slice(&self.data[self.cursor..end]);
        self.cursor = end;
        chunk
    }
}

/// A readable, writable and seekable buffer held in memory.
///
/// Positions are byte offsets. [`contents`](MemoryStream::contents) decodes the
/// buffer as UTF-8, replacing invalid sequences, since arbitrary bytes may have
/// been written into a buffer created from a string.
#[derive(Debug, Clone)]
pub struct MemoryStream {
    inner: Option<Buffer>,
}

impl Default for MemoryStream {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for MemoryStream {
    fn from(value: &str) -> Self {
        Self::from_bytes(value.as_bytes())
    }
}

impl From<String> for MemoryStream {
    fn from(value: String) -> Self {
        Self::from_bytes(value.as_bytes())
    }
}

impl From<Bytes> for MemoryStream {
    fn from(value: Bytes) -> Self {
        Self::from_bytes(&value)
    }
}

impl MemoryStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::from_bytes(&[])
    }

    /// Creates a stream over `initial` with the cursor at `0`.
    pub fn from_string(initial: &str) -> Self {
        Self::from(initial)
    }

    pub fn from_bytes(initial: &[u8]) -> Self {
        Self { inner: Some(Buffer { data: BytesMut::from(initial), cursor: 0 }) }
    }

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.inner.is_none()
    }

    fn buffer(&self) -> Result<&Buffer, StreamError> {
        self.inner.as_ref().ok_or(StreamError::Detached)
    }

    fn buffer_mut(&mut self) -> Result<&mut Buffer, StreamError> {
        self.inner.as_mut().ok_or(StreamError::Detached)
    }

    pub fn read(&mut self, length: usize) -> Result<Bytes, StreamError> {
        Ok(self.buffer_mut()?.read(length))
    }

    pub fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        let buffer = self.buffer_mut()?;

        let end = buffer.cursor + data.len();
        if end > buffer.data.len() {
            buffer.data.resize(end, 0);
        }
        buffer.data[buffer.cursor..end].copy_from_slice(data);
        buffer.cursor = end;

        Ok(data.len())
    }

    pub fn seek(&mut self, offset: i64, whence: Whence) -> Result<(), StreamError> {
        let buffer = self.buffer_mut()?;

        let base = match whence {
            Whence::Start => 0,
            Whence::Current => buffer.cursor,
            Whence::End => buffer.data.len(),
        };
        let position = i64::try_from(base).ok().and_then(|base| base.checked_add(offset));

        let position = match position.map(usize::try_from) {
            Some(Ok(position)) => position,
            _ => return Err(StreamError::invalid_argument(format!("cannot seek to {offset} from {whence:?}"))),
        };
        ensure!(
            position <= buffer.data.len(),
            StreamError::invalid_argument(format!(
                "seek position {position} is beyond the end of the stream ({})",
                buffer.data.len()
            ))
        );

        buffer.cursor = position;
        Ok(())
    }

    pub fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(0, Whence::Start)
    }

    pub fn tell(&self) -> Result<usize, StreamError> {
        Ok(self.buffer()?.cursor)
    }

    pub fn eof(&self) -> Result<bool, StreamError> {
        Ok(self.buffer()?.remaining() == 0)
    }

    pub fn size(&self) -> Result<usize, StreamError> {
        Ok(self.buffer()?.data.len())
    }

    /// Returns the whole buffer, regardless of the cursor.
    pub fn contents(&self) -> Result<String, StreamError> {
        Ok(String::from_utf8_lossy(&self.buffer()?.data).into_owned())
    }

    /// Returns the unread part of the buffer and moves the cursor to the end.
    pub fn remaining(&mut self) -> Result<String, StreamError> {
        let chunk = self.read(usize::MAX)?;
        Ok(String::from_utf8_lossy(&chunk).into_owned())
    }

    pub fn close(&mut self) {
        if let Some(buffer) = self.inner.take() {
            debug!(size = buffer.data.len(), "memory stream closed");
        }
    }

    pub fn detach(&mut self) -> Option<Bytes> {
        let buffer = self.inner.take()?;
        debug!(size = buffer.data.len(), "memory stream detached");
        Some(buffer.data.freeze())
    }
}

impl MessageStream for MemoryStream {
    fn read(&mut self, length: usize) -> Result<Bytes, StreamError> {
        MemoryStream::read(self, length)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        MemoryStream::write(self, data)
    }

    fn seek(&mut self, offset: i64, whence: Whence) -> Result<(), StreamError> {
        MemoryStream::seek(self, offset, whence)
    }

    fn tell(&self) -> Result<usize, StreamError> {
        MemoryStream::tell(self)
    }

    fn eof(&self) -> Result<bool, StreamError> {
        MemoryStream::eof(self)
    }

    fn size(&self) -> Result<usize, StreamError> {
        MemoryStream::size(self)
    }

    fn is_readable(&self) -> bool {
        !self.is_detached()
    }

    fn is_writable(&self) -> bool {
        !self.is_detached()
    }

    fn is_seekable(&self) -> bool {
        !self.is_detached()
    }

    // no metadata is tracked for in-memory buffers
    fn metadata(&self) -> Result<Map<String, Value>, StreamError> {
        self.buffer()?;
        Ok(Map::new())
    }

    fn metadata_value(&self, _key: &str) -> Result<Option<Value>, StreamError> {
        self.buffer()?;
        Ok(None)
    }

    fn contents(&self) -> Result<String, StreamError> {
        MemoryStream::contents(self)
    }

    fn remaining(&mut self) -> Result<String, StreamError> {
        MemoryStream::remaining(self)
    }

    fn close(&mut self) {
        MemoryStream::close(self);
    }

    fn detach(&mut self) -> Option<Bytes> {
        MemoryStream::detach(self)
    }
}

impl io::Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let chunk = MemoryStream::read(self, buf.len())?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}

impl io::Write for MemoryStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(MemoryStream::write(self, buf)?)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buffer()?;
        Ok(())
    }
}

impl io::Seek for MemoryStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let (offset, whence) = match pos {
            SeekFrom::Start(n) => {
                let offset = i64::try_from(n).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
                (offset, Whence::Start)
            }
            SeekFrom::Current(n) => (n, Whence::Current),
            SeekFrom::End(n) => (n, Whence::End),
        };

        MemoryStream::seek(self, offset, whence)?;
        Ok(MemoryStream::tell(self)? as u64)
    }
}

/// Yields the unread part of the buffer as a single data frame.
impl Body for MemoryStream {
    type Data = Bytes;
    type Error = StreamError;

    fn poll_frame(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let buffer = match self.get_mut().buffer_mut() {
            Ok(buffer) => buffer,
            Err(e) => return Poll::Ready(Some(Err(e))),
        };

        if buffer.remaining() == 0 {
            return Poll::Ready(None);
        }

        let chunk = buffer.read(usize::MAX);
        trace!(size = chunk.len(), "memory stream frame");
        Poll::Ready(Some(Ok(Frame::data(chunk))))
    }

    fn is_end_stream(&self) -> bool {
        self.inner.as_ref().is_some_and(|buffer| buffer.remaining() == 0)
    }

    fn size_hint(&self) -> SizeHint {
        match &self.inner {
            Some(buffer) => SizeHint::with_exact(buffer.remaining() as u64),
            None => SizeHint::with_exact(0),
        }
    }
}
