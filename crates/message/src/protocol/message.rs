use crate::protocol::header_input::validate_protocol_version;
use crate::protocol::{HeaderKey, Headers, IntoHeaderName, IntoHeaderValues, MessageError};
use crate::stream::MessageStream;

/// Protocol version every new message starts with.
pub const DEFAULT_PROTOCOL_VERSION: &str = "1.1";

/// The parts shared by requests and responses: protocol version and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHead {
    pub(crate) version: String,
    pub(crate) headers: Headers,
}

impl Default for MessageHead {
    fn default() -> Self {
        Self { version: DEFAULT_PROTOCOL_VERSION.to_owned(), headers: Headers::new() }
    }
}

pub(crate) mod sealed {
    use super::MessageHead;

    pub trait Sealed {
        fn head(&self) -> &MessageHead;

        fn head_mut(&mut self) -> &mut MessageHead;
    }
}

/// Read access and copy-on-write updates shared by [`Request`](crate::protocol::Request)
/// and [`Response`](crate::protocol::Response).
///
/// A message never changes once built. Every `with_*` method clones the message,
/// which deep-copies the header map and its name index, replaces the one field
/// being changed and returns the copy. Validation happens before the clone, so a
/// failed call has no effect at all.
///
/// Header names are matched case-insensitively; the casing used by the caller that
/// last set a header is the casing reported by [`headers`](HttpMessage::headers).
pub trait HttpMessage: sealed::Sealed + Clone {
    type Body: MessageStream;

    /// Returns the protocol version, such as `"1.1"`.
    fn protocol_version(&self) -> &str {
        &self.head().version
    }

    /// Returns a copy of this message with another protocol version.
    fn with_protocol_version(&self, version: &str) -> Result<Self, MessageError> {
        validate_protocol_version(version)?;
        let mut message = self.clone();
        version.clone_into(&mut message.head_mut().version);
        Ok(message)
    }

    /// Returns every header in wire order.
    fn headers(&self) -> &Headers {
        &self.head().headers
    }

    fn has_header(&self, name: impl HeaderKey) -> Result<bool, MessageError> {
        Ok(self.headers().contains(name.header_key()?))
    }

    /// Returns the values of a header, or an empty slice if it is absent.
    fn header(&self, name: impl HeaderKey) -> Result<&[String], MessageError> {
        Ok(self.headers().get(name.header_key()?))
    }

    /// Returns the values of a header joined by `","`, or an empty string if it is
    /// absent.
    fn header_line(&self, name: impl HeaderKey) -> Result<String, MessageError> {
        Ok(self.headers().get_line(name.header_key()?))
    }

    /// Returns a copy of this message where `name` holds exactly `value`.
    ///
    /// Any values previously stored under `name`, in whatever casing, are dropped.
    /// An empty sequence of values removes the header.
    fn with_header(&self, name: impl IntoHeaderName, value: impl IntoHeaderValues) -> Result<Self, MessageError> {
        let name = name.into_header_name()?;
        let values = value.into_header_values()?;

        let mut message = self.clone();
        message.head_mut().headers.update(&name, values);
        Ok(message)
    }

    /// Returns a copy of this message where `value` is appended to the values
    /// already stored under `name`.
    fn with_added_header(&self, name: impl IntoHeaderName, value: impl IntoHeaderValues) -> Result<Self, MessageError> {
        let name = name.into_header_name()?;
        let added = value.into_header_values()?;

        let mut values = self.headers().get(&name).to_vec();
        values.extend(added);

        let mut message = self.clone();
        message.head_mut().headers.update(&name, values);
        Ok(message)
    }

    /// Returns a copy of this message without the header `name`.
    fn without_header(&self, name: impl HeaderKey) -> Result<Self, MessageError> {
        let name = name.header_key()?;

        let mut message = self.clone();
        message.head_mut().headers.update(name, Vec::new());
        Ok(message)
    }

    fn body(&self) -> &Self::Body;
}
