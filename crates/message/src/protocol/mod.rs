//! Immutable HTTP message types.
//!
//! This module holds the value objects a client hands to its transport and gets
//! back from it. None of them perform I/O.
//!
//! # Architecture
//!
//! - **Headers** ([`headers`]): ordered, case-insensitive, case-preserving storage
//!   - [`Headers`]: declared-case name to values, plus a lowercase name index
//!
//! - **Message contract** ([`message`]): behaviour shared by requests and responses
//!   - [`HttpMessage`]: header reads and copy-on-write header updates
//!
//! - **Input validation** ([`header_input`]): how names and values enter a message
//!   - [`IntoHeaderName`], [`IntoHeaderValues`], [`HeaderKey`]
//!
//! - **Request / Response** ([`request`], [`response`])
//!   - [`Request`]: method, URI, request target and `Host` synchronisation
//!   - [`Response`]: status code and reason phrase
//!
//! - **Error Handling** ([`error`])
//!   - [`HttpError`]: Top-level error type
//!   - [`MessageError`]: Invalid message input
//!   - [`StreamError`]: Invalid stream input or a detached stream
//!
//! # Immutability
//!
//! A message is never modified after construction. Every `with_*` method returns a
//! fresh value whose header map and name index are deep copies, so the original is
//! provably untouched and can be shared freely between readers.

mod headers;
pub use headers::HEADER_LINE_SEPARATOR;
pub use headers::Headers;

mod header_input;
pub use header_input::HeaderKey;
pub use header_input::IntoHeaderName;
pub use header_input::IntoHeaderValues;

mod message;
pub use message::DEFAULT_PROTOCOL_VERSION;
pub use message::HttpMessage;

mod request;
pub use request::DEFAULT_REQUEST_TARGET;
pub use request::Request;

mod response;
pub use response::Response;

mod error;
pub use error::HttpError;
pub use error::MessageError;
pub use error::StreamError;
