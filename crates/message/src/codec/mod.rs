//! Wire encoding of message heads.
//!
//! This module turns an immutable [`Request`](crate::protocol::Request) or
//! [`Response`](crate::protocol::Response) into the HTTP/1.x start line and header
//! section a transport writes before the body.
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use http::Uri;
//! use micro_http_message::codec::RequestHeadEncoder;
//! use micro_http_message::protocol::{HttpMessage, Request};
//! use tokio_util::codec::Encoder;
//!
//! let request = Request::new("GET", Uri::from_static("http://example.com/")).unwrap()
//!     .with_header("Accept", "*/*").unwrap();
//!
//! let mut buffer = BytesMut::new();
//! RequestHeadEncoder.encode(&request, &mut buffer).unwrap();
//!
//! assert_eq!(&buffer[..], b"GET / HTTP/1.1\r\nHost: example.com\r\nAccept: */*\r\n\r\n");
//! ```

mod head_encoder;

pub use head_encoder::RequestHeadEncoder;
pub use head_encoder::ResponseHeadEncoder;
