//! Immutable HTTP messages with an in-memory body stream
//!
//! This crate provides request and response value objects that an HTTP client can
//! hand to, and receive from, its transport. Messages never change after they are
//! built: every `with_*` method returns a new message, leaving the original intact,
//! so a message can be shared between readers without any locking.
//!
//! # Features
//!
//! - Case-insensitive, case-preserving header names
//! - Insertion-ordered headers, with `Host` always first
//! - `Host` synchronisation from the request URI
//! - Request-target derivation from the URI path and query
//! - A seekable in-memory body stream, usable through `std::io` and `http_body`
//! - HTTP/1.x head encoding and conversions to and from the `http` crate
//!
//! # Example
//!
//! ```
//! use http::Uri;
//! use micro_http_message::protocol::{HttpMessage, Request};
//! use micro_http_message::stream::MemoryStream;
//!
//! let request = Request::new("POST", Uri::from_static("http://example.com/items?draft=1")).unwrap();
//! let request = request
//!     .with_header("Content-Type", "application/json").unwrap()
//!     .with_added_header("Accept", "application/json").unwrap()
//!     .with_body(MemoryStream::from_string(r#"{"title":"x"}"#));
//!
//! assert_eq!(request.request_target(), "/items?draft=1");
//! assert_eq!(request.header_line("host").unwrap(), "example.com");
//! assert_eq!(request.header("CONTENT-TYPE").unwrap(), &["application/json".to_owned()]);
//!
//! let names: Vec<&str> = request.headers().iter().map(|(name, _)| name.as_str()).collect();
//! assert_eq!(names, vec!["Host", "Content-Type", "Accept"]);
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`protocol`]: Message types, header storage and errors
//! - [`stream`]: The body stream contract and its in-memory implementation
//! - [`codec`]: HTTP/1.x head encoding
//! - `compat`: `From` / `TryFrom` conversions to and from `http::Request` and
//!   `http::Response`
//!
//! # Error Handling
//!
//! The crate uses custom error types that implement `std::error::Error`:
//!
//! - [`protocol::HttpError`]: Top-level error type
//! - [`protocol::MessageError`]: Invalid input given to a message
//! - [`protocol::StreamError`]: Invalid input given to a stream, or a detached stream
//!
//! Errors are raised before anything is modified: a failed message update never
//! produces a message and a failed stream operation leaves the cursor and buffer
//! as they were.
//!
//! # Limitations
//!
//! - No network I/O: the transport, connection handling and TLS live elsewhere
//! - Bodies are held fully in memory
//! - Only HTTP/1.x heads can be encoded

pub mod codec;
pub mod protocol;
pub mod stream;

mod compat;

mod utils;
pub(crate) use utils::ensure;
