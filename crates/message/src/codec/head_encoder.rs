//! HTTP/1.x head encoders.
//!
//! Serializes the start line and header section of a [`Request`] or [`Response`]
//! into raw bytes. Headers are written one line per name, in the order the message
//! stores them, so a synchronised `Host` header always comes first. Multiple values
//! are folded with `", "`.
//!
//! The body is never written: moving the body onto the wire, and picking a
//! framing for it, is left to the transport.

use std::io;
use std::io::{ErrorKind, Write};

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{Headers, HttpError, HttpMessage, Request, Response};
use crate::stream::MessageStream;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for request heads implementing the [`Encoder`] trait.
///
/// Writes `{METHOD} {request-target} HTTP/{version}` followed by the headers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestHeadEncoder;

/// Encoder for response heads implementing the [`Encoder`] trait.
///
/// Writes `HTTP/{version} {code} {reason}` followed by the headers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseHeadEncoder;

impl<B: MessageStream + Clone> Encoder<&Request<B>> for RequestHeadEncoder {
    type Error = HttpError;

    /// # Errors
    ///
    /// Returns error if the protocol version has no textual HTTP/1.x head.
    fn encode(&mut self, item: &Request<B>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        ensure_text_version(item.protocol_version())?;

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "{} {} HTTP/{}\r\n", item.method(), item.request_target(), item.protocol_version())?;

        encode_headers(item.headers(), dst);
        Ok(())
    }
}

impl<B: MessageStream + Clone> Encoder<&Response<B>> for ResponseHeadEncoder {
    type Error = HttpError;

    fn encode(&mut self, item: &Response<B>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        ensure_text_version(item.protocol_version())?;

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "HTTP/{} {} {}\r\n", item.protocol_version(), item.status_code(), item.reason_phrase())?;

        encode_headers(item.headers(), dst);
        Ok(())
    }
}

fn ensure_text_version(version: &str) -> io::Result<()> {
    match version {
        "0.9" | "1.0" | "1.1" => Ok(()),
        v => {
            error!(http_version = v, "unsupported http version for a text head");
            Err(io::Error::from(ErrorKind::Unsupported))
        }
    }
}

fn encode_headers(headers: &Headers, dst: &mut BytesMut) {
    for (name, values) in headers {
        dst.put_slice(name.as_bytes());
        dst.put_slice(b": ");
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                dst.put_slice(b", ");
            }
            dst.put_slice(value.as_bytes());
        }
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

/// Fast writer implementation for writing to BytesMut.
///
/// Writing into an already reserved `BytesMut` cannot fail.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::mem::MaybeUninit;

    use http::Uri;
    use indoc::indoc;

    use super::*;
    use crate::stream::MemoryStream;

    #[test]
    fn test_request_head() {
        let request = Request::new("GET", Uri::from_static("http://127.0.0.1:8080/index.html?a=1"))
            .unwrap()
            .with_header("User-Agent", "curl/7.79.1")
            .unwrap()
            .with_header("Accept", ["text/html", "*/*"])
            .unwrap()
            .with_body(MemoryStream::from("ignored"));

        let mut dst = BytesMut::new();
        RequestHeadEncoder.encode(&request, &mut dst).unwrap();

        let expected = indoc! {"
        GET /index.html?a=1 HTTP/1.1\r
        Host: 127.0.0.1\r
        User-Agent: curl/7.79.1\r
        Accept: text/html, */*\r
        \r
        "};
        assert_eq!(std::str::from_utf8(&dst).unwrap(), expected);
    }

    #[test]
    fn test_request_head_parses_back() {
        let request = Request::new("POST", Uri::from_static("/submit"))
            .unwrap()
            .with_header("Content-Type", "application/json")
            .unwrap()
            .with_header("host", "example.com")
            .unwrap()
            .with_protocol_version("1.0")
            .unwrap();

        let mut dst = BytesMut::new();
        RequestHeadEncoder.encode(&request, &mut dst).unwrap();

        let mut parsed = httparse::Request::new(&mut []);
        let mut headers: [MaybeUninit<httparse::Header>; 4] = [const { MaybeUninit::uninit() }; 4];
        let status = parsed.parse_with_uninit_headers(&dst, &mut headers).unwrap();

        assert!(status.is_complete());
        assert_eq!(parsed.method, Some("POST"));
        assert_eq!(parsed.path, Some("/submit"));
        assert_eq!(parsed.version, Some(0));
        assert_eq!(parsed.headers.len(), 2);
        assert_eq!(parsed.headers[0].name, "host");
        assert_eq!(parsed.headers[0].value, b"example.com");
        assert_eq!(parsed.headers[1].name, "Content-Type");
    }

    #[test]
    fn test_response_head() {
        let response = Response::new(404)
            .unwrap()
            .with_header("Content-Length", "0")
            .unwrap()
            .with_added_header("Vary", "Accept")
            .unwrap()
            .with_added_header("vary", "Accept-Encoding")
            .unwrap();

        let mut dst = BytesMut::new();
        ResponseHeadEncoder.encode(&response, &mut dst).unwrap();

        let expected = indoc! {"
        HTTP/1.1 404 Not Found\r
        Content-Length: 0\r
        vary: Accept, Accept-Encoding\r
        \r
        "};
        assert_eq!(std::str::from_utf8(&dst).unwrap(), expected);
    }

    #[test]
    fn test_unsupported_version() {
        let response = Response::default().with_protocol_version("2").unwrap();

        let mut dst = BytesMut::new();
        let result = ResponseHeadEncoder.encode(&response, &mut dst);

        assert!(matches!(result, Err(HttpError::Io { .. })));
        assert!(dst.is_empty());
    }
}
