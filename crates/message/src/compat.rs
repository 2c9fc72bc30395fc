//! Conversions between this crate's messages and the `http` crate's types.
//!
//! These let a transport built on `http::Request` / `http::Response` consume and
//! produce immutable messages:
//!
//! - `http` to message is infallible. Header names arrive lowercased, as `http`
//!   stores them, and an existing `Host` header is kept rather than overwritten
//!   from the URI.
//! - message to `http` fails when the protocol version has no `http::Version`
//!   counterpart or an explicit request target is not a valid URI. A custom reason
//!   phrase is dropped, since `http::Response` has nowhere to keep it.

use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Uri, Version};

use crate::protocol::{Headers, MessageError, Request, Response};

impl<B> TryFrom<Request<B>> for http::Request<B> {
    type Error = MessageError;

    fn try_from(request: Request<B>) -> Result<Self, Self::Error> {
        let version = to_http_version(&request.head.version)?;
        let uri = match &request.request_target {
            Some(target) => target
                .parse::<Uri>()
                .map_err(|e| MessageError::invalid_argument(format!("request target {target:?} is not a uri: {e}")))?,
            None => request.uri,
        };
        let headers = to_header_map(&request.head.headers)?;

        let mut inner = http::Request::new(request.body);
        *inner.method_mut() = request.method;
        *inner.uri_mut() = uri;
        *inner.version_mut() = version;
        *inner.headers_mut() = headers;
        Ok(inner)
    }
}

impl<B> From<http::Request<B>> for Request<B> {
    fn from(request: http::Request<B>) -> Self {
        let (parts, body) = request.into_parts();

        let mut converted = Request::from_parts(parts.method, Uri::default(), Default::default(), body);
        converted.head.version = from_http_version(parts.version).to_owned();
        converted.head.headers = from_header_map(&parts.headers);
        converted.uri = parts.uri;
        converted.update_host_from_uri(true);
        converted
    }
}

impl<B> TryFrom<Response<B>> for http::Response<B> {
    type Error = MessageError;

    fn try_from(response: Response<B>) -> Result<Self, Self::Error> {
        let version = to_http_version(&response.head.version)?;
        let headers = to_header_map(&response.head.headers)?;

        let mut inner = http::Response::new(response.body);
        *inner.status_mut() = response.status;
        *inner.version_mut() = version;
        *inner.headers_mut() = headers;
        Ok(inner)
    }
}

impl<B> From<http::Response<B>> for Response<B> {
    fn from(response: http::Response<B>) -> Self {
        let (parts, body) = response.into_parts();

        let mut converted = Response::from_parts(parts.status, String::new(), Default::default(), body);
        converted.head.version = from_http_version(parts.version).to_owned();
        converted.head.headers = from_header_map(&parts.headers);
        converted
    }
}

fn to_http_version(version: &str) -> Result<Version, MessageError> {
    match version {
        "0.9" => Ok(Version::HTTP_09),
        "1.0" => Ok(Version::HTTP_10),
        "1.1" => Ok(Version::HTTP_11),
        "2" | "2.0" => Ok(Version::HTTP_2),
        "3" | "3.0" => Ok(Version::HTTP_3),
        other => Err(MessageError::invalid_argument(format!("unsupported protocol version {other:?}"))),
    }
}

fn from_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, MessageError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, values) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| MessageError::invalid_argument(format!("invalid header name {name:?}: {e}")))?;
        for value in values {
            let value = HeaderValue::from_bytes(value.as_bytes())
                .map_err(|e| MessageError::invalid_argument(format!("invalid header value {value:?}: {e}")))?;
            map.append(name.clone(), value);
        }
    }
    Ok(map)
}

fn from_header_map(map: &HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for name in map.keys() {
        let values = map.get_all(name).iter().map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned()).collect();
        headers.update(name.as_str(), values);
    }
    headers
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode, header};

    use super::*;
    use crate::protocol::HttpMessage;
    use crate::stream::MemoryStream;

    #[test]
    fn test_request_into_http() {
        let request = Request::new("PUT", Uri::from_static("http://example.com/items/1"))
            .unwrap()
            .with_header("Accept", ["text/plain", "application/json"])
            .unwrap()
            .with_protocol_version("2")
            .unwrap()
            .with_body(MemoryStream::from("{}"));

        let inner = http::Request::<MemoryStream>::try_from(request).unwrap();

        assert_eq!(inner.method(), Method::PUT);
        assert_eq!(inner.uri(), "http://example.com/items/1");
        assert_eq!(inner.version(), Version::HTTP_2);
        assert_eq!(inner.headers().get(header::HOST).unwrap(), "example.com");
        assert_eq!(inner.headers().get_all(header::ACCEPT).iter().count(), 2);
        assert_eq!(inner.body().contents().unwrap(), "{}");
    }

    #[test]
    fn test_request_target_into_http() {
        let request = Request::new("OPTIONS", Uri::from_static("http://example.com/")).unwrap();

        let inner = http::Request::<MemoryStream>::try_from(request.with_request_target("*").unwrap()).unwrap();
        assert_eq!(inner.uri(), "*");

        let unknown = request.with_protocol_version("4.2").unwrap();
        assert!(matches!(http::Request::<MemoryStream>::try_from(unknown), Err(MessageError::InvalidArgument { .. })));
    }

    #[test]
    fn test_request_from_http() {
        let inner = http::Request::builder()
            .method(Method::POST)
            .uri("http://example.org:8080/submit?x=1")
            .version(Version::HTTP_10)
            .header("X-Trace", "abc")
            .header(header::HOST, "proxy.local")
            .body(MemoryStream::from("data"))
            .unwrap();

        let request = Request::from(inner);

        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.protocol_version(), "1.0");
        assert_eq!(request.request_target(), "/submit?x=1");
        assert_eq!(request.header_line("Host").unwrap(), "proxy.local");
        assert_eq!(request.header("x-trace").unwrap(), &["abc".to_owned()]);
        assert_eq!(request.body().contents().unwrap(), "data");
    }

    #[test]
    fn test_request_from_http_fills_missing_host() {
        let inner = http::Request::builder().uri("http://example.org:8080/").body(MemoryStream::new()).unwrap();

        let request = Request::from(inner);

        assert_eq!(request.header_line("host").unwrap(), "example.org");
        assert_eq!(request.headers().iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(), vec!["Host"]);
    }

    #[test]
    fn test_response_round_trip() {
        let inner = http::Response::builder()
            .status(StatusCode::CREATED)
            .header(header::LOCATION, "/items/2")
            .body(MemoryStream::new())
            .unwrap();

        let response = Response::from(inner);
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.reason_phrase(), "Created");
        assert_eq!(response.header_line("Location").unwrap(), "/items/2");

        let back = http::Response::<MemoryStream>::try_from(response.with_status(202, "Queued").unwrap()).unwrap();
        assert_eq!(back.status(), StatusCode::ACCEPTED);
        assert_eq!(back.headers().get(header::LOCATION).unwrap(), "/items/2");
    }
}
