//! HTTP request message.
//!
//! A [`Request`] couples a method, a URI and an optional request-target override
//! with the shared [`MessageHead`] and a body stream. The URI is treated as an
//! opaque value: only its host, path and query are ever consulted.
//!
//! Whenever a URI is attached, the `Host` header is synchronised from the URI's
//! host (see [`Request::with_uri`]).

use http::{Method, Uri};
use tracing::trace;

use crate::ensure;
use crate::protocol::headers::HOST_KEY;
use crate::protocol::message::{MessageHead, sealed};
use crate::protocol::{HttpMessage, MessageError};
use crate::stream::{MemoryStream, MessageStream};

/// Request target used when the URI has no path.
pub const DEFAULT_REQUEST_TARGET: &str = "/";

const HOST_HEADER: &str = "Host";

/// An immutable HTTP request.
#[derive(Debug, Clone)]
pub struct Request<B = MemoryStream> {
    pub(crate) head: MessageHead,
    pub(crate) method: Method,
    pub(crate) uri: Uri,
    pub(crate) request_target: Option<String>,
    pub(crate) body: B,
}

impl Request {
    /// Creates a request with an empty body and protocol version `1.1`.
    ///
    /// The method is case-sensitive and must be a valid token. If `uri` has a
    /// host, it becomes the `Host` header.
    pub fn new(method: &str, uri: Uri) -> Result<Self, MessageError> {
        let method = parse_method(method)?;
        Ok(Request::from_parts(method, uri, MessageHead::default(), MemoryStream::default()))
    }
}

impl<B> Request<B> {
    pub(crate) fn from_parts(method: Method, uri: Uri, head: MessageHead, body: B) -> Self {
        let mut request = Request { head, method, uri, request_target: None, body };
        request.update_host_from_uri(false);
        request
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the target placed on the request line.
    ///
    /// An explicit target set by [`with_request_target`](Self::with_request_target)
    /// wins; otherwise it is the URI path (`"/"` when empty) followed by `?query`
    /// when the URI has a query.
    pub fn request_target(&self) -> String {
        if let Some(target) = &self.request_target {
            return target.clone();
        }

        let path = self.uri.path();
        let mut target = if path.is_empty() { DEFAULT_REQUEST_TARGET.to_owned() } else { path.to_owned() };
        if let Some(query) = self.uri.query() {
            target.push('?');
            target.push_str(query);
        }
        target
    }

    /// Consumes the request and returns its body.
    pub fn into_body(self) -> B {
        self.body
    }

    /// Returns a copy of this request carrying another body.
    pub fn with_body<T: MessageStream>(&self, body: T) -> Request<T> {
        Request {
            head: self.head.clone(),
            method: self.method.clone(),
            uri: self.uri.clone(),
            request_target: self.request_target.clone(),
            body,
        }
    }

    pub(crate) fn update_host_from_uri(&mut self, preserve_host: bool) {
        let Some(host) = self.uri.host().filter(|host| !host.is_empty()) else {
            return;
        };

        if preserve_host && !self.head.headers.get_line(HOST_KEY).is_empty() {
            trace!(uri = %self.uri, "keep existing host header");
            return;
        }

        trace!(%host, "synchronise host header from uri");
        self.head.headers.update(HOST_HEADER, vec![host.to_owned()]);
    }
}

impl<B: Clone> Request<B> {
    /// Returns a copy of this request with another method.
    pub fn with_method(&self, method: &str) -> Result<Self, MessageError> {
        let method = parse_method(method)?;
        let mut request = self.clone();
        request.method = method;
        Ok(request)
    }

    /// Returns a copy of this request with another URI.
    ///
    /// When the new URI has a host, the `Host` header is set from it, unless
    /// `preserve_host` is true and the request already carries a non-empty `Host`
    /// header. A URI without a host leaves the `Host` header untouched.
    pub fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        let mut request = self.clone();
        request.uri = uri;
        request.update_host_from_uri(preserve_host);
        request
    }

    /// Returns a copy of this request with an explicit request target.
    ///
    /// An empty target is normalised to `"/"`.
    pub fn with_request_target(&self, target: &str) -> Result<Self, MessageError> {
        ensure!(
            !target.chars().any(char::is_whitespace),
            MessageError::invalid_argument(format!("request target {target:?} must not contain whitespace"))
        );

        let mut request = self.clone();
        request.request_target = Some(if target.is_empty() { DEFAULT_REQUEST_TARGET } else { target }.to_owned());
        Ok(request)
    }
}

impl<B> sealed::Sealed for Request<B> {
    fn head(&self) -> &MessageHead {
        &self.head
    }

    fn head_mut(&mut self) -> &mut MessageHead {
        &mut self.head
    }
}

impl<B: MessageStream + Clone> HttpMessage for Request<B> {
    type Body = B;

    fn body(&self) -> &B {
        &self.body
    }
}

fn parse_method(method: &str) -> Result<Method, MessageError> {
    Method::from_bytes(method.as_bytes())
        .map_err(|e| MessageError::invalid_argument(format!("invalid http method {method:?}: {e}")))
}
