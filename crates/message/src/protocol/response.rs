//! HTTP response message.
//!
//! The status code is kept as an [`http::StatusCode`] restricted to `100..=599`;
//! the reason phrase is free text that defaults to the canonical phrase.

use http::StatusCode;

use crate::ensure;
use crate::protocol::message::{MessageHead, sealed};
use crate::protocol::{HttpMessage, MessageError};
use crate::stream::{MemoryStream, MessageStream};

/// An immutable HTTP response.
#[derive(Debug, Clone)]
pub struct Response<B = MemoryStream> {
    pub(crate) head: MessageHead,
    pub(crate) status: StatusCode,
    pub(crate) reason_phrase: String,
    pub(crate) body: B,
}

impl Response {
    /// Creates a response with the canonical reason phrase, no headers and an
    /// empty body.
    pub fn new(status: u16) -> Result<Self, MessageError> {
        let status = parse_status(status)?;
        Ok(Response::from_parts(status, String::new(), MessageHead::default(), MemoryStream::default()))
    }
}

impl Default for Response {
    fn default() -> Self {
        Response::from_parts(StatusCode::OK, String::new(), MessageHead::default(), MemoryStream::default())
    }
}

impl<B> Response<B> {
    pub(crate) fn from_parts(status: StatusCode, reason_phrase: String, head: MessageHead, body: B) -> Self {
        let reason_phrase = if reason_phrase.is_empty() { canonical_reason(status) } else { reason_phrase };
        Response { head, status, reason_phrase, body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn reason_phrase(&self) -> &str {
        &self.reason_phrase
    }

    pub fn into_body(self) -> B {
        self.body
    }

    /// Returns a copy of this response carrying another body.
    pub fn with_body<T: MessageStream>(&self, body: T) -> Response<T> {
        Response { head: self.head.clone(), status: self.status, reason_phrase: self.reason_phrase.clone(), body }
    }
}

impl<B: Clone> Response<B> {
    /// Returns a copy of this response with another status.
    ///
    /// An empty `reason_phrase` falls back to the canonical phrase of `code`, or to
    /// an empty phrase for codes without one.
    pub fn with_status(&self, code: u16, reason_phrase: &str) -> Result<Self, MessageError> {
        let status = parse_status(code)?;
        ensure!(
            !reason_phrase.contains(['\r', '\n']),
            MessageError::invalid_argument(format!("reason phrase {reason_phrase:?} must not contain CR or LF"))
        );

        let mut response = self.clone();
        response.status = status;
        response.reason_phrase =
            if reason_phrase.is_empty() { canonical_reason(status) } else { reason_phrase.to_owned() };
        Ok(response)
    }
}

impl<B> sealed::Sealed for Response<B> {
    fn head(&self) -> &MessageHead {
        &self.head
    }

    fn head_mut(&mut self) -> &mut MessageHead {
        &mut self.head
    }
}

impl<B: MessageStream + Clone> HttpMessage for Response<B> {
    type Body = B;

    fn body(&self) -> &B {
        &self.body
    }
}

fn parse_status(code: u16) -> Result<StatusCode, MessageError> {
    ensure!(
        (100..600).contains(&code),
        MessageError::invalid_argument(format!("status code {code} must be between 100 and 599"))
    );
    StatusCode::from_u16(code).map_err(|e| MessageError::invalid_argument(format!("invalid status code {code}: {e}")))
}

fn canonical_reason(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_owned()
}
