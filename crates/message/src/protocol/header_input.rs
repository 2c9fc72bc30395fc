//! Conversions from caller input into validated header names and values.
//!
//! Statically typed callers hand over `&str`, `String` or `http` types and only
//! hit the syntax checks. Dynamically typed callers (configuration files, JSON
//! payloads, scripting bridges) hand over a [`serde_json::Value`], which is
//! additionally checked for being a string, or a sequence of strings for values.
//!
//! Names must be RFC 7230 tokens. Values are stored exactly as given and must not
//! contain CR, LF or other control characters.

use http::{HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;

use crate::ensure;
use crate::protocol::MessageError;

/// A value that can be turned into a declared-case header name.
pub trait IntoHeaderName {
    fn into_header_name(self) -> Result<String, MessageError>;
}

/// A value that can be turned into an ordered sequence of header values.
pub trait IntoHeaderValues {
    fn into_header_values(self) -> Result<Vec<String>, MessageError>;
}

/// A value usable to look a header up.
///
/// Lookups only check that the input is string-typed; a name that is not a
/// valid token simply never matches.
pub trait HeaderKey {
    fn header_key(&self) -> Result<&str, MessageError>;
}

fn validate_name(name: &str) -> Result<(), MessageError> {
    if let Err(e) = HeaderName::from_bytes(name.as_bytes()) {
        debug!(name, "rejected header name");
        return Err(MessageError::invalid_argument(format!("header name {name:?} is not a valid token: {e}")));
    }
    Ok(())
}

fn validate_value(value: &str) -> Result<String, MessageError> {
    if let Err(e) = HeaderValue::from_bytes(value.as_bytes()) {
        debug!(value, "rejected header value");
        return Err(MessageError::invalid_argument(format!("header value {value:?} is not valid: {e}")));
    }
    Ok(value.to_owned())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl IntoHeaderName for &str {
    fn into_header_name(self) -> Result<String, MessageError> {
        validate_name(self)?;
        Ok(self.to_owned())
    }
}

impl IntoHeaderName for String {
    fn into_header_name(self) -> Result<String, MessageError> {
        validate_name(&self)?;
        Ok(self)
    }
}

impl IntoHeaderName for &String {
    fn into_header_name(self) -> Result<String, MessageError> {
        self.as_str().into_header_name()
    }
}

impl IntoHeaderName for HeaderName {
    fn into_header_name(self) -> Result<String, MessageError> {
        Ok(self.as_str().to_owned())
    }
}

impl IntoHeaderName for &HeaderName {
    fn into_header_name(self) -> Result<String, MessageError> {
        Ok(self.as_str().to_owned())
    }
}

impl IntoHeaderName for &Value {
    fn into_header_name(self) -> Result<String, MessageError> {
        match self {
            Value::String(name) => name.as_str().into_header_name(),
            other => Err(MessageError::invalid_argument(format!(
                "header name must be a string, got {}",
                value_kind(other)
            ))),
        }
    }
}

impl IntoHeaderValues for &str {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        Ok(vec![validate_value(self)?])
    }
}

impl IntoHeaderValues for String {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.as_str().into_header_values()
    }
}

impl IntoHeaderValues for &String {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.as_str().into_header_values()
    }
}

impl IntoHeaderValues for &[&str] {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.iter().map(|value| validate_value(value)).collect()
    }
}

impl<const N: usize> IntoHeaderValues for [&str; N] {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.as_slice().into_header_values()
    }
}

impl IntoHeaderValues for &[String] {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.iter().map(|value| validate_value(value)).collect()
    }
}

impl IntoHeaderValues for Vec<String> {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.as_slice().into_header_values()
    }
}

impl IntoHeaderValues for Vec<&str> {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        self.as_slice().into_header_values()
    }
}

impl IntoHeaderValues for HeaderValue {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        (&self).into_header_values()
    }
}

impl IntoHeaderValues for &HeaderValue {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        validate_value(&String::from_utf8_lossy(self.as_bytes())).map(|value| vec![value])
    }
}

impl IntoHeaderValues for &Value {
    fn into_header_values(self) -> Result<Vec<String>, MessageError> {
        match self {
            Value::String(value) => value.as_str().into_header_values(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(value) => validate_value(value),
                    other => Err(MessageError::invalid_argument(format!(
                        "header values must be strings, got {}",
                        value_kind(other)
                    ))),
                })
                .collect(),
            other => Err(MessageError::invalid_argument(format!(
                "header value must be a string or an array of strings, got {}",
                value_kind(other)
            ))),
        }
    }
}

impl HeaderKey for str {
    fn header_key(&self) -> Result<&str, MessageError> {
        Ok(self)
    }
}

impl HeaderKey for String {
    fn header_key(&self) -> Result<&str, MessageError> {
        Ok(self.as_str())
    }
}

impl HeaderKey for HeaderName {
    fn header_key(&self) -> Result<&str, MessageError> {
        Ok(self.as_str())
    }
}

impl HeaderKey for Value {
    fn header_key(&self) -> Result<&str, MessageError> {
        match self {
            Value::String(name) => Ok(name.as_str()),
            other => Err(MessageError::invalid_argument(format!(
                "header name must be a string, got {}",
                value_kind(other)
            ))),
        }
    }
}

impl<T: HeaderKey + ?Sized> HeaderKey for &T {
    fn header_key(&self) -> Result<&str, MessageError> {
        (**self).header_key()
    }
}

/// Checks a protocol version such as `"1.1"` or `"2"`.
pub(crate) fn validate_protocol_version(version: &str) -> Result<(), MessageError> {
    ensure!(!version.is_empty(), MessageError::invalid_argument("protocol version must not be empty"));
    ensure!(
        !version.chars().any(char::is_whitespace),
        MessageError::invalid_argument(format!("protocol version {version:?} must not contain whitespace"))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_names() {
        assert_eq!("X-Foo".into_header_name().unwrap(), "X-Foo");
        assert_eq!(String::from("content-type").into_header_name().unwrap(), "content-type");
        assert_eq!(http::header::ACCEPT.into_header_name().unwrap(), "accept");
        assert_eq!((&json!("X-Bar")).into_header_name().unwrap(), "X-Bar");
    }

    #[test]
    fn test_invalid_names() {
        assert!(matches!("".into_header_name(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!("X Foo".into_header_name(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!("X-Foo:".into_header_name(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!((&json!(123)).into_header_name(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!((&json!(["a"])).into_header_name(), Err(MessageError::InvalidArgument { .. })));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        assert_eq!(" \tgzip \t".into_header_values().unwrap(), vec![" \tgzip \t".to_owned()]);
        assert_eq!(["a ", " b"].into_header_values().unwrap(), vec!["a ".to_owned(), " b".to_owned()]);
        assert_eq!("".into_header_values().unwrap(), vec![String::new()]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!("a\r\nX-Injected: 1".into_header_values(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!(["ok", "bad\n"].into_header_values(), Err(MessageError::InvalidArgument { .. })));
    }

    #[test]
    fn test_json_values() {
        assert_eq!((&json!("v")).into_header_values().unwrap(), vec!["v".to_owned()]);
        assert_eq!((&json!(["1", "2"])).into_header_values().unwrap(), vec!["1".to_owned(), "2".to_owned()]);
        assert!((&json!([])).into_header_values().unwrap().is_empty());

        assert!(matches!((&json!(123)).into_header_values(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!((&json!(null)).into_header_values(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!((&json!(["1", 2])).into_header_values(), Err(MessageError::InvalidArgument { .. })));
        assert!(matches!((&json!({"a": "b"})).into_header_values(), Err(MessageError::InvalidArgument { .. })));
    }

    #[test]
    fn test_keys() {
        assert_eq!("x-foo".header_key().unwrap(), "x-foo");
        assert_eq!(json!("x-foo").header_key().unwrap(), "x-foo");
        assert!(matches!(json!(1).header_key(), Err(MessageError::InvalidArgument { .. })));
    }

    #[test]
    fn test_protocol_version() {
        assert!(validate_protocol_version("1.1").is_ok());
        assert!(validate_protocol_version("2").is_ok());
        assert!(validate_protocol_version("").is_err());
        assert!(validate_protocol_version("1 .1").is_err());
    }
}
