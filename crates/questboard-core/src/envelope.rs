//! The `{success, code, message, data}` response envelope.
//!
//! Every backend call answers with this shape. Decoding turns a failure
//! envelope into [`Error::Remote`] and anything that is not an envelope into
//! [`Error::MalformedResponse`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::error::{Error, RemoteError};

const UNKNOWN_ERROR_CODE: &str = "unknown_error";
const DEFAULT_ERROR_MESSAGE: &str = "API Error";

/// A decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    /// `success: true`.
    Success {
        code: String,
        message: String,
        data: T,
    },
    /// `success: false`.
    Failure {
        code: String,
        message: String,
        data: Option<Value>,
    },
}

impl<T> Envelope<T> {
    /// A success envelope with an empty code and message.
    pub fn success(data: T) -> Self {
        Envelope::Success {
            code: String::new(),
            message: String::new(),
            data,
        }
    }

    /// A failure envelope with no details.
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Envelope::Failure {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns the payload, or the failure as an [`Error::Remote`].
    pub fn into_result(self) -> Result<T> {
        match self {
            Envelope::Success { data, .. } => Ok(data),
            Envelope::Failure {
                code,
                message,
                data,
            } => Err(RemoteError {
                code,
                message,
                data,
            }
            .into()),
        }
    }
}

#[derive(Serialize)]
struct WireEnvelope<'a, T> {
    success: bool,
    code: &'a str,
    message: &'a str,
    data: Option<&'a T>,
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Envelope::Success {
                code,
                message,
                data,
            } => WireEnvelope {
                success: true,
                code,
                message,
                data: Some(data),
            }
            .serialize(serializer),
            Envelope::Failure {
                code,
                message,
                data,
            } => WireEnvelope {
                success: false,
                code,
                message,
                data: data.as_ref(),
            }
            .serialize(serializer),
        }
    }
}

/// Loose view of the envelope head; `data` is decoded only after the
/// discriminant is known.
#[derive(Deserialize)]
struct RawEnvelope {
    success: Option<Value>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

/// Decode a raw response body into its payload.
///
/// # Errors
///
/// - [`Error::MalformedResponse`] if the body is not JSON, has no boolean
///   `success` field, or its `data` does not match `T`.
/// - [`Error::Remote`] if the server reported failure.
pub fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(raw)
        .map_err(|e| Error::malformed(format!("response is not JSON: {e}")))?;
    decode_value(value)
}

/// Decode an already parsed JSON value into its payload.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    parse(value)?.into_result()
}

/// Parse a JSON value into an [`Envelope`] without collapsing failures.
pub fn parse<T: DeserializeOwned>(value: Value) -> Result<Envelope<T>> {
    if !value.is_object() {
        return Err(Error::malformed("response is not a JSON object"));
    }

    let raw: RawEnvelope = serde_json::from_value(value)
        .map_err(|e| Error::malformed(format!("invalid envelope: {e}")))?;

    let success = match raw.success {
        Some(Value::Bool(b)) => b,
        Some(_) => return Err(Error::malformed("`success` is not a boolean")),
        None => return Err(Error::malformed("missing `success` field")),
    };

    if success {
        let data = serde_json::from_value(raw.data)
            .map_err(|e| Error::malformed(format!("unexpected `data` shape: {e}")))?;
        Ok(Envelope::Success {
            code: raw.code.unwrap_or_default(),
            message: raw.message.unwrap_or_default(),
            data,
        })
    } else {
        let code = raw
            .code
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string());
        let message = raw
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
        let data = match raw.data {
            Value::Null => None,
            other => Some(other),
        };
        Ok(Envelope::Failure {
            code,
            message,
            data,
        })
    }
}
