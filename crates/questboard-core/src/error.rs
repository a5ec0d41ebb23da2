//! Error types for the Quest Board API layer.
//!
//! This module provides a unified error type with explicit variants for
//! local validation, server-reported failures, malformed responses and
//! transport errors.

use std::fmt;
use thiserror::Error;

/// Message shown for failures that carry no useful detail for the user.
pub const GENERIC_FAILURE_MESSAGE: &str = "A network or unexpected error occurred.";

/// The unified error type for Quest Board operations.
///
/// The error is `Clone` so a single failed fetch can be handed to every
/// reader that was waiting on it.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Input rejected locally before any request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The server answered with a failure envelope.
    #[error("remote operation failed: {0}")]
    Remote(#[from] RemoteError),

    /// The response could not be interpreted as an envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] MalformedResponseError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
}

impl Error {
    /// Returns the text a UI should present for this error.
    ///
    /// Validation and remote errors are specific enough to show as-is;
    /// everything else collapses to a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(err) => err.to_string(),
            Error::Remote(err) => err.message.clone(),
            Error::MalformedResponse(_) | Error::Network(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Returns the server-supplied error code, if this is a remote error.
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Error::Remote(err) => Some(&err.code),
            _ => None,
        }
    }

    /// Shorthand for building a [`MalformedResponseError`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResponse(MalformedResponseError {
            reason: reason.into(),
        })
    }
}

/// A failure explicitly reported by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    /// Machine-readable error code (e.g. `no_permission`).
    pub code: String,
    /// Human-readable message from the server.
    pub message: String,
    /// Optional structured details.
    pub data: Option<serde_json::Value>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for RemoteError {}

/// A response body that is not a valid envelope.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct MalformedResponseError {
    /// What was wrong with the body.
    pub reason: String,
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum NetworkError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A constraint a field failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// A required field was absent.
    Required,
    /// A required field was null.
    NotNull,
    /// String is shorter than allowed.
    MinLength { min: usize },
    /// String is longer than allowed.
    MaxLength { max: usize },
    /// Number outside an inclusive range.
    Range { min: i64, max: i64 },
    /// Value was not an integer.
    Integer,
    /// Value was not a well-formed UUID.
    Uuid,
    /// Value was not a well-formed ISO-8601 timestamp.
    Timestamp,
    /// Value was not an e-mail address.
    Email,
    /// Value not among the allowed choices.
    OneOf { allowed: &'static [&'static str] },
    /// A list that must contain at least one element was empty.
    NonEmptyList,
    /// Value had the wrong JSON type.
    Type { expected: &'static str },
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Required => write!(f, "is required"),
            Constraint::NotNull => write!(f, "must not be null"),
            Constraint::MinLength { min: 1 } => write!(f, "must not be empty"),
            Constraint::MinLength { min } => write!(f, "must be at least {min} characters"),
            Constraint::MaxLength { max } => write!(f, "must be at most {max} characters"),
            Constraint::Range { min, max } => write!(f, "must be between {min} and {max}"),
            Constraint::Integer => write!(f, "must be an integer"),
            Constraint::Uuid => write!(f, "must be a UUID"),
            Constraint::Timestamp => write!(f, "must be an ISO-8601 timestamp"),
            Constraint::Email => write!(f, "must be an e-mail address"),
            Constraint::OneOf { allowed } => write!(f, "must be one of {}", allowed.join(", ")),
            Constraint::NonEmptyList => write!(f, "must contain at least one element"),
            Constraint::Type { expected } => write!(f, "must be {expected}"),
        }
    }
}

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Wire name of the field (`title`, `rewordItems[2]`).
    pub field: String,
    /// The constraint that was violated.
    pub constraint: Constraint,
}

/// Input rejected by a schema validator.
///
/// Carries every violation found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Create an error for a single field.
    pub fn field(field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.into(),
                constraint,
            }],
        }
    }

    /// Returns true if the given field has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Returns the offending field names in the order they were found.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{} {}", v.field, v.constraint)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_fields() {
        let err = ValidationError {
            violations: vec![
                FieldViolation {
                    field: "title".into(),
                    constraint: Constraint::MinLength { min: 1 },
                },
                FieldViolation {
                    field: "rank".into(),
                    constraint: Constraint::Range { min: 0, max: 16 },
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "title must not be empty; rank must be between 0 and 16"
        );
        assert_eq!(err.fields(), vec!["title", "rank"]);
    }

    #[test]
    fn network_errors_use_generic_message() {
        let err = Error::Network(NetworkError::Timeout);
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(Error::malformed("bad").remote_code().is_none());
    }

    #[test]
    fn remote_error_exposes_code() {
        let err = Error::Remote(RemoteError {
            code: "no_permission".into(),
            message: "Guild staff permission required.".into(),
            data: None,
        });
        assert_eq!(err.remote_code(), Some("no_permission"));
        assert_eq!(err.user_message(), "Guild staff permission required.");
    }
}
