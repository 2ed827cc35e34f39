use std::error::Error;
use std::fmt;

use crate::codec::{CodecError, Format};
use crate::store::StoreError;

/// Error surfaced to an HTTP client.
///
/// Clients only ever see a fixed plain-text message per kind; the
/// `Display` output carries the detail for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request body could not be decoded.
    MalformedInput(CodecError),
    /// No resource matches the path identity (kept as sent).
    NotFound(String),
    /// Storage failure.
    Store(StoreError),
    /// The response could not be encoded.
    Encode(CodecError),
}

impl ApiError {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MalformedInput(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Store(_) => 500,
            ApiError::Encode(_) => 500,
        }
    }

    /// Plain-text body sent to the client.
    pub fn client_message(&self) -> &'static str {
        match self {
            ApiError::MalformedInput(err) => match err.format() {
                Some(Format::Json) => "Invalid JSON",
                _ => "Invalid XML",
            },
            ApiError::NotFound(_) => "Resource not found",
            ApiError::Store(_) | ApiError::Encode(_) => "Internal Server Error",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::MalformedInput(e) => write!(f, "{}", e),
            ApiError::NotFound(id) => write!(f, "resource {} not found", id),
            ApiError::Store(e) => write!(f, "store error: {}", e),
            ApiError::Encode(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::MalformedInput(e) | ApiError::Encode(e) => Some(e),
            ApiError::Store(e) => Some(e),
            ApiError::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id.to_string()),
            other => ApiError::Store(other),
        }
    }
}

impl From<CodecError> for ApiError {
    fn from(err: CodecError) -> Self {
        if err.is_malformed_input() {
            ApiError::MalformedInput(err)
        } else {
            ApiError::Encode(err)
        }
    }
}
