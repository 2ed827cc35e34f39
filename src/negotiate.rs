//! Negotiation Dispatcher — picks the response format from `Accept`.
//!
//! The choice is binary: the exact markup media type selects XML, every
//! other value (or no header) selects JSON. There is no q-value or
//! wildcard handling.

use tracing::error;

use crate::codec::{self, Format, Payload};
use crate::error::ApiError;

pub const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Response format for a client `Accept` value.
pub fn negotiate(accept: Option<&str>) -> Format {
    match accept {
        Some(accept) if accept == Format::Xml.media_type() => Format::Xml,
        _ => Format::Json,
    }
}

/// A fully encoded response, independent of any HTTP framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl NegotiatedResponse {
    /// Encode a successful payload in the given format.
    pub fn encode(format: Format, payload: &Payload) -> Self {
        match codec::encode(format, payload) {
            Ok(body) => Self {
                status: 200,
                content_type: format.content_type(),
                body,
            },
            Err(e) => Self::from_error(&ApiError::from(e)),
        }
    }

    /// Plain-text error response. Errors ignore the negotiated format.
    pub fn from_error(err: &ApiError) -> Self {
        if err.status_code() >= 500 {
            error!(error = %err, "request failed");
        }
        Self {
            status: err.status_code(),
            content_type: PLAIN_TEXT,
            body: err.client_message().as_bytes().to_vec(),
        }
    }

    /// Body as UTF-8 text, for logging and tests.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Encode an operation's outcome for a client with the given `Accept` value.
pub fn respond(accept: Option<&str>, result: Result<Payload, ApiError>) -> NegotiatedResponse {
    match result {
        Ok(payload) => NegotiatedResponse::encode(negotiate(accept), &payload),
        Err(e) => NegotiatedResponse::from_error(&e),
    }
}
