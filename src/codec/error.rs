//! Errors raised while decoding or encoding a body.

use std::error::Error;
use std::fmt;

use super::Format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The body is not well-formed in the given format.
    MalformedInput { format: Format, reason: String },
    /// Well-formed XML without the element that holds the fields.
    MissingElement(&'static str),
    /// Writing the output failed.
    Encode(String),
}

impl CodecError {
    pub(crate) fn malformed(format: Format, reason: impl fmt::Display) -> Self {
        CodecError::MalformedInput {
            format,
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by the client's body.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, CodecError::Encode(_))
    }

    /// Format the offending body was declared as.
    pub fn format(&self) -> Option<Format> {
        match self {
            CodecError::MalformedInput { format, .. } => Some(*format),
            CodecError::MissingElement(_) => Some(Format::Xml),
            CodecError::Encode(_) => None,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::MalformedInput { format, reason } => {
                write!(f, "malformed {} body: {}", format.media_type(), reason)
            }
            CodecError::MissingElement(name) => {
                write!(f, "malformed application/xml body: missing <{}> element", name)
            }
            CodecError::Encode(msg) => write!(f, "encode failed: {}", msg),
        }
    }
}

impl Error for CodecError {}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        CodecError::malformed(Format::Json, err)
    }
}
