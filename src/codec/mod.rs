//! Format codec — converts records to and from the two wire formats.
//!
//! ## Root labels
//!
//! - a single record encodes under [`RESOURCE_ROOT`]
//! - a collection encodes under [`COLLECTION_ROOT`], one [`RESOURCE_ROOT`] per item
//! - a confirmation encodes under [`MESSAGE_ROOT`]
//!
//! Labels only show up in XML; JSON output is the bare object or array.

mod error;
mod json;
mod xml;

use crate::record::{Confirmation, ResourceRecord};

pub use error::CodecError;
pub use json::decode as decode_json;
pub use xml::decode as decode_xml;

pub const RESOURCE_ROOT: &str = "resource";
pub const COLLECTION_ROOT: &str = "resources";
pub const MESSAGE_ROOT: &str = "response";

/// Wire format of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Xml,
}

impl Format {
    /// Bare media type, as matched against request headers.
    pub fn media_type(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Xml => "application/xml",
        }
    }

    /// Value for an outbound `Content-Type` header.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => "application/json; charset=utf-8",
            Format::Xml => "application/xml; charset=utf-8",
        }
    }
}

/// Something a successful operation hands back for encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Record(ResourceRecord),
    Collection(Vec<ResourceRecord>),
    Message(Confirmation),
}

impl Payload {
    /// Root label matching the payload's cardinality.
    pub fn root_label(&self) -> &'static str {
        match self {
            Payload::Record(_) => RESOURCE_ROOT,
            Payload::Collection(_) => COLLECTION_ROOT,
            Payload::Message(_) => MESSAGE_ROOT,
        }
    }
}

/// Encode a payload under its default root label.
pub fn encode(format: Format, payload: &Payload) -> Result<Vec<u8>, CodecError> {
    encode_with_root(format, payload.root_label(), payload)
}

/// Encode a payload under an explicit root label (ignored for JSON).
pub fn encode_with_root(
    format: Format,
    root: &str,
    payload: &Payload,
) -> Result<Vec<u8>, CodecError> {
    match format {
        Format::Json => json::encode(payload),
        Format::Xml => xml::encode(root, payload),
    }
}
