//! Request Normalizer — turns a raw body into a [`PartialUpdate`].

use tracing::debug;

use crate::codec::{self, CodecError, Format};
use crate::fields::PartialUpdate;

/// Bare media type without parameters, lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// True when the declared content type is the markup media type.
pub fn is_markup(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| essence(ct) == Format::Xml.media_type())
}

fn is_json(content_type: &str) -> bool {
    let essence = essence(content_type);
    essence == Format::Json.media_type() || essence.ends_with("+json")
}

/// Decode a request body into the canonical field-set.
///
/// Markup bodies go through the XML decoder. Everything else is JSON when
/// the content type is JSON or missing; other media types carry no fields.
/// No validation happens here: absent fields stay absent.
pub fn normalize(content_type: Option<&str>, body: &[u8]) -> Result<PartialUpdate, CodecError> {
    if is_markup(content_type) {
        return codec::decode_xml(body).map(PartialUpdate::from);
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(PartialUpdate::new());
    }
    match content_type {
        Some(ct) if !is_json(ct) => {
            debug!(content_type = ct, "ignoring body of unsupported media type");
            Ok(PartialUpdate::new())
        }
        _ => codec::decode_json(body).map(PartialUpdate::from),
    }
}
