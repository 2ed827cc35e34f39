use serde_json::Value;

use super::{CodecError, Payload};
use crate::fields::JsonFields;

pub(super) fn encode(payload: &Payload) -> Result<Vec<u8>, CodecError> {
    let encoded = match payload {
        Payload::Record(record) => serde_json::to_vec(record),
        Payload::Collection(records) => serde_json::to_vec(records),
        Payload::Message(message) => serde_json::to_vec(message),
    };
    encoded.map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode a JSON body. Anything other than an object carries no fields.
pub fn decode(body: &[u8]) -> Result<JsonFields, CodecError> {
    match serde_json::from_slice::<Value>(body)? {
        object @ Value::Object(_) => Ok(serde_json::from_value(object)?),
        _ => Ok(JsonFields::default()),
    }
}
