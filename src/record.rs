use std::fmt;

use serde::{Serialize, Serializer};

use crate::fields::PartialUpdate;

/// Unique, never reused identity of a stored resource.
pub type ResourceId = u64;

/// Largest integer a double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A general number as stored on a record. NaN marks input that did not coerce.
///
/// Renders integral values without a fractional part (`5`, not `5.0`), and
/// serializes non-finite values as JSON `null`. Equality treats every NaN as
/// equal to every other NaN, so records holding NaN still compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Numeric(f64);

impl Numeric {
    pub const NAN: Numeric = Numeric(f64::NAN);

    pub fn new(value: f64) -> Self {
        Numeric(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    fn as_integer(self) -> Option<i64> {
        let v = self.0;
        (v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_SAFE_INTEGER).then(|| v as i64)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 || (self.0.is_nan() && other.0.is_nan())
    }
}

impl Eq for Numeric {}

impl Default for Numeric {
    fn default() -> Self {
        Numeric::NAN
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("NaN")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
        } else if let Some(i) = self.as_integer() {
            write!(f, "{}", i)
        } else {
            write!(f, "{}", v)
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            serializer.serialize_none()
        } else if let Some(i) = self.as_integer() {
            serializer.serialize_i64(i)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// The stored entity.
///
/// Every record carries all four fields. Text fields may be absent and are
/// then omitted from encoded output; numeric fields may hold NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: Numeric,
    pub price: Numeric,
}

impl ResourceRecord {
    /// Build a new record from decoded fields. Missing numbers become NaN.
    pub fn from_fields(id: ResourceId, fields: &PartialUpdate) -> Self {
        Self {
            id,
            name: fields.name.as_ref().and_then(|v| v.to_text()),
            description: fields.description.as_ref().and_then(|v| v.to_text()),
            quantity: fields
                .quantity
                .as_ref()
                .map_or(Numeric::NAN, |v| v.to_number()),
            price: fields.price.as_ref().map_or(Numeric::NAN, |v| v.to_number()),
        }
    }

    /// Apply a partial update in place.
    ///
    /// Text fields are replaced only by truthy values. Numeric fields are
    /// replaced whenever the field is present, including `0` and `null`.
    pub fn apply(&mut self, fields: &PartialUpdate) {
        if let Some(name) = fields.name.as_ref().filter(|v| v.is_truthy()) {
            self.name = name.to_text();
        }
        if let Some(description) = fields.description.as_ref().filter(|v| v.is_truthy()) {
            self.description = description.to_text();
        }
        if let Some(quantity) = &fields.quantity {
            self.quantity = quantity.to_number();
        }
        if let Some(price) = &fields.price {
            self.price = price.to_number();
        }
    }
}

/// Confirmation payload returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub message: String,
}

impl Confirmation {
    pub fn deleted(id: ResourceId) -> Self {
        Self {
            message: format!("Resource {} deleted successfully.", id),
        }
    }
}
