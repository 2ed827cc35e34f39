//! Canonical field-set decoded from a request body.
//!
//! Both wire formats decode into their own optional-field type
//! ([`JsonFields`], [`XmlFields`]) and are canonicalized into a
//! [`PartialUpdate`]. Values keep their decoded scalar kind so that
//! coercion into a [`ResourceRecord`](crate::ResourceRecord) can follow
//! permissive number/text/truthiness rules.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::record::Numeric;

/// A single decoded field value, before coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// A JSON array or object.
    Structured(Value),
}

impl FieldValue {
    /// Falsy values are `null`, `false`, `0`, NaN and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::Structured(_) => true,
        }
    }

    /// Permissive numeric coercion. Never fails; unparseable input is NaN.
    pub fn to_number(&self) -> Numeric {
        let value = match self {
            FieldValue::Null => 0.0,
            FieldValue::Bool(true) => 1.0,
            FieldValue::Bool(false) => 0.0,
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => parse_number(s),
            FieldValue::Structured(Value::Array(items)) => match items.as_slice() {
                [] => 0.0,
                [single] => FieldValue::from(single.clone()).to_number().value(),
                _ => f64::NAN,
            },
            FieldValue::Structured(_) => f64::NAN,
        };
        Numeric::new(value)
    }

    /// Text coercion. `null` is treated as absent.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Bool(b) => Some(b.to_string()),
            FieldValue::Number(n) => Some(Numeric::new(*n).to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Structured(v) => Some(v.to_string()),
        }
    }
}

/// Parse a decimal literal the way a dynamic language's `Number(text)` does.
fn parse_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return parse_radix(digits, radix);
        }
    }
    // f64::from_str also accepts "inf" and "nan" spellings
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Unsigned digits of a prefixed literal. No sign, no size limit.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Structured(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Format-independent partial record. `None` means the field was not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUpdate {
    pub name: Option<FieldValue>,
    pub description: Option<FieldValue>,
    pub quantity: Option<FieldValue>,
    pub price: Option<FieldValue>,
}

impl PartialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, value: impl Into<FieldValue>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn with_description(mut self, value: impl Into<FieldValue>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn with_quantity(mut self, value: impl Into<FieldValue>) -> Self {
        self.quantity = Some(value.into());
        self
    }

    pub fn with_price(mut self, value: impl Into<FieldValue>) -> Self {
        self.price = Some(value.into());
        self
    }

    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
    }
}

/// Fields of a JSON request body.
///
/// A field sent as `null` is present (`Some(Value::Null)`); a missing key is `None`.
#[derive(Debug, Default, Deserialize)]
pub struct JsonFields {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl From<JsonFields> for PartialUpdate {
    fn from(fields: JsonFields) -> Self {
        PartialUpdate {
            name: fields.name.map(FieldValue::from),
            description: fields.description.map(FieldValue::from),
            quantity: fields.quantity.map(FieldValue::from),
            price: fields.price.map(FieldValue::from),
        }
    }
}

/// Fields of an XML request body. Leaf element text only.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct XmlFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl From<XmlFields> for PartialUpdate {
    fn from(fields: XmlFields) -> Self {
        PartialUpdate {
            name: fields.name.map(FieldValue::Text),
            description: fields.description.map(FieldValue::Text),
            quantity: fields.quantity.map(FieldValue::Text),
            price: fields.price.map(FieldValue::Text),
        }
    }
}
