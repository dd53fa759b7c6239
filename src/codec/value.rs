//! Value unions
//!
//! Dynamically-typed payloads carried by batch items, as a closed
//! discriminated union instead of loose runtime casting. Conversion to and
//! from wire layouts is total per token and rejects non-matching combinations
//! at the codec boundary.

use std::fmt;
use std::time::Duration;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single dynamically-typed scalar value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),

    /// A PLC TIME span (wire layout: u32 milliseconds)
    Duration(Duration),

    /// A PLC DATE instant (wire layout: u32 seconds since 1970-01-01)
    Timestamp(u64),
}

impl Value {
    /// Variant name used in diagnostics
    pub fn variant_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::UInt(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Duration(_) => "duration",
            Value::Timestamp(_) => "timestamp",
        }
    }
}

/// The value slot of one batch item: a scalar or an ordered value sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Scalar(Value),
    Array(Vec<Value>),
}

// =============================================================================
// JSON Boundary
// =============================================================================
//
// Values cross the system boundary as plain JSON scalars: booleans, numbers
// and strings. Durations serialize as integer milliseconds and timestamps as
// integer epoch seconds; on the way back in, plain numbers arrive as
// Int/UInt/Float and the codec coerces them per type token.

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Duration(v) => {
                // Spans beyond u64 milliseconds saturate instead of wrapping.
                let millis = u64::try_from(v.as_millis()).unwrap_or(u64::MAX);
                serializer.serialize_u64(millis)
            }
            Value::Timestamp(v) => serializer.serialize_u64(*v),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a boolean, number or string")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        if v < 0 {
            Ok(Value::Int(v))
        } else {
            Ok(Value::UInt(v as u64))
        }
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::UInt(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Text(v))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
