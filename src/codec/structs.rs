//! Struct codec
//!
//! Encodes a flat, heterogeneous, ordered sequence of fields into one
//! contiguous buffer for a single transport write. Structs are write-only in
//! this contract; no decode path exists.
//!
//! ## String Field Stride
//!
//! String-typed fields occupy the controller's native fixed-size string slot
//! of 81 bytes per element regardless of their own declared width, so every
//! string element is padded out to that stride to keep the following fields
//! aligned.

use crate::error::Result;
use super::scalar;
use super::token::{ScalarKind, STRING_SLOT_WIDTH};
use super::value::Value;

/// One field of a flat struct: a scalar layout and its ordered values
///
/// A field with several values represents an embedded array of that scalar.
#[derive(Debug, Clone)]
pub struct StructField {
    pub kind: ScalarKind,
    pub values: Vec<Value>,
}

impl StructField {
    pub fn new(kind: ScalarKind, values: Vec<Value>) -> Self {
        Self { kind, values }
    }

    /// Wire stride of one element of this field
    fn stride(&self) -> usize {
        match self.kind {
            ScalarKind::String(_) => STRING_SLOT_WIDTH,
            other => other.width(),
        }
    }

    /// Total wire width of this field
    pub fn byte_len(&self) -> usize {
        self.values.len() * self.stride()
    }
}

/// Encode all fields in declaration order into one buffer
pub fn encode_struct(fields: &[StructField]) -> Result<Vec<u8>> {
    let total: usize = fields.iter().map(StructField::byte_len).sum();
    let mut out = Vec::with_capacity(total);

    for field in fields {
        let stride = field.stride();
        for value in &field.values {
            let start = out.len();
            scalar::encode(field.kind, value, &mut out)?;
            // Pad string elements out to the fixed 81-byte slot stride.
            if out.len() - start < stride {
                out.resize(start + stride, 0);
            }
        }
    }

    Ok(out)
}
