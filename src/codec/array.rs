//! Array codec
//!
//! Repeats the scalar codec over a contiguous buffer. Lengths are strict in
//! both directions: a declared/supplied mismatch on write would desynchronize
//! the byte stream for every subsequent item on the same transport call, so it
//! is rejected before anything is written.

use bytes::Buf;

use crate::error::{BridgeError, Result};
use super::scalar;
use super::token::ScalarKind;
use super::value::Value;

/// Decode exactly `count` elements in order from the cursor
pub fn decode(kind: ScalarKind, count: usize, buf: &mut impl Buf) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        values.push(scalar::decode(kind, buf)?);
    }
    Ok(values)
}

/// Encode a value sequence whose length must equal the declared length
pub fn encode(
    kind: ScalarKind,
    declared_len: usize,
    values: &[Value],
    out: &mut Vec<u8>,
) -> Result<()> {
    if values.len() != declared_len {
        return Err(BridgeError::LengthMismatch {
            supplied: values.len(),
            declared: declared_len,
        });
    }
    for value in values {
        scalar::encode(kind, value, out)?;
    }
    Ok(())
}
