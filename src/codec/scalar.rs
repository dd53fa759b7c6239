//! Scalar codec
//!
//! Encoding and decoding of single scalar values against the controller's
//! fixed little-endian wire layout.
//!
//! ## Wire Widths
//!
//! ```text
//! bool=1  byte=1  sint/usint=2  int/uint=4  dint/udint=8
//! real=4  lreal=8  time=4 (ms)  date=4 (epoch s)
//! string=81  string<N>=N  (ANSI, NUL-padded)
//! ```
//!
//! Numeric tokens accept the matching union variant or locale-invariant text
//! (decimal point, no grouping separators) because the controller firmware
//! formats values invariantly. `byte` is strict: raw 8-bit only, no textual
//! parsing.

use std::time::Duration;

use bytes::{Buf, BufMut};

use crate::error::{BridgeError, Result};
use super::token::ScalarKind;
use super::value::Value;

// =============================================================================
// Decoding
// =============================================================================

/// Decode one scalar, consuming exactly `kind.width()` bytes from the cursor
pub fn decode(kind: ScalarKind, buf: &mut impl Buf) -> Result<Value> {
    if buf.remaining() < kind.width() {
        return Err(BridgeError::Codec(format!(
            "Buffer underrun decoding '{}': {} bytes needed, {} available",
            kind.name(),
            kind.width(),
            buf.remaining()
        )));
    }

    let value = match kind {
        ScalarKind::Bool => Value::Bool(buf.get_u8() != 0),
        ScalarKind::Byte => Value::UInt(buf.get_u8() as u64),
        ScalarKind::Sint => Value::Int(buf.get_i16_le() as i64),
        ScalarKind::Usint => Value::UInt(buf.get_u16_le() as u64),
        ScalarKind::Int => Value::Int(buf.get_i32_le() as i64),
        ScalarKind::Uint => Value::UInt(buf.get_u32_le() as u64),
        ScalarKind::Dint => Value::Int(buf.get_i64_le()),
        ScalarKind::Udint => Value::UInt(buf.get_u64_le()),
        ScalarKind::Real => Value::Float(buf.get_f32_le() as f64),
        ScalarKind::Lreal => Value::Float(buf.get_f64_le()),
        ScalarKind::Time => Value::Duration(Duration::from_millis(buf.get_u32_le() as u64)),
        ScalarKind::Date => Value::Timestamp(buf.get_u32_le() as u64),
        ScalarKind::String(width) => {
            let mut slot = vec![0u8; width];
            buf.copy_to_slice(&mut slot);
            // Fixed-length slot: text runs up to the first terminator,
            // trailing content past it is ignored.
            let end = slot.iter().position(|&b| b == 0).unwrap_or(width);
            Value::Text(String::from_utf8_lossy(&slot[..end]).into_owned())
        }
    };

    Ok(value)
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode one scalar, appending exactly `kind.width()` bytes
pub fn encode(kind: ScalarKind, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    match kind {
        ScalarKind::Bool => out.put_u8(as_bool(value)? as u8),
        ScalarKind::Byte => out.put_u8(as_byte(value)?),
        ScalarKind::Sint => out.put_i16_le(as_signed(value, "sint")? as i16),
        ScalarKind::Usint => out.put_u16_le(as_unsigned(value, "usint")? as u16),
        ScalarKind::Int => out.put_i32_le(as_signed(value, "int")? as i32),
        ScalarKind::Uint => out.put_u32_le(as_unsigned(value, "uint")? as u32),
        ScalarKind::Dint => out.put_i64_le(as_signed(value, "dint")?),
        ScalarKind::Udint => out.put_u64_le(as_unsigned(value, "udint")?),
        ScalarKind::Real => out.put_f32_le(as_float(value, "real")? as f32),
        ScalarKind::Lreal => out.put_f64_le(as_float(value, "lreal")?),
        ScalarKind::Time => out.put_u32_le(as_millis(value)?),
        ScalarKind::Date => out.put_u32_le(as_epoch_seconds(value)?),
        ScalarKind::String(width) => encode_string(value, width, out)?,
    }
    Ok(())
}

/// Encode a fixed-length ANSI string slot
///
/// The slot keeps one byte for the terminator, so text must be at most
/// `width - 1` bytes. Longer text is an error, never a silent truncation.
fn encode_string(value: &Value, width: usize, out: &mut Vec<u8>) -> Result<()> {
    let text = match value {
        Value::Text(text) => text,
        other => {
            return Err(BridgeError::TypeMismatch {
                expected: "text",
                got: other.variant_name(),
            })
        }
    };

    if text.len() > width - 1 {
        return Err(BridgeError::StringOverflow {
            capacity: width - 1,
            got: text.len(),
        });
    }

    out.extend_from_slice(text.as_bytes());
    out.resize(out.len() + (width - text.len()), 0);
    Ok(())
}

// =============================================================================
// Union Coercions
// =============================================================================

fn as_bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(v) => Ok(*v),
        Value::Text(text) => {
            let trimmed = text.trim();
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(parse_error("bool", text))
            }
        }
        other => Err(BridgeError::TypeMismatch {
            expected: "bool",
            got: other.variant_name(),
        }),
    }
}

/// Raw 8-bit value, strict: no textual parsing, no signed/float coercion
fn as_byte(value: &Value) -> Result<u8> {
    match value {
        Value::UInt(v) => {
            u8::try_from(*v).map_err(|_| parse_error("byte", &v.to_string()))
        }
        other => Err(BridgeError::TypeMismatch {
            expected: "byte",
            got: other.variant_name(),
        }),
    }
}

fn as_signed(value: &Value, expected: &'static str) -> Result<i64> {
    let (min, max) = signed_range(expected);
    let v = match value {
        Value::Int(v) => *v,
        Value::UInt(v) => {
            i64::try_from(*v).map_err(|_| parse_error(expected, &v.to_string()))?
        }
        Value::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| parse_error(expected, text))?,
        other => {
            return Err(BridgeError::TypeMismatch {
                expected,
                got: other.variant_name(),
            })
        }
    };
    if v < min || v > max {
        return Err(parse_error(expected, &v.to_string()));
    }
    Ok(v)
}

fn as_unsigned(value: &Value, expected: &'static str) -> Result<u64> {
    let max = unsigned_max(expected);
    let v = match value {
        Value::UInt(v) => *v,
        Value::Int(v) => {
            u64::try_from(*v).map_err(|_| parse_error(expected, &v.to_string()))?
        }
        Value::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| parse_error(expected, text))?,
        other => {
            return Err(BridgeError::TypeMismatch {
                expected,
                got: other.variant_name(),
            })
        }
    };
    if v > max {
        return Err(parse_error(expected, &v.to_string()));
    }
    Ok(v)
}

fn as_float(value: &Value, expected: &'static str) -> Result<f64> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Int(v) => Ok(*v as f64),
        Value::UInt(v) => Ok(*v as f64),
        Value::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| parse_error(expected, text)),
        other => Err(BridgeError::TypeMismatch {
            expected,
            got: other.variant_name(),
        }),
    }
}

/// TIME payload: milliseconds in a u32
fn as_millis(value: &Value) -> Result<u32> {
    let millis = match value {
        Value::Duration(d) => d.as_millis(),
        Value::UInt(v) => *v as u128,
        Value::Int(v) if *v >= 0 => *v as u128,
        Value::Text(text) => parse_invariant_duration(text)?.as_millis(),
        other => {
            return Err(BridgeError::TypeMismatch {
                expected: "time",
                got: other.variant_name(),
            })
        }
    };
    u32::try_from(millis).map_err(|_| parse_error("time", &millis.to_string()))
}

/// DATE payload: seconds since 1970-01-01 in a u32
fn as_epoch_seconds(value: &Value) -> Result<u32> {
    let seconds = match value {
        Value::Timestamp(v) => *v,
        Value::UInt(v) => *v,
        Value::Int(v) if *v >= 0 => *v as u64,
        Value::Text(text) => parse_invariant_date(text)?,
        other => {
            return Err(BridgeError::TypeMismatch {
                expected: "date",
                got: other.variant_name(),
            })
        }
    };
    u32::try_from(seconds).map_err(|_| parse_error("date", &seconds.to_string()))
}

fn parse_error(expected: &'static str, value: &str) -> BridgeError {
    BridgeError::Parse {
        expected,
        value: value.to_string(),
    }
}

fn signed_range(expected: &str) -> (i64, i64) {
    match expected {
        "sint" => (i16::MIN as i64, i16::MAX as i64),
        "int" => (i32::MIN as i64, i32::MAX as i64),
        _ => (i64::MIN, i64::MAX),
    }
}

fn unsigned_max(expected: &str) -> u64 {
    match expected {
        "usint" => u16::MAX as u64,
        "uint" => u32::MAX as u64,
        _ => u64::MAX,
    }
}

// =============================================================================
// Invariant Text Formats
// =============================================================================

/// Parse an invariant duration: plain integer milliseconds or `[D.]HH:MM:SS[.fff]`
pub fn parse_invariant_duration(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    if let Ok(millis) = trimmed.parse::<u64>() {
        return Ok(Duration::from_millis(millis));
    }

    let (days, clock) = match trimmed.split_once('.') {
        // A leading "D." day component only if the clock part still has colons
        Some((d, rest)) if rest.contains(':') && !d.contains(':') => {
            (d.parse::<u64>().map_err(|_| parse_error("time", text))?, rest)
        }
        _ => (0, trimmed),
    };

    let mut parts = clock.split(':');
    let (h, m, s) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => (h, m, s),
        _ => return Err(parse_error("time", text)),
    };

    let hours = h.parse::<u64>().map_err(|_| parse_error("time", text))?;
    let minutes = m.parse::<u64>().map_err(|_| parse_error("time", text))?;
    let (sec_str, frac_millis) = match s.split_once('.') {
        Some((sec, frac)) => (sec, parse_frac_millis(frac).ok_or_else(|| parse_error("time", text))?),
        None => (s, 0),
    };
    let seconds = sec_str.parse::<u64>().map_err(|_| parse_error("time", text))?;
    if minutes > 59 || seconds > 59 {
        return Err(parse_error("time", text));
    }

    // Day/hour components are unbounded text; overflow is a parse error,
    // never a panic.
    let total_millis = days
        .checked_mul(24)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(frac_millis))
        .ok_or_else(|| parse_error("time", text))?;
    Ok(Duration::from_millis(total_millis))
}

/// Fractional seconds to milliseconds (at most 3 digits; finer resolution
/// does not fit the millisecond wire payload and is rejected, not dropped)
fn parse_frac_millis(frac: &str) -> Option<u64> {
    if frac.is_empty() || frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut millis = 0u64;
    for i in 0..3 {
        let digit = frac.as_bytes().get(i).map_or(0, |b| (b - b'0') as u64);
        millis = millis * 10 + digit;
    }
    Some(millis)
}

/// Parse an invariant date: plain integer epoch seconds or `YYYY-MM-DD[ HH:MM:SS]`
pub fn parse_invariant_date(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    if let Ok(seconds) = trimmed.parse::<u64>() {
        return Ok(seconds);
    }

    let (date_part, clock_part) = match trimmed.split_once([' ', 'T']) {
        Some((d, c)) => (d, Some(c)),
        None => (trimmed, None),
    };

    let mut fields = date_part.split('-');
    let (y, m, d) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(y), Some(m), Some(d), None) => (y, m, d),
        _ => return Err(parse_error("date", text)),
    };
    let year = y.parse::<i64>().map_err(|_| parse_error("date", text))?;
    let month = m.parse::<u32>().map_err(|_| parse_error("date", text))?;
    let day = d.parse::<u32>().map_err(|_| parse_error("date", text))?;
    // Years past 9999 cannot fit the u32 epoch payload anyway; bounding here
    // keeps the day arithmetic below overflow.
    if !(1..=9999).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(parse_error("date", text));
    }

    let days = days_from_civil(year, month, day);
    if days < 0 {
        return Err(parse_error("date", text));
    }

    let clock_seconds = match clock_part {
        Some(clock) => {
            let span = parse_invariant_duration(clock)
                .map_err(|_| parse_error("date", text))?;
            if span.as_secs() >= 24 * 3600 {
                return Err(parse_error("date", text));
            }
            span.as_secs()
        }
        None => 0,
    };

    Ok(days as u64 * 86_400 + clock_seconds)
}

/// Days between 1970-01-01 and the given civil date (proleptic Gregorian)
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = i64::from(if month > 2 { month - 3 } else { month + 9 });
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
