//! Codec Module
//!
//! Type-token driven binary codec for the controller's wire layout.
//!
//! ## Type Token Grammar
//!
//! ```text
//! scalar := bool|byte|sint|usint|int|uint|dint|udint|real|lreal|time|date
//!         | string | string<N>
//! token  := scalar | scalar[N]        (no array form for strings)
//! ```
//!
//! ### Widths (bytes, little-endian)
//! - bool, byte: 1
//! - sint, usint: 2
//! - int, uint, real, time, date: 4
//! - dint, udint, lreal: 8
//! - string: 81; string&lt;N&gt;: N
//!
//! Tokens resolve once per batch item into [`TypeToken`]; unknown tokens are
//! rejected before any transport traffic. Values travel as the closed
//! [`Value`] union; mismatched token/value combinations are rejected at the
//! codec boundary instead of cast at runtime.

mod token;
mod value;

pub mod scalar;
pub mod array;
pub mod structs;

pub use token::{ScalarKind, TypeToken, STRING_SLOT_WIDTH};
pub use value::{ItemValue, Value};
pub use structs::{encode_struct, StructField};
