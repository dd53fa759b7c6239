//! Type token parsing
//!
//! Resolves the symbolic type grammar into a closed enum, once per batch item.
//!
//! ## Grammar
//!
//! ```text
//! token  := scalar | scalar "[" N "]"
//! scalar := bool | byte | sint | usint | int | uint | dint | udint
//!         | real | lreal | time | date | string | string "<" N ">"
//! ```
//!
//! A token is array-typed iff it ends with `]` and does not start with
//! `string`: a fixed-length string carries a bracketed-looking suffix of its
//! own (`string<N>`), and `string[N]` is reserved, not an array of strings.

use crate::error::{BridgeError, Result};

/// Fixed slot width of a bare `string` token (80 characters + terminator)
pub const STRING_SLOT_WIDTH: usize = 81;

/// A scalar wire layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Byte,
    Sint,
    Usint,
    Int,
    Uint,
    Dint,
    Udint,
    Real,
    Lreal,
    Time,
    Date,
    /// Fixed-length ANSI string slot of `width` bytes (text + NUL padding)
    String(usize),
}

impl ScalarKind {
    /// Parse a bare scalar name
    pub fn parse(name: &str) -> Result<Self> {
        let kind = match name {
            "bool" => ScalarKind::Bool,
            "byte" => ScalarKind::Byte,
            "sint" => ScalarKind::Sint,
            "usint" => ScalarKind::Usint,
            "int" => ScalarKind::Int,
            "uint" => ScalarKind::Uint,
            "dint" => ScalarKind::Dint,
            "udint" => ScalarKind::Udint,
            "real" => ScalarKind::Real,
            "lreal" => ScalarKind::Lreal,
            "time" => ScalarKind::Time,
            "date" => ScalarKind::Date,
            "string" => ScalarKind::String(STRING_SLOT_WIDTH),
            other => {
                if let Some(rest) = other.strip_prefix("string<") {
                    let digits = rest
                        .strip_suffix('>')
                        .ok_or_else(|| BridgeError::UnsupportedType(other.to_string()))?;
                    let width = parse_positive(digits)
                        .ok_or_else(|| BridgeError::UnsupportedType(other.to_string()))?;
                    ScalarKind::String(width)
                } else {
                    return Err(BridgeError::UnsupportedType(other.to_string()));
                }
            }
        };
        Ok(kind)
    }

    /// Wire width of one element in bytes
    pub fn width(&self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::Byte => 1,
            ScalarKind::Sint | ScalarKind::Usint => 2,
            ScalarKind::Int | ScalarKind::Uint => 4,
            ScalarKind::Dint | ScalarKind::Udint => 8,
            ScalarKind::Real => 4,
            ScalarKind::Lreal => 8,
            ScalarKind::Time | ScalarKind::Date => 4,
            ScalarKind::String(width) => *width,
        }
    }

    /// Scalar name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Byte => "byte",
            ScalarKind::Sint => "sint",
            ScalarKind::Usint => "usint",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Dint => "dint",
            ScalarKind::Udint => "udint",
            ScalarKind::Real => "real",
            ScalarKind::Lreal => "lreal",
            ScalarKind::Time => "time",
            ScalarKind::Date => "date",
            ScalarKind::String(_) => "string",
        }
    }
}

/// A fully resolved type token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeToken {
    /// A single scalar (fixed-length strings included)
    Scalar(ScalarKind),

    /// A homogeneous array of `len` scalars
    Array(ScalarKind, usize),
}

impl TypeToken {
    /// Parse a symbolic type token
    ///
    /// Anything outside the grammar is an `UnsupportedType` error; the caller
    /// treats that as terminal for the current batch item.
    pub fn parse(token: &str) -> Result<Self> {
        if token.ends_with(']') && !token.starts_with("string") {
            let open = token
                .find('[')
                .ok_or_else(|| BridgeError::UnsupportedType(token.to_string()))?;
            let digits = &token[open + 1..token.len() - 1];
            let len = parse_positive(digits)
                .ok_or_else(|| BridgeError::UnsupportedType(token.to_string()))?;
            let kind = ScalarKind::parse(&token[..open])?;
            Ok(TypeToken::Array(kind, len))
        } else {
            Ok(TypeToken::Scalar(ScalarKind::parse(token)?))
        }
    }

    /// The element layout of this token
    pub fn kind(&self) -> ScalarKind {
        match self {
            TypeToken::Scalar(kind) | TypeToken::Array(kind, _) => *kind,
        }
    }

    /// Number of elements transferred for this token
    pub fn element_count(&self) -> usize {
        match self {
            TypeToken::Scalar(_) => 1,
            TypeToken::Array(_, len) => *len,
        }
    }

    /// Total wire width in bytes (element count times element width)
    pub fn byte_len(&self) -> usize {
        self.element_count() * self.kind().width()
    }
}

/// Parse a strictly positive decimal integer
fn parse_positive(digits: &str) -> Option<usize> {
    match digits.parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => None,
    }
}
