//! Batch request/response schema
//!
//! The record exchanged at the system boundary. A request carries parallel
//! `names`/`types` sequences plus, for writes, a parallel `values` sequence;
//! the response is a new value derived from the request, never a mutation of
//! caller-owned state.

use serde::{Deserialize, Serialize};

use crate::codec::ItemValue;

/// Direction of a batch request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Read,
    Write,
}

impl RequestType {
    /// Parse the wire spelling; anything else is an unknown direction
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "read" => Some(RequestType::Read),
            "write" => Some(RequestType::Write),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Read => "read",
            RequestType::Write => "write",
        }
    }
}

/// One batch of named-variable operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// Variable names, in processing order (uniqueness not required)
    pub names: Vec<String>,

    /// Symbolic type tokens, parallel to `names`
    pub types: Vec<String>,

    /// "read" or "write"; kept as raw text so unknown directions can be
    /// rejected during validation instead of at deserialization
    pub request_type: String,

    /// Write payloads, parallel to `names` (required for writes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ItemValue>>,

    /// Unused on the way in; populated on the response for errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchRequest {
    /// Build a read request
    pub fn read(names: Vec<String>, types: Vec<String>) -> Self {
        Self {
            names,
            types,
            request_type: RequestType::Read.as_str().to_string(),
            values: None,
            message: None,
        }
    }

    /// Build a write request
    pub fn write(names: Vec<String>, types: Vec<String>, values: Vec<ItemValue>) -> Self {
        Self {
            names,
            types,
            request_type: RequestType::Write.as_str().to_string(),
            values: Some(values),
            message: None,
        }
    }

    /// Audit-only correlation tag, stable for a given batch's content
    ///
    /// Has no bearing on control flow; it only ties log lines of one batch
    /// together.
    pub fn correlation_tag(&self) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(self.request_type.as_bytes());
        for (name, token) in self.names.iter().zip(&self.types) {
            hasher.update(b"\0");
            hasher.update(name.as_bytes());
            hasher.update(b"\0");
            hasher.update(token.as_bytes());
        }
        hasher.finalize()
    }
}

/// The populated answer to one batch request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// Echo of the request's names
    pub names: Vec<String>,

    /// Echo of the request's type tokens
    pub types: Vec<String>,

    /// Echo of the request's direction
    pub request_type: String,

    /// Read results, or the echoed write payloads; on failure, whatever was
    /// populated before the failing item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ItemValue>>,

    /// Variable-scoped failure summary; `None` on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl BatchResponse {
    /// A successful response carrying the populated values
    pub fn completed(request: &BatchRequest, values: Option<Vec<ItemValue>>) -> Self {
        Self {
            names: request.names.clone(),
            types: request.types.clone(),
            request_type: request.request_type.clone(),
            values,
            message: None,
        }
    }

    /// A failed response carrying a caller-facing message
    pub fn failed(
        request: &BatchRequest,
        values: Option<Vec<ItemValue>>,
        message: String,
    ) -> Self {
        Self {
            names: request.names.clone(),
            types: request.types.clone(),
            request_type: request.request_type.clone(),
            values,
            message: Some(message),
        }
    }

    /// Whether processing completed without error
    pub fn is_ok(&self) -> bool {
        self.message.is_none()
    }
}
