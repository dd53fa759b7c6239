//! Request Processor
//!
//! Validates and dispatches one batch of symbolic read/write operations.
//!
//! ## Processing States
//!
//! ```text
//! Received → Validating → { Reading | Writing } → Completed | Failed
//! ```
//!
//! - **Validating**: batch shape checks; rejected batches perform no I/O.
//! - **Reading/Writing**: items processed strictly in order, one scoped
//!   handle and one exactly-sized buffer per item.
//! - **Failed**: fail-fast — the first failing item aborts the remainder of
//!   the batch; the response names the variable and the cause.
//!
//! Type tokens are resolved before any handle is created, so a malformed
//! token never triggers transport traffic for its item. On writes the whole
//! buffer is marshalled up front for the same reason.

use crate::codec::{array, scalar, ItemValue, StructField, TypeToken};
use crate::error::{BridgeError, Result};
use crate::events::{EventSink, LogCategory, LogEvent, TracingSink, Verbosity};
use crate::gateway::{with_handle, ConnectionGateway};
use crate::request::{BatchRequest, BatchResponse, RequestType};

/// Processes batch requests against a connection gateway
///
/// Processing is synchronous and single-threaded per batch: items share one
/// transport context with ordering requirements, so there is no internal
/// parallelism, timeout, or retry.
pub struct RequestProcessor<G: ConnectionGateway> {
    gateway: G,
    sink: Box<dyn EventSink>,
}

impl<G: ConnectionGateway> RequestProcessor<G> {
    /// Create a processor logging through the `tracing` facade
    pub fn new(gateway: G) -> Self {
        Self::with_sink(gateway, Box::new(TracingSink::default()))
    }

    /// Create a processor with an explicit event sink
    pub fn with_sink(gateway: G, sink: Box<dyn EventSink>) -> Self {
        Self { gateway, sink }
    }

    /// Access the underlying gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Consume the processor and return the gateway
    pub fn into_gateway(self) -> G {
        self.gateway
    }

    /// Process one batch request
    ///
    /// Never fails outright: every error ends up in the response's `message`
    /// field, scoped to the offending variable.
    pub fn process(&mut self, request: &BatchRequest) -> BatchResponse {
        let tag = request.correlation_tag();

        // Validating: reject malformed shapes before any I/O.
        let direction = match validate(request) {
            Ok(direction) => direction,
            Err(e) => {
                let message = e.to_string();
                self.emit(LogCategory::Error, &message, Verbosity::Important);
                return BatchResponse::failed(request, request.values.clone(), message);
            }
        };

        self.emit(
            LogCategory::Incoming,
            &format!(
                "Received {} request for {} items (tag: {:08x})",
                request.request_type,
                request.names.len(),
                tag
            ),
            Verbosity::Important,
        );

        let response = match direction {
            RequestType::Read => self.process_read(request, tag),
            RequestType::Write => self.process_write(request, tag),
        };

        if response.is_ok() {
            self.emit(
                LogCategory::Outgoing,
                &format!(
                    "Responded to {} request for {} items (tag: {:08x})",
                    request.request_type,
                    request.names.len(),
                    tag
                ),
                Verbosity::Important,
            );
        }

        response
    }

    /// Write one flat struct as a single transport call
    ///
    /// The whole field sequence is marshalled before the handle is created;
    /// any codec failure therefore never reaches the transport.
    pub fn write_struct(&mut self, name: &str, fields: &[StructField]) -> Result<()> {
        let buf = crate::codec::encode_struct(fields)?;
        with_handle(&mut self.gateway, name, |gw, handle| gw.write(handle, &buf))
    }

    // =========================================================================
    // Per-Direction Item Loops
    // =========================================================================

    fn process_read(&mut self, request: &BatchRequest, tag: u32) -> BatchResponse {
        let mut values = Vec::with_capacity(request.names.len());

        for (name, token) in request.names.iter().zip(&request.types) {
            match self.read_item(name, token) {
                Ok(value) => values.push(value),
                Err(e) => return self.fail_item(request, tag, name, Some(values), e),
            }
        }

        BatchResponse::completed(request, Some(values))
    }

    fn process_write(&mut self, request: &BatchRequest, tag: u32) -> BatchResponse {
        // Validation guarantees a parallel values sequence for writes.
        let Some(supplied) = request.values.as_ref() else {
            let message =
                BridgeError::Validation("Write requests must supply values".to_string())
                    .to_string();
            self.emit(LogCategory::Error, &message, Verbosity::Important);
            return BatchResponse::failed(request, None, message);
        };

        for ((name, token), value) in request.names.iter().zip(&request.types).zip(supplied) {
            if let Err(e) = self.write_item(name, token, value) {
                return self.fail_item(request, tag, name, request.values.clone(), e);
            }
        }

        BatchResponse::completed(request, request.values.clone())
    }

    // =========================================================================
    // Per-Item Dispatch
    // =========================================================================

    /// Read one item: resolve the token, then one scoped handle + buffer
    fn read_item(&mut self, name: &str, raw_token: &str) -> Result<ItemValue> {
        let token = TypeToken::parse(raw_token)?;

        let mut buf = vec![0u8; token.byte_len()];
        with_handle(&mut self.gateway, name, |gw, handle| {
            gw.read(handle, &mut buf)
        })?;

        let mut cursor = buf.as_slice();
        match token {
            TypeToken::Scalar(kind) => Ok(ItemValue::Scalar(scalar::decode(kind, &mut cursor)?)),
            TypeToken::Array(kind, len) => {
                Ok(ItemValue::Array(array::decode(kind, len, &mut cursor)?))
            }
        }
    }

    /// Write one item: marshal fully, then one scoped handle + buffer
    fn write_item(&mut self, name: &str, raw_token: &str, value: &ItemValue) -> Result<()> {
        let token = TypeToken::parse(raw_token)?;

        let mut buf = Vec::with_capacity(token.byte_len());
        match (token, value) {
            (TypeToken::Scalar(kind), ItemValue::Scalar(v)) => scalar::encode(kind, v, &mut buf)?,
            (TypeToken::Array(kind, len), ItemValue::Array(vs)) => {
                array::encode(kind, len, vs, &mut buf)?
            }
            (TypeToken::Scalar(_), ItemValue::Array(_)) => {
                return Err(BridgeError::TypeMismatch {
                    expected: "a single value",
                    got: "value sequence",
                })
            }
            (TypeToken::Array(..), ItemValue::Scalar(_)) => {
                return Err(BridgeError::TypeMismatch {
                    expected: "value sequence",
                    got: "a single value",
                })
            }
        }

        with_handle(&mut self.gateway, name, |gw, handle| gw.write(handle, &buf))
    }

    // =========================================================================
    // Failure Reporting
    // =========================================================================

    /// Build the fail-fast response for the first failing item
    ///
    /// The sink gets the full internal detail; the caller gets a shorter,
    /// variable-scoped summary in `message`.
    fn fail_item(
        &mut self,
        request: &BatchRequest,
        tag: u32,
        name: &str,
        values: Option<Vec<ItemValue>>,
        error: BridgeError,
    ) -> BatchResponse {
        self.emit(
            LogCategory::Error,
            &format!(
                "Error during processing of request (tag: {:08x}), variable '{}': {:?}",
                tag, name, error
            ),
            Verbosity::Important,
        );

        BatchResponse::failed(
            request,
            values,
            format!("Error at variable '{}': {}", name, error),
        )
    }

    fn emit(&self, category: LogCategory, message: &str, verbosity: Verbosity) {
        self.sink.emit(LogEvent::now(category, message, verbosity));
    }
}

// =============================================================================
// Batch Validation
// =============================================================================

/// Check the batch shape; no I/O is performed for a rejected batch
fn validate(request: &BatchRequest) -> Result<RequestType> {
    if request.names.len() != request.types.len() {
        return Err(BridgeError::Validation(
            "Length of 'names' and 'types' must be equal".to_string(),
        ));
    }
    if request.names.is_empty() {
        return Err(BridgeError::Validation(
            "Request must contain at least one item".to_string(),
        ));
    }
    let Some(direction) = RequestType::parse(&request.request_type) else {
        return Err(BridgeError::Validation(
            "Request type must be either 'read' or 'write'".to_string(),
        ));
    };
    if direction == RequestType::Write {
        let supplied = request.values.as_ref().map_or(0, Vec::len);
        if supplied != request.names.len() {
            return Err(BridgeError::Validation(
                "Write requests must supply exactly one value per name".to_string(),
            ));
        }
    }
    Ok(direction)
}
