//! Observability sink
//!
//! A logging/status channel consumed by the request processor. The sink never
//! influences control flow; it only receives one event when a batch arrives,
//! one when it is answered, and one per failure.

use std::time::SystemTime;

/// Category of a log event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Info,
    Error,
    Incoming,
    Outgoing,
}

/// How important an event is
///
/// Sinks may drop `Verbose` events; `Important` events should always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Verbose,
    Important,
}

impl Default for Verbosity {
    fn default() -> Self {
        Verbosity::Important
    }
}

/// A single event emitted towards the sink
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// When the event occurred
    pub at: SystemTime,

    /// Event category
    pub category: LogCategory,

    /// Human-readable message (full internal detail, not caller-scoped)
    pub message: String,

    /// Importance of the event
    pub verbosity: Verbosity,
}

impl LogEvent {
    /// Create an event timestamped now
    pub fn now(category: LogCategory, message: impl Into<String>, verbosity: Verbosity) -> Self {
        Self {
            at: SystemTime::now(),
            category,
            message: message.into(),
            verbosity,
        }
    }
}

/// Receives log events from the processor
pub trait EventSink {
    fn emit(&self, event: LogEvent);
}

/// Sink that forwards events to the `tracing` facade
///
/// Events below the configured verbosity are forwarded at debug level so an
/// env-filter can still surface them.
#[derive(Debug, Default)]
pub struct TracingSink {
    min_verbosity: Verbosity,
}

impl TracingSink {
    /// Create a sink forwarding events at or above the given verbosity
    pub fn new(min_verbosity: Verbosity) -> Self {
        Self { min_verbosity }
    }
}

impl EventSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        if event.verbosity < self.min_verbosity {
            tracing::debug!(category = ?event.category, "{}", event.message);
            return;
        }
        match event.category {
            LogCategory::Error => tracing::error!("{}", event.message),
            LogCategory::Info => tracing::info!("{}", event.message),
            LogCategory::Incoming | LogCategory::Outgoing => {
                tracing::info!(category = ?event.category, "{}", event.message)
            }
        }
    }
}

/// Sink that discards every event
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: LogEvent) {}
}
