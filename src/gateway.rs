//! Connection gateway
//!
//! The transport boundary towards the controller. The processor consumes this
//! interface and nothing else; establishing and tearing down the underlying
//! connection is the gateway implementation's concern.
//!
//! ## Handle Lifecycle
//!
//! A handle is valid for exactly one read or write call: the processor creates
//! it, performs the transfer, and deletes it before moving to the next batch
//! item or propagating an error.

use std::collections::HashMap;

use crate::error::{BridgeError, Result};

/// Opaque transport-side identifier for a named remote variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub u32);

/// Transport operations the processor needs
///
/// Each method maps to one round-trip against the controller. Calls are
/// blocking and potentially slow; the processor performs no timeout or retry
/// around them.
pub trait ConnectionGateway {
    /// Resolve a variable name to a handle
    fn create_handle(&mut self, name: &str) -> Result<Handle>;

    /// Read exactly `buf.len()` bytes of the variable behind `handle`
    fn read(&mut self, handle: Handle, buf: &mut [u8]) -> Result<()>;

    /// Write `buf` to the variable behind `handle`
    fn write(&mut self, handle: Handle, buf: &[u8]) -> Result<()>;

    /// Release a handle (infallible; a failed release is not actionable)
    fn delete_handle(&mut self, handle: Handle);
}

/// Run `f` with a freshly created handle, releasing it on every exit path
pub fn with_handle<G, T, F>(gateway: &mut G, name: &str, f: F) -> Result<T>
where
    G: ConnectionGateway + ?Sized,
    F: FnOnce(&mut G, Handle) -> Result<T>,
{
    let handle = gateway.create_handle(name)?;
    let outcome = f(gateway, handle);
    gateway.delete_handle(handle);
    outcome
}

// =============================================================================
// In-Process Gateway
// =============================================================================

/// In-process gateway backed by a byte image per variable
///
/// Stands in for a real controller connection in tests, benchmarks and the
/// CLI. Unknown variables fail handle creation. All transport traffic is
/// counted so callers can assert exactly which calls were made.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    /// Variable name -> current byte image
    images: HashMap<String, Vec<u8>>,

    /// Currently open handles (handle -> variable name)
    open: HashMap<Handle, String>,

    next_handle: u32,

    handles_created: usize,
    read_calls: usize,
    write_calls: usize,
}

impl MemoryGateway {
    /// Create an empty gateway with no variables defined
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a variable with an initial byte image
    pub fn define(&mut self, name: impl Into<String>, image: Vec<u8>) {
        self.images.insert(name.into(), image);
    }

    /// Define a variable as `len` zero bytes
    pub fn define_zeroed(&mut self, name: impl Into<String>, len: usize) {
        self.images.insert(name.into(), vec![0u8; len]);
    }

    /// Current byte image of a variable, if defined
    pub fn image(&self, name: &str) -> Option<&[u8]> {
        self.images.get(name).map(|v| v.as_slice())
    }

    /// Number of handles created so far
    pub fn handles_created(&self) -> usize {
        self.handles_created
    }

    /// Number of handles not yet released (0 after any well-behaved batch)
    pub fn open_handles(&self) -> usize {
        self.open.len()
    }

    /// Number of read calls performed
    pub fn read_calls(&self) -> usize {
        self.read_calls
    }

    /// Number of write calls performed
    pub fn write_calls(&self) -> usize {
        self.write_calls
    }

    fn variable(&self, handle: Handle) -> Result<&str> {
        self.open
            .get(&handle)
            .map(|s| s.as_str())
            .ok_or_else(|| BridgeError::Transport(format!("Stale handle {:?}", handle)))
    }
}

impl ConnectionGateway for MemoryGateway {
    fn create_handle(&mut self, name: &str) -> Result<Handle> {
        if !self.images.contains_key(name) {
            return Err(BridgeError::Transport(format!(
                "No such variable: '{}'",
                name
            )));
        }
        self.next_handle += 1;
        self.handles_created += 1;
        let handle = Handle(self.next_handle);
        self.open.insert(handle, name.to_string());
        Ok(handle)
    }

    fn read(&mut self, handle: Handle, buf: &mut [u8]) -> Result<()> {
        self.read_calls += 1;
        let name = self.variable(handle)?.to_string();
        let image = &self.images[&name];
        if image.len() < buf.len() {
            return Err(BridgeError::Transport(format!(
                "Variable '{}' holds {} bytes, {} requested",
                name,
                image.len(),
                buf.len()
            )));
        }
        buf.copy_from_slice(&image[..buf.len()]);
        Ok(())
    }

    fn write(&mut self, handle: Handle, buf: &[u8]) -> Result<()> {
        self.write_calls += 1;
        let name = self.variable(handle)?.to_string();
        self.images.insert(name, buf.to_vec());
        Ok(())
    }

    fn delete_handle(&mut self, handle: Handle) {
        self.open.remove(&handle);
    }
}
