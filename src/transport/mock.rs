//! Mock transport for hardware-free testing

use super::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

/// Scripted byte source standing in for the sensor UART
///
/// Clones share the same buffer, so a test can keep one handle to inject
/// bytes while the relay owns another.
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

struct MockTransportInner {
    read_buffer: VecDeque<u8>,
    /// Maximum bytes handed out per read call (simulates partial reads)
    chunk_size: usize,
    /// Report a lost connection once the buffer runs dry
    disconnect_when_drained: bool,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            inner: Arc::new(Mutex::new(MockTransportInner {
                read_buffer: VecDeque::new(),
                chunk_size: usize::MAX,
                disconnect_when_drained: false,
            })),
        }
    }

    /// Mock transport preloaded with `data` that disconnects after it is read
    pub fn scripted(data: &[u8]) -> Self {
        let transport = Self::new();
        transport.inject_read(data);
        transport.disconnect_when_drained();
        transport
    }

    fn lock(&self) -> MutexGuard<'_, MockTransportInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inject data to be read
    pub fn inject_read(&self, data: &[u8]) {
        self.lock().read_buffer.extend(data);
    }

    /// Limit how many bytes a single read returns
    pub fn set_chunk_size(&self, chunk_size: usize) {
        self.lock().chunk_size = chunk_size.max(1);
    }

    /// Fail reads with `DeviceRead` once all injected data is consumed
    pub fn disconnect_when_drained(&self) {
        self.lock().disconnect_when_drained = true;
    }

    /// Bytes injected but not yet read
    pub fn pending(&self) -> usize {
        self.lock().read_buffer.len()
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.lock();

        if inner.read_buffer.is_empty() && inner.disconnect_when_drained {
            return Err(Error::DeviceRead(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "mock device disconnected",
            )));
        }

        let available = inner.read_buffer.len().min(buffer.len()).min(inner.chunk_size);
        for (slot, byte) in buffer.iter_mut().zip(inner.read_buffer.drain(..available)) {
            *slot = byte;
        }

        Ok(available)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
