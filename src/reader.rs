//! Line framing over a serial transport
//!
//! The device emits newline-terminated records. Bytes arrive in arbitrary
//! chunks, so the reader keeps whatever follows a terminator for the next
//! call. There is no data timeout: `read_line` waits across any number of
//! empty polls, checking only the optional stop flag between them.

use crate::config::SerialConfig;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::transport::{SerialTransport, Transport};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Size of a single transport read
const READ_CHUNK_SIZE: usize = 256;

/// Source of records for the relay loop
pub trait LineSource {
    /// Block until a complete line is available and return it
    fn read_line(&mut self) -> Result<Record>;
}

/// Reads newline-delimited records from a byte transport
///
/// Line length is unbounded: bytes keep accumulating until a `\n` arrives.
pub struct SerialReader<T: Transport> {
    transport: T,
    pending: Vec<u8>,
    chunk: [u8; READ_CHUNK_SIZE],
    running: Option<Arc<AtomicBool>>,
}

impl SerialReader<SerialTransport> {
    /// Open the configured serial device
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let transport = SerialTransport::open(
            &config.device,
            config.baud_rate,
            Duration::from_millis(config.poll_interval_ms),
        )?;
        Ok(Self::new(transport))
    }
}

impl<T: Transport> SerialReader<T> {
    /// Wrap an already opened transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            pending: Vec::new(),
            chunk: [0u8; READ_CHUNK_SIZE],
            running: None,
        }
    }

    /// Give up waiting with `Error::Interrupted` once `running` is cleared
    pub fn with_shutdown(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = Some(running);
        self
    }

    /// Bytes received after the last complete line
    pub fn buffered(&self) -> usize {
        self.pending.len()
    }

    fn take_line(&mut self) -> Option<Record> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let rest = self.pending.split_off(end + 1);
        let line = std::mem::replace(&mut self.pending, rest);
        Some(Record::from_line(line))
    }

    fn stop_requested(&self) -> bool {
        self.running
            .as_ref()
            .is_some_and(|running| !running.load(Ordering::Relaxed))
    }
}

impl<T: Transport> LineSource for SerialReader<T> {
    fn read_line(&mut self) -> Result<Record> {
        loop {
            if let Some(record) = self.take_line() {
                return Ok(record);
            }

            let n = self.transport.read(&mut self.chunk)?;
            if n == 0 {
                if self.stop_requested() {
                    return Err(Error::Interrupted);
                }
                continue;
            }
            self.pending.extend_from_slice(&self.chunk[..n]);
        }
    }
}
