//! Transport layer for serial I/O abstraction

use crate::error::Result;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Byte source the line reader frames records from
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read
    ///
    /// Returning `Ok(0)` means no data arrived within the poll interval;
    /// the caller is expected to try again.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;
}
