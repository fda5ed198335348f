//! Serial transport implementation

use super::Transport;
use crate::error::{Error, Result};
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::Read;
use std::time::Duration;

/// Serial transport for the sensor UART
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    path: String,
}

impl SerialTransport {
    /// Open a serial port at 8-N-1 with no flow control
    ///
    /// # Arguments
    /// * `path` - Serial port path (e.g., "/dev/ttyATH0")
    /// * `baud_rate` - Baud rate (e.g., 115200)
    /// * `poll_interval` - Read timeout; a timed-out read yields `Ok(0)`
    pub fn open(path: &str, baud_rate: u32, poll_interval: Duration) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(poll_interval)
            .open()
            .map_err(|source| Error::DeviceUnavailable {
                path: path.to_string(),
                source,
            })?;

        log::info!("Opened serial port: {} at {} baud", path, baud_rate);

        Ok(SerialTransport {
            port,
            path: path.to_string(),
        })
    }
}

impl Transport for SerialTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        match self.port.read(buffer) {
            Ok(0) => Err(Error::DeviceRead(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("{} closed", self.path),
            ))),
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(0),
            Err(e) => Err(Error::DeviceRead(e)),
        }
    }
}
