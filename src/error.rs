//! Error types for the serial relay

use std::net::SocketAddr;
use std::path::PathBuf;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Relay error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Serial device could not be opened (missing, busy, no permission)
    #[error("Serial device {path} unavailable: {source}")]
    DeviceUnavailable {
        /// Device path that failed to open
        path: String,
        /// Underlying serial port error
        #[source]
        source: serialport::Error,
    },

    /// Connection to the serial device was lost mid-read
    #[error("Serial read failed: {0}")]
    DeviceRead(#[source] std::io::Error),

    /// Broadcast datagram could not be sent
    #[error("UDP send to {target} failed: {source}")]
    Send {
        /// Destination the datagram was addressed to
        target: SocketAddr,
        /// Underlying socket error
        #[source]
        source: std::io::Error,
    },

    /// Record could not be appended to the log file
    #[error("Append to {} failed: {source}", path.display())]
    Persist {
        /// Log file path
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Stop signal observed while waiting for serial data
    #[error("Interrupted by shutdown signal")]
    Interrupted,

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
