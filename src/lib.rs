//! serial-relay - Serial sensor to UDP broadcast relay
//!
//! Reads newline-delimited telemetry records from a serial-attached sensor,
//! broadcasts each record as a UDP datagram on the local subnet, and appends
//! it to an append-only log file.
//!
//! ## Modules
//!
//! - `transport`: byte sources (`SerialTransport`, `MockTransport`)
//! - `reader`: newline framing into [`Record`]s
//! - `sinks`: console echo, UDP broadcast, log file
//! - `relay`: the sequential read/fan-out loop
//! - `signal`: Ctrl-C/SIGTERM stop flag

pub mod config;
pub mod error;
pub mod reader;
pub mod record;
pub mod relay;
pub mod signal;
pub mod sinks;
pub mod transport;

// Re-export commonly used types
pub use config::RelayConfig;
pub use error::{Error, Result};
pub use reader::{LineSource, SerialReader};
pub use record::Record;
pub use relay::{Relay, RelayStats, SinkStats};
