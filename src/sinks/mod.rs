//! Record sinks for the relay fan-out
//!
//! Each sink accepts every record independently. A failing sink reports its
//! error to the relay, which logs it and moves on to the next sink.

pub mod console;
pub mod log_file;
pub mod udp_broadcast;

pub use console::ConsoleEcho;
pub use log_file::LogAppender;
pub use udp_broadcast::{MAX_DATAGRAM_SIZE, UdpBroadcaster};

use crate::error::Result;
use crate::record::Record;

/// Destination for relayed records
pub trait RecordSink: Send {
    /// Short name used in logs and statistics
    fn name(&self) -> &'static str;

    /// Deliver one record
    fn accept(&mut self, record: &Record) -> Result<()>;
}
