//! Relay orchestration
//!
//! A single sequential loop: read one record, hand it to every sink in
//! order, repeat. Nothing is buffered or pipelined, so a record is fully
//! echoed, broadcast, and logged before the next read begins.
//!
//! ```text
//!                 ┌──────────────┐
//!                 │ SerialReader │  (blocks until a full line)
//!                 └──────┬───────┘
//!                        │ Record
//!      ┌─────────────────┼──────────────────┐
//!      ▼                 ▼                  ▼
//! ┌─────────────┐ ┌────────────────┐ ┌─────────────┐
//! │ ConsoleEcho │ │ UdpBroadcaster │ │ LogAppender │
//! └─────────────┘ └────────────────┘ └─────────────┘
//! ```
//!
//! Sink failures are isolated per sink and per record. Read failures end
//! the loop.

use crate::config::RelayConfig;
use crate::error::{Error, Result};
use crate::reader::{LineSource, SerialReader};
use crate::record::Record;
use crate::sinks::{ConsoleEcho, LogAppender, RecordSink, UdpBroadcaster};
use crate::transport::SerialTransport;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How often statistics are logged while records flow
const STATS_INTERVAL: Duration = Duration::from_secs(60);

/// Delivery counters for one sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub name: &'static str,
    pub delivered: u64,
    pub failed: u64,
}

/// Counters for the whole relay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayStats {
    /// Records read from the source
    pub records: u64,
    /// Per-sink counters, in fan-out order
    pub sinks: Vec<SinkStats>,
}

impl RelayStats {
    /// Counters for the sink called `name`
    pub fn sink(&self, name: &str) -> Option<&SinkStats> {
        self.sinks.iter().find(|s| s.name == name)
    }
}

/// Reads records from a source and fans each one out to the sinks
pub struct Relay<S: LineSource> {
    source: S,
    sinks: Vec<Box<dyn RecordSink>>,
    running: Arc<AtomicBool>,
    stats: RelayStats,
}

impl Relay<SerialReader<SerialTransport>> {
    /// Open the serial device and broadcast socket described by `config`
    ///
    /// Fan-out order is console echo (if enabled), broadcast, then log.
    pub fn from_config(config: &RelayConfig, running: Arc<AtomicBool>) -> Result<Self> {
        info!(
            "Opening serial device {} at {} baud",
            config.serial.device, config.serial.baud_rate
        );
        let reader = SerialReader::open(&config.serial)?.with_shutdown(Arc::clone(&running));

        let broadcaster = UdpBroadcaster::open(&config.broadcast)?;
        let appender = LogAppender::new(&config.log.path);
        info!("Appending records to {}", appender.path().display());

        let mut relay = Relay::new(reader, running);
        if config.console.echo {
            relay = relay.with_sink(ConsoleEcho::stdout());
        }
        Ok(relay.with_sink(broadcaster).with_sink(appender))
    }
}

impl<S: LineSource> Relay<S> {
    /// Create a relay with no sinks
    pub fn new(source: S, running: Arc<AtomicBool>) -> Self {
        Self {
            source,
            sinks: Vec::new(),
            running,
            stats: RelayStats::default(),
        }
    }

    /// Append a sink to the end of the fan-out
    pub fn with_sink<K: RecordSink + 'static>(mut self, sink: K) -> Self {
        self.stats.sinks.push(SinkStats {
            name: sink.name(),
            ..SinkStats::default()
        });
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn stats(&self) -> &RelayStats {
        &self.stats
    }

    /// Run until the running flag is cleared or the source fails
    ///
    /// Returns `Ok(())` on a signalled stop. A read error is logged and
    /// returned; there is no reconnect.
    pub fn run(&mut self) -> Result<()> {
        info!("Relay running with sinks: {}", self.sink_names());
        let mut last_stats = Instant::now();

        let result = loop {
            if !self.running.load(Ordering::Relaxed) {
                break Ok(());
            }

            match self.source.read_line() {
                Ok(record) => self.dispatch(&record),
                Err(Error::Interrupted) => break Ok(()),
                Err(e) => {
                    error!("Serial source failed: {}", e);
                    break Err(e);
                }
            }

            if last_stats.elapsed() >= STATS_INTERVAL {
                self.log_statistics();
                last_stats = Instant::now();
            }
        };

        info!("Relay stopped");
        self.log_statistics();
        result
    }

    /// Deliver one record to every sink, isolating failures
    pub fn dispatch(&mut self, record: &Record) {
        self.stats.records += 1;
        debug!("Record #{}: {} bytes", self.stats.records, record.len());

        for (sink, stats) in self.sinks.iter_mut().zip(self.stats.sinks.iter_mut()) {
            match sink.accept(record) {
                Ok(()) => stats.delivered += 1,
                Err(e) => {
                    stats.failed += 1;
                    match e {
                        Error::Persist { .. } => error!("{} sink: {}", stats.name, e),
                        _ => warn!("{} sink: {}", stats.name, e),
                    }
                }
            }
        }
    }

    fn sink_names(&self) -> String {
        self.stats
            .sinks
            .iter()
            .map(|s| s.name)
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    fn log_statistics(&self) {
        let sinks = self
            .stats
            .sinks
            .iter()
            .map(|s| format!("{}={}/{} failed", s.name, s.delivered, s.failed))
            .collect::<Vec<_>>()
            .join(" ");
        info!("Records={} {}", self.stats.records, sinks);
    }
}
