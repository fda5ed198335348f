//! Configuration for the serial relay
//!
//! Every parameter is a compile-time constant gathered into
//! [`RelayConfig::default`]. The daemon never reads a config file; the TOML
//! form exists so embedders and tests can describe a relay declaratively.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

/// Sensor serial device on the gateway
pub const SERIAL_DEVICE: &str = "/dev/ttyATH0";

/// Sensor serial baud rate
pub const SERIAL_BAUD_RATE: u32 = 115200;

/// UDP destination port for broadcast records
pub const BROADCAST_PORT: u16 = 8888;

/// Log file name, relative to the working directory
pub const LOG_FILE: &str = "log";

/// Top-level relay configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RelayConfig {
    pub serial: SerialConfig,
    pub broadcast: BroadcastConfig,
    pub log: LogConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Serial source configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SerialConfig {
    /// Device path (e.g., "/dev/ttyATH0")
    pub device: String,
    /// Baud rate
    pub baud_rate: u32,
    /// Port read timeout between stop-flag checks
    ///
    /// Never surfaced to callers: a line read keeps waiting across timeouts.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// UDP broadcast configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BroadcastConfig {
    /// Local bind address (port 0 lets the OS pick)
    pub bind_address: SocketAddr,
    /// Destination address, normally the subnet broadcast address
    pub address: Ipv4Addr,
    /// Destination port
    pub port: u16,
}

/// Log file configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogConfig {
    pub path: PathBuf,
}

/// Stdout echo configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConsoleConfig {
    pub echo: bool,
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl BroadcastConfig {
    /// Full destination socket address
    pub fn target(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.address, self.port))
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            device: SERIAL_DEVICE.to_string(),
            baud_rate: SERIAL_BAUD_RATE,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            address: Ipv4Addr::BROADCAST,
            port: BROADCAST_PORT,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(LOG_FILE),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { echo: true }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            broadcast: BroadcastConfig::default(),
            log: LogConfig::default(),
            console: ConsoleConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Parse a configuration from its TOML rendering
    ///
    /// # Example
    /// ```
    /// use serial_relay::config::RelayConfig;
    ///
    /// let config = RelayConfig::from_toml_str(
    ///     r#"
    /// [serial]
    /// device = "/dev/ttyUSB0"
    /// baud_rate = 9600
    ///
    /// [broadcast]
    /// bind_address = "0.0.0.0:0"
    /// address = "192.168.1.255"
    /// port = 9999
    ///
    /// [log]
    /// path = "sensor.log"
    /// "#,
    /// )?;
    /// assert_eq!(config.broadcast.port, 9999);
    /// # Ok::<(), serial_relay::Error>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
