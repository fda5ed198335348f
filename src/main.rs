//! serial-relay - Serial sensor relay daemon
//!
//! Reads telemetry lines from the sensor UART, echoes them to stdout,
//! broadcasts each one on UDP port 8888, and appends it to `./log`.
//!
//! All parameters are compile-time constants (see `config.rs`). Diagnostics
//! go to stderr and honour `RUST_LOG`.

use serial_relay::signal::install_shutdown_handler;
use serial_relay::{Relay, RelayConfig, Result};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("serial-relay v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = RelayConfig::default();

    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    install_shutdown_handler(Arc::clone(&running))?;

    let mut relay = match Relay::from_config(&config, running) {
        Ok(relay) => relay,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            return Err(e);
        }
    };

    relay.run()?;

    log::info!("serial-relay stopped");
    Ok(())
}
