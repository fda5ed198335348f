//! Shutdown signal handling

use crate::error::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Clear `running` on Ctrl-C (SIGINT), SIGTERM or SIGHUP
///
/// Can only be installed once per process.
pub fn install_shutdown_handler(running: Arc<AtomicBool>) -> Result<()> {
    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        running.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting shutdown handler: {}", e)))
}
