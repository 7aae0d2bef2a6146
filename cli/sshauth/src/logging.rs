//! Logging initialization.

use anyhow::{Result, anyhow};
use tracing::Level;
use tracing_subscriber::fmt;

use crate::syslog::Syslog;

/// How log output is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOptions {
    /// Emit logs at all
    pub enabled: bool,

    /// Include debug output
    pub debug: bool,

    /// Send to syslog instead of stderr
    pub syslog: bool,
}

impl LogOptions {
    /// Maximum level to emit, or `None` when logging is off.
    pub fn level(&self) -> Option<Level> {
        match (self.enabled, self.debug) {
            (false, _) => None,
            (true, true) => Some(Level::DEBUG),
            (true, false) => Some(Level::INFO),
        }
    }
}

/// Initialize logging.
///
/// Logs never go to stdout, which carries the key material.
pub fn init_logging(options: LogOptions) -> Result<()> {
    let Some(level) = options.level() else {
        return Ok(());
    };

    let builder = fmt::Subscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time();

    let installed = if options.syslog {
        builder
            .with_ansi(false)
            .with_level(false)
            .with_writer(Syslog::open())
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
