use std::ffi::c_int;
use std::io;
use std::sync::Mutex;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use signal_hook::low_level::signal_name;
use tracing::info;

pub(crate) const TERMINATION_SIGNALS: &[c_int] = &[SIGTERM, SIGINT];

/// Handlers for the termination signals, registered ahead of the wait so a signal that
/// arrives early is not lost.
#[derive(Debug)]
pub struct TerminationSignals(Mutex<Signals>);

impl TerminationSignals {
    /// Registers handlers for SIGTERM and SIGINT.
    pub fn register() -> io::Result<Self> {
        Self::for_signals(TERMINATION_SIGNALS)
    }

    pub(crate) fn for_signals(signals: &[c_int]) -> io::Result<Self> {
        Ok(Self(Mutex::new(Signals::new(signals)?)))
    }

    /// Blocks until one of the registered signals is received.
    pub fn wait(&self) {
        let mut signals = self.0.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(signal) = signals.forever().next() {
            info!(
                "Received {}, shutting down",
                signal_name(signal).unwrap_or("unknown signal")
            );
        }
        signals.handle().close();
    }
}

/// Blocks until the process receives SIGTERM or SIGINT.
pub fn wait_for_termination() -> io::Result<()> {
    TerminationSignals::register()?.wait();
    Ok(())
}

#[cfg(test)]
#[path = "./signal_test.rs"]
mod signal_test;
