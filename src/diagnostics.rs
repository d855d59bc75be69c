//! Diagnostic output.
//!
//! Components that report progress take a `&dyn Diagnostics` instead of
//! reaching for a global logger. [`Silent`] discards everything (the default
//! for library use and tests); [`LogSink`] forwards to the `log` facade,
//! which the binary wires to `env_logger` on stderr. Stdout is reserved for
//! protocol output.

use std::fmt;

/// Sink for diagnostic messages. Every method defaults to doing nothing.
pub trait Diagnostics {
    fn warn(&self, _message: fmt::Arguments<'_>) {}
    fn info(&self, _message: fmt::Arguments<'_>) {}
    fn debug(&self, _message: fmt::Arguments<'_>) {}
}

/// Discards all diagnostics.
#[derive(Copy, Clone, Debug, Default)]
pub struct Silent;

impl Diagnostics for Silent {}

/// Forwards diagnostics to the `log` crate.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogSink;

impl Diagnostics for LogSink {
    fn warn(&self, message: fmt::Arguments<'_>) {
        log::warn!("{message}");
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        log::info!("{message}");
    }

    fn debug(&self, message: fmt::Arguments<'_>) {
        log::debug!("{message}");
    }
}
