//! Diagnostic sink handed to code that may need to report a non-fatal
//! problem (e.g. an unsupported search target).
//!
//! The sink is injected rather than global so callers, and tests, decide
//! where warnings go.

/// Best-effort warning sink. Implementations must not panic.
pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards warnings to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "sfs", "{}", message);
    }
}
