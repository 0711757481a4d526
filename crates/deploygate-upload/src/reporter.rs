//! User-facing progress and result reporting

use tracing::{error, info};

/// Sink for user-facing messages
///
/// The binary renders these on the console; libraries and tests can use
/// [`TracingReporter`] or their own recorder.
pub trait Reporter: Send + Sync {
    /// Something finished or started well
    fn success(&self, message: &str);

    /// Plain informational line
    fn message(&self, message: &str);

    /// Failure or hint about a failure
    fn error(&self, message: &str);
}

/// Reporter that only emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn success(&self, message: &str) {
        info!(outcome = "success", "{}", message);
    }

    fn message(&self, message: &str) {
        info!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}
