use crate::{Operation, SyncError};

/// Receives user-facing notifications about sync results.
pub trait SyncReporter: Send + Sync {
    fn failure(&self, operation: Operation, error: &SyncError);

    fn success(&self, operation: Operation, message: &str);
}

/// Reports through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn failure(&self, operation: Operation, error: &SyncError) {
        tracing::error!(operation = %operation, error = %error, "schedule sync failed");
    }

    fn success(&self, operation: Operation, message: &str) {
        tracing::info!(operation = %operation, "{message}");
    }
}
