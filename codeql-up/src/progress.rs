/// Capability interface for surfacing install progress to a UI.
///
/// Every method has a no-op default, so a caller without a UI can pass
/// [`NoProgress`] and get identical install behavior.
pub trait ProgressSink: Send + Sync {
    /// Human-readable stage label (checking version, downloading, ...)
    fn stage(&self, _label: &str) {}

    /// Signal that the current stage has no measurable completion ratio
    fn indeterminate(&self) {}

    /// Polled before and during the download; returning true aborts the
    /// install promptly
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Sink that drops every signal.
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Sink that forwards stage labels to the log.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn stage(&self, label: &str) {
        tracing::info!("{label}");
    }
}
