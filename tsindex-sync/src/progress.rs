//! Progress reporting and cooperative cancellation.

/// Receives progress for each unit of work.
///
/// Returning `false` from [`on_progress`](SyncProgress::on_progress) asks the
/// running operation to stop at the next unit boundary. Work already done is
/// kept.
pub trait SyncProgress {
    fn on_progress(&self, tag: &str, total: usize, completed: usize) -> bool;

    /// Called when a phase starts (e.g., "Fetching primary catalog").
    fn on_phase(&self, _message: &str) {}
}

impl<F> SyncProgress for F
where
    F: Fn(&str, usize, usize) -> bool,
{
    fn on_progress(&self, tag: &str, total: usize, completed: usize) -> bool {
        self(tag, total, completed)
    }
}

/// A no-op progress reporter that never cancels.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_progress(&self, _tag: &str, _total: usize, _completed: usize) -> bool {
        true
    }
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_progress(&self, tag: &str, total: usize, completed: usize) -> bool {
        log::info!("  [{}/{}] {}", completed, total, tag);
        true
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }
}
