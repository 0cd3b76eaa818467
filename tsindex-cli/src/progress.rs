//! Progress bar reporter for sync commands.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tsindex_sync::SyncProgress;

pub(crate) struct BarProgress {
    pb: ProgressBar,
}

impl BarProgress {
    /// A bar on the terminal, or a hidden one in quiet mode.
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            let style = ProgressStyle::with_template(
                "  {spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("/-\\|");
            pb.set_style(style);
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { pb }
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl SyncProgress for BarProgress {
    fn on_progress(&self, tag: &str, total: usize, completed: usize) -> bool {
        self.pb.set_length(total as u64);
        self.pb.set_position(completed as u64);
        self.pb.set_message(tag.to_string());
        true
    }

    fn on_phase(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }
}
