use indicatif::ProgressBar;

use crate::application::services::ProgressReporter;

/// [`ProgressReporter`] drawn with indicatif.
///
/// Increments arrive as fractions of the scale, so the running total is kept
/// as a float and rounded onto the bar.
pub struct TerminalProgress {
    bar: ProgressBar,
    done: f64,
}

impl TerminalProgress {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar, done: 0.0 }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressReporter for TerminalProgress {
    fn start(&mut self, total: u64) {
        self.done = 0.0;
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn increment(&mut self, amount: f64) {
        self.done += amount;
        let len = self.bar.length().unwrap_or(u64::MAX);
        let position = self.done.round().max(0.0) as u64;
        self.bar.set_position(position.min(len));
    }

    fn stop(&mut self) {
        self.bar.finish();
    }
}
