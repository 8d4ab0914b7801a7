/// Observer for batch progress.
///
/// Purely a presentation sink: the executor behaves identically whether the
/// reporter draws a bar or does nothing.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send {
    /// Called once before the first repository runs
    fn start(&mut self, total: u64);

    /// Called once per settled repository
    fn increment(&mut self, amount: f64);

    /// Called once after every repository has settled
    fn stop(&mut self);
}

/// Reporter that ignores every signal
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&mut self, _total: u64) {}

    fn increment(&mut self, _amount: f64) {}

    fn stop(&mut self) {}
}
