use std::time::{Duration, Instant};

use tracing::{info, trace};

/// Observer of import progress. Implementations must not assume any call
/// rate and cannot influence the import except through a [`CancelToken`].
///
/// [`CancelToken`]: super::CancelToken
pub trait ProgressSink {
    fn status(&mut self, message: &str);
    fn progress(&mut self, done: usize, total: usize);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn status(&mut self, _message: &str) {}
    fn progress(&mut self, _done: usize, _total: usize) {}
}

/// Forwards progress to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn status(&mut self, message: &str) {
        info!("{message}");
    }

    fn progress(&mut self, done: usize, total: usize) {
        trace!(done, total, "progress");
    }
}

/// Drops status messages arriving sooner than `interval` after the last
/// forwarded one. Fractional progress always passes through.
#[derive(Debug, Clone)]
pub struct ThrottledProgress<P> {
    inner: P,
    interval: Duration,
    last: Option<Instant>,
}

impl<P: ProgressSink> ThrottledProgress<P> {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(inner: P) -> Self {
        Self::with_interval(inner, Self::DEFAULT_INTERVAL)
    }

    pub fn with_interval(inner: P, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last: None,
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: ProgressSink> ProgressSink for ThrottledProgress<P> {
    fn status(&mut self, message: &str) {
        let now = Instant::now();
        if self
            .last
            .is_some_and(|last| now.duration_since(last) < self.interval)
        {
            return;
        }
        self.last = Some(now);
        self.inner.status(message);
    }

    fn progress(&mut self, done: usize, total: usize) {
        self.inner.progress(done, total);
    }
}
