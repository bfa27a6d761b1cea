//! Progress tracking utilities
//!
//! Logs replicate progress at regular intervals. The tracker maintains an
//! internal count and logs when interval boundaries are crossed.

use log::info;

/// Progress tracker for logging progress at regular intervals.
///
/// Maintains an internal count and logs progress messages when the count
/// crosses interval boundaries.
///
/// # Example
/// ```
/// use clonesub_lib::progress::ProgressTracker;
///
/// let mut tracker = ProgressTracker::new("Completed replicates").with_interval(10);
///
/// // Add items and log at interval boundaries
/// for _ in 0..25 {
///     tracker.log_if_needed(1); // Logs at 10, 20
/// }
/// tracker.log_final(); // Logs "Completed replicates 25 (complete)"
/// ```
pub struct ProgressTracker {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Count of items processed.
    count: u64,
}

impl ProgressTracker {
    /// Create a new progress tracker with the specified message.
    ///
    /// The tracker starts with a count of 0 and a default interval of 10.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10, message: message.into(), count: 0 }
    }

    /// Set the logging interval.
    ///
    /// Progress is logged each time the count crosses a multiple of this
    /// interval. For example, with interval=10, logs occur at 10, 20, 30, etc.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Add to the count and log if an interval boundary was crossed.
    ///
    /// Logs one message per boundary crossed. Returns `true` if the new count
    /// is exactly a multiple of the interval, which `log_final` uses to avoid
    /// a duplicate closing message.
    pub fn log_if_needed(&mut self, additional: u64) -> bool {
        if additional == 0 {
            return self.count > 0 && self.count.is_multiple_of(self.interval);
        }

        let prev = self.count;
        self.count += additional;

        let prev_intervals = prev / self.interval;
        let new_intervals = self.count / self.interval;
        for i in (prev_intervals + 1)..=new_intervals {
            info!("{} {}", self.message, i * self.interval);
        }

        self.count.is_multiple_of(self.interval)
    }

    /// Log final progress.
    ///
    /// If the current count is not exactly on an interval boundary, logs a
    /// final message with "(complete)". Otherwise the last `log_if_needed`
    /// call already logged it.
    pub fn log_final(&mut self) {
        if !self.log_if_needed(0) && self.count > 0 {
            info!("{} {} (complete)", self.message, self.count);
        }
    }

    /// Get the current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}
