//! Progress reporting for the export pipeline.
//!
//! ```
//! use uvmask::Progress;
//!
//! let progress = Progress::new(|current, total, stage| {
//!     eprintln!("[{}/{}] {}", current, total, stage);
//! });
//! progress.report(1, 3, "Padding seams");
//! ```

/// A callback receiving `(current, total, stage)` updates.
///
/// `current` runs from 0 to `total`; a report with `current == total` marks
/// completion.
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// A reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }

    /// Report that `current` of `total` stages are done and `stage` is next.
    #[inline]
    pub fn report(&self, current: usize, total: usize, stage: &str) {
        (self.callback)(current, total, stage);
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}
