//! Thread configuration and dispatch for frame operations.
//!
//! Each frame carries an [`Executor`]. With one thread, or when a frame has
//! fewer rows than the configured threshold, operations run sequentially on
//! the calling thread. Otherwise they run inside a dedicated rayon pool that
//! is shared by every frame derived from the same source.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Rows below which work stays on the calling thread.
pub const DEFAULT_MIN_PARALLEL_ROWS: usize = 1024;

/// Environment variable read by [`FrameOptions::from_env`].
pub const THREADS_ENV_VAR: &str = "FRAMERS_NUM_THREADS";

/// Builder for the execution settings of a frame.
///
/// # Example
///
/// ```ignore
/// let df = DataFrame::from_rows(&rows, &["x", "y"])?
///     .with_options(FrameOptions::new().threads(8).min_parallel_rows(4096))?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameOptions {
    threads: usize,
    min_parallel_rows: usize,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            min_parallel_rows: DEFAULT_MIN_PARALLEL_ROWS,
        }
    }
}

impl FrameOptions {
    /// Sequential defaults: one thread.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with the thread count taken from `FRAMERS_NUM_THREADS`.
    ///
    /// Unset or unparsable values leave the default of one thread.
    pub fn from_env() -> Self {
        let options = Self::default();
        match std::env::var(THREADS_ENV_VAR) {
            Ok(raw) => match parse_threads(&raw) {
                Some(n) => options.threads(n),
                None => {
                    warn!(value = %raw, "ignoring invalid {}", THREADS_ENV_VAR);
                    options
                }
            },
            Err(_) => options,
        }
    }

    /// Set the number of worker threads (0 = auto-detect).
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Set the row count at which operations switch to the thread pool.
    pub fn min_parallel_rows(mut self, rows: usize) -> Self {
        self.min_parallel_rows = rows;
        self
    }

    /// Thread count after resolving auto-detection.
    pub fn thread_count(&self) -> usize {
        if self.threads == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
        } else {
            self.threads
        }
    }

    /// Build the executor, spawning a pool when more than one thread is requested.
    pub fn build(self) -> Result<Executor> {
        let threads = self.thread_count();
        let pool = if threads > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("framers-{i}"))
                .build()
                .map_err(|e| Error::ThreadPool(format!("failed to build pool: {e}")))?;
            debug!(threads, "built frame thread pool");
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Executor {
            threads,
            min_parallel_rows: self.min_parallel_rows,
            pool,
        })
    }
}

fn parse_threads(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok()
}

/// Dispatches frame work either inline or onto a shared rayon pool.
#[derive(Debug, Clone)]
pub struct Executor {
    threads: usize,
    min_parallel_rows: usize,
    pool: Option<Arc<ThreadPool>>,
}

impl Default for Executor {
    fn default() -> Self {
        Self::sequential()
    }
}

impl Executor {
    /// Single-threaded executor; never spawns threads.
    pub fn sequential() -> Self {
        Self {
            threads: 1,
            min_parallel_rows: DEFAULT_MIN_PARALLEL_ROWS,
            pool: None,
        }
    }

    /// Number of threads this executor was configured with.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Settings that rebuild an equivalent executor.
    pub fn options(&self) -> FrameOptions {
        FrameOptions {
            threads: self.threads,
            min_parallel_rows: self.min_parallel_rows,
        }
    }

    /// Whether an operation over `rows` rows should use the pool.
    pub fn is_parallel_for(&self, rows: usize) -> bool {
        self.pool.is_some() && rows >= self.min_parallel_rows
    }

    /// Run `op` inside the pool if there is one, else on the calling thread.
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_thread_has_no_pool() {
        let exec = FrameOptions::new().build().unwrap();
        assert_eq!(exec.threads(), 1);
        assert!(!exec.is_parallel_for(1_000_000));
    }

    #[test]
    fn test_threshold_gates_parallel_path() {
        let exec = FrameOptions::new()
            .threads(2)
            .min_parallel_rows(100)
            .build()
            .unwrap();
        assert_eq!(exec.threads(), 2);
        assert!(!exec.is_parallel_for(99));
        assert!(exec.is_parallel_for(100));
    }

    #[test]
    fn test_auto_detect_resolves_to_positive() {
        assert!(FrameOptions::new().threads(0).thread_count() >= 1);
    }

    #[test]
    fn test_options_roundtrip_through_executor() {
        let options = FrameOptions::new().threads(3).min_parallel_rows(7);
        let exec = options.build().unwrap();
        assert_eq!(exec.options(), options);
    }

    // Only this test touches FRAMERS_NUM_THREADS, so the process-wide
    // variable is never changed concurrently.
    #[test]
    fn test_from_env_reads_thread_count() {
        std::env::set_var(THREADS_ENV_VAR, "3");
        assert_eq!(FrameOptions::from_env().thread_count(), 3);

        std::env::set_var(THREADS_ENV_VAR, "bogus");
        assert_eq!(FrameOptions::from_env().thread_count(), 1);

        std::env::remove_var(THREADS_ENV_VAR);
        assert_eq!(FrameOptions::from_env().thread_count(), 1);
        assert_eq!(FrameOptions::from_env(), FrameOptions::default());
    }

    #[test]
    fn test_parse_threads() {
        assert_eq!(parse_threads(" 8 "), Some(8));
        assert_eq!(parse_threads("0"), Some(0));
        assert_eq!(parse_threads("eight"), None);
        assert_eq!(parse_threads("-1"), None);
    }

    #[test]
    fn test_install_runs_inside_pool() {
        let exec = FrameOptions::new().threads(2).build().unwrap();
        let inside = exec.install(|| rayon::current_thread_index().is_some());
        assert!(inside);

        let seq = Executor::sequential();
        assert_eq!(seq.install(|| 41 + 1), 42);
    }
}
