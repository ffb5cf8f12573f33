//! Rayon thread pool configuration for multi-intent ranking.
//!
//! Use [WorkerPool::install] to rank with a fixed number of threads, or rely on
//! Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

/// Configures how many worker threads are used for parallel ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the global Rayon pool.
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a pool with this worker count. Falls back to the global
    /// pool if a dedicated one cannot be built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                tracing::warn!(
                    workers = self.workers,
                    %err,
                    "could not build worker pool; using global pool"
                );
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn install_runs_closure_with_dedicated_and_global_pools() {
        let sum = |pool: WorkerPool| pool.install(|| (1..=10u32).into_par_iter().sum::<u32>());
        assert_eq!(sum(WorkerPool::default()), 55);
        assert_eq!(sum(WorkerPool::with_workers(2)), 55);
    }

    #[test]
    fn dedicated_pool_uses_requested_thread_count() {
        let threads = WorkerPool::with_workers(3).install(rayon::current_num_threads);
        assert_eq!(threads, 3);
    }
}
