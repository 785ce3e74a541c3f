//! Range-partitioned parallel search
//!
//! The search space is cut into contiguous batches that workers claim in
//! increasing order from a shared cursor. A worker that finds a solution
//! lowers the shared best nonce with `fetch_min`; workers stop claiming once
//! the next batch starts at or beyond the best nonce. Every batch below the
//! final best is therefore scanned to completion, and the result is the
//! globally smallest satisfying nonce, same as the sequential solver.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::ThreadPoolBuilder;

use crate::error::{SolveError, SolveResult};
use crate::nonce::Nonces;
use crate::params::{DEFAULT_BATCH_SIZE, NONCE_LIMIT};
use crate::solver::{Solution, Solver};

/// Marks "no solution yet" in the shared best slot. Never a valid nonce
/// since the search space ends below it.
const UNSOLVED: u64 = NONCE_LIMIT;

/// Multi-threaded wrapper around a [`Solver`]
pub struct ParallelSolver {
    solver: Solver,
    threads: usize,
    batch_size: u64,
}

impl ParallelSolver {
    /// Create a parallel solver; `threads == 0` uses one worker per core
    pub fn new(solver: Solver, threads: usize) -> Self {
        Self {
            solver,
            threads,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Nonces claimed per batch (at least 1)
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    /// Find the smallest satisfying nonce in `nonces`
    pub fn search(&self, nonces: Nonces) -> SolveResult<Option<Solution>> {
        let (start, end) = (nonces.start(), nonces.end());
        if start >= end {
            return Ok(None);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("powsolve-worker-{i}"))
            .build()
            .map_err(|e| SolveError::ThreadPool(e.to_string()))?;

        tracing::debug!(
            start,
            end,
            threads = pool.current_num_threads(),
            batch_size = self.batch_size,
            "starting parallel search"
        );

        let cursor = AtomicU64::new(start);
        let best = AtomicU64::new(UNSOLVED);
        let hashes = AtomicU64::new(0);

        pool.broadcast(|ctx| self.work(ctx.index(), end, &cursor, &best, &hashes));

        let hashes = hashes.load(Ordering::Relaxed);
        match best.load(Ordering::Acquire) {
            UNSOLVED => {
                tracing::debug!(start, end, hashes, "range exhausted");
                Ok(None)
            }
            nonce => {
                tracing::debug!(nonce, hashes, "found nonce");
                Ok(Some(Solution {
                    nonce,
                    digest: self.solver.digest(nonce),
                    hashes,
                }))
            }
        }
    }

    /// Search `[start, end)`, reporting an empty range as an error
    pub fn solve_range(&self, start: u64, end: u64) -> SolveResult<Solution> {
        self.search(Nonces::new(start, end))?
            .ok_or(SolveError::NoSolution { start, end })
    }

    /// Smallest satisfying nonce from zero
    pub fn solve(&self) -> SolveResult<Solution> {
        self.solve_range(0, NONCE_LIMIT)
    }

    fn work(
        &self,
        worker: usize,
        end: u64,
        cursor: &AtomicU64,
        best: &AtomicU64,
        hashes: &AtomicU64,
    ) {
        let batch_size = self.batch_size;

        loop {
            let claimed = cursor.fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < end).then(|| next.saturating_add(batch_size).min(end))
            });
            let Ok(batch_start) = claimed else {
                break;
            };
            if batch_start >= best.load(Ordering::Acquire) {
                break;
            }
            let batch_end = batch_start.saturating_add(batch_size).min(end);

            let mut batch_hashes = 0u64;
            let found = self
                .solver
                .scan(Nonces::new(batch_start, batch_end), &mut batch_hashes);
            hashes.fetch_add(batch_hashes, Ordering::Relaxed);

            tracing::trace!(worker, batch_start, batch_end, "batch scanned");

            if let Some(nonce) = found {
                best.fetch_min(nonce, Ordering::AcqRel);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_sequential_small_batches() {
        let solver = Solver::from_hex("abc", "00ff").unwrap();
        let expected = solver.solve().unwrap().nonce;

        for batch_size in [1, 3, 16, 100, 4096] {
            let parallel = ParallelSolver::new(solver.clone(), 4).with_batch_size(batch_size);
            assert_eq!(parallel.solve().unwrap().nonce, expected, "batch {batch_size}");
        }
    }

    #[test]
    fn test_zero_batch_size_clamped() {
        let solver = Solver::from_hex("abc", "0fff").unwrap();
        let parallel = ParallelSolver::new(solver, 2).with_batch_size(0);
        assert_eq!(parallel.solve().unwrap().nonce, 26);
    }

    #[test]
    fn test_empty_range() {
        let solver = Solver::from_hex("abc", "0fff").unwrap();
        let parallel = ParallelSolver::new(solver, 2).with_batch_size(8);
        assert_eq!(parallel.search(Nonces::new(0, 26)).unwrap(), None);
        assert_eq!(parallel.search(Nonces::new(10, 10)).unwrap(), None);
        assert!(matches!(
            parallel.solve_range(0, 26),
            Err(SolveError::NoSolution { start: 0, end: 26 })
        ));
    }

    #[test]
    fn test_counts_hashes() {
        let solver = Solver::from_hex("abc", "0fff").unwrap();
        let solution = ParallelSolver::new(solver, 1)
            .with_batch_size(10)
            .solve()
            .unwrap();
        // Single worker scans [0,10) and [10,20), then stops at 26 in [20,30)
        assert_eq!(solution.nonce, 26);
        assert_eq!(solution.hashes, 27);
    }
}
