//! Proof-of-Work Solver Library
//!
//! Finds the smallest nonce such that `SHA-256(prefix || nonce)` is at or
//! below a hex-encoded target, as used by challenge-response rate limiters.
//!
//! # Overview
//!
//! The search itself lives in [`powsolve_core`], re-exported here as
//! [`algorithm`]. This crate adds the search configuration, a serializable
//! report for the CLI, and a single entry point that picks the sequential or
//! parallel solver.
//!
//! # Example
//!
//! ```rust
//! use powsolve::config::SolveConfig;
//! use powsolve::{search, Solver};
//!
//! let solver = Solver::from_hex("abc", "00ffffff").unwrap();
//! let solution = search(solver, &SolveConfig::default()).unwrap();
//!
//! assert_eq!(solution.nonce_string(), "252");
//! ```

// Re-export the core algorithm
pub use powsolve_core as algorithm;

pub mod config;
pub mod report;

// Convenience re-exports
pub use algorithm::{
    meets_target, solve, verify, MalformedTargetError, Solution, SolveError, SolveResult, Solver,
    Target,
};

use config::SolveConfig;

/// Run a search over the window described by `config`
///
/// Uses the parallel solver when more than one worker is configured and the
/// `parallel` feature is enabled. Both paths return the smallest satisfying
/// nonce in the window.
pub fn search(solver: Solver, config: &SolveConfig) -> SolveResult<Solution> {
    let nonces = config.nonces();
    let no_solution = SolveError::NoSolution {
        start: nonces.start(),
        end: nonces.end(),
    };

    #[cfg(feature = "parallel")]
    if config.is_parallel() {
        tracing::debug!(threads = config.threads, "using parallel solver");
        return algorithm::ParallelSolver::new(solver, config.threads)
            .with_batch_size(config.batch_size)
            .search(nonces)?
            .ok_or(no_solution);
    }

    solver.search(nonces).ok_or(no_solution)
}
