//! # Proof-of-Work Nonce Solver
//!
//! Finds the smallest non-negative nonce such that
//! `SHA-256(prefix || decimal(nonce))` is at or below a target threshold,
//! comparing bytes from the most significant end.
//!
//! ## Input Format
//!
//! ```text
//! input = prefix || nonce
//!         ^^^^^^    ^^^^^
//!         any len   base-10 digits, no padding ("0" for zero)
//! ```
//!
//! ## Target
//!
//! The target is parsed once from an even-length hex string into a
//! [`Target`]. Only as many leading digest bytes as the target holds take
//! part in the comparison, and a digest equal to the target passes.
//!
//! ## Example
//!
//! ```rust
//! use powsolve_core::{Nonces, Solver, Target, meets_target};
//!
//! // One-shot from strings
//! let nonce = powsolve_core::solve("abc", "00ffffff").unwrap();
//! assert_eq!(nonce, "252");
//!
//! // Reusable solver with a validated target
//! let solver = Solver::new("abc", Target::from_hex("0fff").unwrap());
//! let solution = solver.search(Nonces::all()).unwrap();
//! assert_eq!(solution.nonce, 26);
//! assert!(meets_target(&solution.digest, solver.target()));
//! ```
//!
//! ## Parallel Search
//!
//! With the `parallel` feature (on by default), [`ParallelSolver`] spreads
//! contiguous nonce batches over a rayon pool and still returns the globally
//! smallest satisfying nonce.

mod error;
mod nonce;
mod params;
mod predicate;
mod solver;
mod target;

#[cfg(feature = "parallel")]
mod parallel;

pub mod ffi;

pub use error::{MalformedTargetError, SolveError, SolveResult};
pub use nonce::{HashInput, Nonces, encode_decimal};
pub use params::*;
pub use predicate::{meets_target, meets_threshold};
pub use solver::{Solution, Solver, solve, verify};
pub use target::Target;

#[cfg(feature = "parallel")]
pub use parallel::ParallelSolver;
