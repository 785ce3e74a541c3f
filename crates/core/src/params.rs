//! Solver Parameters

/// SHA-256 output size
pub const DIGEST_SIZE: usize = 32;

/// Nonces handed to a worker at a time by the parallel solver
pub const DEFAULT_BATCH_SIZE: u64 = 4096;

/// Exclusive upper bound of the nonce search space
pub const NONCE_LIMIT: u64 = u64::MAX;

/// Longest decimal rendering of a `u64` nonce
pub const MAX_NONCE_DIGITS: usize = 20;
