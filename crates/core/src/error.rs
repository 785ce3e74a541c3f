//! Error types for target parsing and nonce search

use thiserror::Error;

/// The target threshold could not be decoded from hex.
///
/// Raised by [`Target::from_hex`](crate::Target::from_hex) before any search
/// starts; the search loop itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTargetError {
    #[error("target has an odd number of hex digits ({len})")]
    OddLength { len: usize },

    /// `index` is the byte offset of `character` in the input
    #[error("invalid hex character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },
}

/// Errors surfaced by the solver entry points
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("malformed target: {0}")]
    MalformedTarget(#[from] MalformedTargetError),

    #[error("no nonce in [{start}, {end}) satisfies the target")]
    NoSolution { start: u64, end: u64 },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Solver result type alias
pub type SolveResult<T> = Result<T, SolveError>;
