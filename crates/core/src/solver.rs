//! Sequential nonce search
//!
//! Scans nonces upward from a starting point, hashing `prefix || decimal(n)`
//! and returning the first nonce whose digest meets the target. Because the
//! scan is strictly increasing, the first hit is the smallest satisfying
//! nonce in the scanned range.

use crate::error::{MalformedTargetError, SolveError, SolveResult};
use crate::nonce::{HashInput, Nonces};
use crate::params::{DIGEST_SIZE, NONCE_LIMIT};
use crate::predicate::meets_target;
use crate::target::Target;

/// A nonce that meets the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The smallest satisfying nonce in the scanned range
    pub nonce: u64,
    /// SHA-256 of `prefix || decimal(nonce)`
    pub digest: [u8; DIGEST_SIZE],
    /// Hashes computed during the search
    pub hashes: u64,
}

impl Solution {
    /// Decimal form of the nonce, as handed back to callers
    pub fn nonce_string(&self) -> String {
        self.nonce.to_string()
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Proof-of-work search over a fixed prefix and target
///
/// Construction is the only fallible step; once built, searching and
/// verifying cannot fail.
#[derive(Clone)]
pub struct Solver {
    input: HashInput,
    target: Target,
}

impl Solver {
    pub fn new(prefix: impl AsRef<[u8]>, target: Target) -> Self {
        Self {
            input: HashInput::new(prefix.as_ref()),
            target,
        }
    }

    /// Build a solver from a hex-encoded target
    pub fn from_hex(
        prefix: impl AsRef<[u8]>,
        target_hex: &str,
    ) -> Result<Self, MalformedTargetError> {
        Ok(Self::new(prefix, Target::from_hex(target_hex)?))
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Digest for a single candidate nonce
    #[inline]
    pub fn digest(&self, nonce: u64) -> [u8; DIGEST_SIZE] {
        self.input.digest(nonce)
    }

    /// Check whether `nonce` meets the target
    pub fn verify(&self, nonce: u64) -> bool {
        meets_target(&self.digest(nonce), &self.target)
    }

    /// Scan `nonces` in order, adding every hash computed to `hashes`
    #[inline]
    pub(crate) fn scan(&self, nonces: Nonces, hashes: &mut u64) -> Option<u64> {
        for nonce in nonces {
            *hashes += 1;
            if meets_target(&self.input.digest(nonce), &self.target) {
                return Some(nonce);
            }
        }
        None
    }

    /// Find the first satisfying nonce in `nonces`, or `None` if the range
    /// holds no solution
    pub fn search(&self, nonces: Nonces) -> Option<Solution> {
        let (start, end) = (nonces.start(), nonces.end());
        tracing::debug!(start, end, target = %self.target, "searching nonce range");

        let mut hashes = 0u64;
        let found = self.scan(nonces, &mut hashes);

        match found {
            Some(nonce) => {
                tracing::debug!(nonce, hashes, "found nonce");
                Some(Solution {
                    nonce,
                    digest: self.digest(nonce),
                    hashes,
                })
            }
            None => {
                tracing::debug!(start, end, hashes, "range exhausted");
                None
            }
        }
    }

    /// Search `[start, end)`, reporting an empty range as an error
    pub fn solve_range(&self, start: u64, end: u64) -> SolveResult<Solution> {
        self.search(Nonces::new(start, end))
            .ok_or(SolveError::NoSolution { start, end })
    }

    /// Smallest satisfying nonce from zero
    ///
    /// Runs until a solution is found; an unreachable target keeps this busy
    /// for the whole `u64` space.
    pub fn solve(&self) -> SolveResult<Solution> {
        self.solve_range(0, NONCE_LIMIT)
    }
}

/// Solve a challenge given as raw strings, returning the decimal nonce
///
/// The target is validated before any hashing starts.
///
/// ```rust
/// let nonce = powsolve_core::solve("abc", "0fff").unwrap();
/// assert_eq!(nonce, "26");
/// ```
pub fn solve(prefix: &str, target_hex: &str) -> SolveResult<String> {
    let solver = Solver::from_hex(prefix, target_hex)?;
    Ok(solver.solve()?.nonce_string())
}

/// Check a claimed nonce against a challenge
pub fn verify(prefix: &str, target_hex: &str, nonce: u64) -> Result<bool, MalformedTargetError> {
    Ok(Solver::from_hex(prefix, target_hex)?.verify(nonce))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_respects_range_start() {
        let solver = Solver::from_hex("abc", "0fff").unwrap();
        let first = solver.search(Nonces::all()).unwrap();
        assert_eq!(first.nonce, 26);
        assert_eq!(first.hashes, 27);

        let next = solver.search(Nonces::starting_at(27)).unwrap();
        assert!(next.nonce > 26);
        assert!(solver.verify(next.nonce));
    }

    #[test]
    fn test_search_empty_range() {
        let solver = Solver::from_hex("abc", "0fff").unwrap();
        assert_eq!(solver.search(Nonces::new(0, 26)), None);
        assert!(matches!(
            solver.solve_range(0, 26),
            Err(SolveError::NoSolution { start: 0, end: 26 })
        ));
    }

    #[test]
    fn test_solution_reports_digest() {
        let solver = Solver::from_hex("abc", "00ff").unwrap();
        let solution = solver.solve().unwrap();
        assert_eq!(solution.digest, solver.digest(solution.nonce));
        assert_eq!(solution.digest_hex().len(), 64);
    }

    #[test]
    fn test_verify_strings() {
        assert_eq!(verify("abc", "0fff", 26), Ok(true));
        assert_eq!(verify("abc", "0fff", 25), Ok(false));
        assert!(verify("abc", "0ff", 26).is_err());
    }
}
