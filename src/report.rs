//! Machine-readable solve output

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::algorithm::Solution;

/// Result of a solve run, as printed by `powsolve solve --json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Decimal nonce
    pub nonce: String,
    /// Hex digest of `prefix || nonce`
    pub digest: String,
    /// Hashes computed, including work past the answer in parallel mode
    pub hashes: u64,
    pub elapsed_ms: u64,
}

impl SolveReport {
    pub fn new(solution: &Solution, elapsed: Duration) -> Self {
        Self {
            nonce: solution.nonce_string(),
            digest: solution.digest_hex(),
            hashes: solution.hashes,
            elapsed_ms: elapsed.as_millis() as u64,
        }
    }

    /// Hashes per second over the run
    pub fn hashrate(&self) -> f64 {
        if self.elapsed_ms == 0 {
            return 0.0;
        }
        self.hashes as f64 / (self.elapsed_ms as f64 / 1000.0)
    }
}
