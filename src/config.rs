//! Search configuration
//!
//! Controls how a challenge is searched: worker count, batch size and the
//! nonce window. None of these change the answer, only how it is found.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::{Nonces, DEFAULT_BATCH_SIZE, NONCE_LIMIT};

/// Worker count used when none is configured
pub const DEFAULT_THREADS: usize = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    ZeroBatchSize,

    #[error("start nonce {start} is above max nonce {max_nonce}")]
    StartAboveMax { start: u64, max_nonce: u64 },

    #[error("max nonce must be below {}", NONCE_LIMIT)]
    MaxNonceOutOfRange,
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveConfig {
    /// Worker threads; 1 searches on the calling thread, 0 uses every core
    pub threads: usize,
    /// Nonces claimed per batch in parallel mode
    pub batch_size: u64,
    /// First nonce to try
    pub start: u64,
    /// Last nonce to try (inclusive); unbounded when unset
    pub max_nonce: Option<u64>,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            batch_size: DEFAULT_BATCH_SIZE,
            start: 0,
            max_nonce: None,
        }
    }
}

impl SolveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if let Some(max_nonce) = self.max_nonce {
            if max_nonce >= NONCE_LIMIT {
                return Err(ConfigError::MaxNonceOutOfRange);
            }
            if self.start > max_nonce {
                return Err(ConfigError::StartAboveMax {
                    start: self.start,
                    max_nonce,
                });
            }
        }
        Ok(())
    }

    /// Exclusive end of the search window
    pub fn end(&self) -> u64 {
        match self.max_nonce {
            Some(max_nonce) => max_nonce.saturating_add(1).min(NONCE_LIMIT),
            None => NONCE_LIMIT,
        }
    }

    /// Nonces covered by this configuration
    pub fn nonces(&self) -> Nonces {
        Nonces::new(self.start, self.end())
    }

    pub fn is_parallel(&self) -> bool {
        self.threads != 1
    }
}
