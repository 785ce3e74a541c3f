//! Candidate nonces and hash input construction
//!
//! The hash input for nonce `n` is `prefix || decimal(n)`: the prefix bytes
//! followed by the canonical base-10 digits of `n` (no sign, no padding,
//! `"0"` for zero).

use sha2::{Digest, Sha256};

use crate::params::{DIGEST_SIZE, MAX_NONCE_DIGITS, NONCE_LIMIT};

/// Lazy, strictly increasing run of nonces over `[start, end)`
///
/// Restartable from any offset, so the same sequence drives both the
/// exhaustive single-threaded search and each batch of the parallel one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonces {
    next: u64,
    end: u64,
}

impl Nonces {
    /// Nonces in the half-open range `[start, end)`
    pub fn new(start: u64, end: u64) -> Self {
        Self { next: start, end }
    }

    /// Every nonce from `start` up to the end of the search space
    pub fn starting_at(start: u64) -> Self {
        Self::new(start, NONCE_LIMIT)
    }

    /// The whole search space, from zero
    pub fn all() -> Self {
        Self::starting_at(0)
    }

    /// Next nonce to be yielded
    pub fn start(&self) -> u64 {
        self.next
    }

    /// Exclusive upper bound
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Nonces left to yield
    pub fn remaining(&self) -> u64 {
        self.end.saturating_sub(self.next)
    }
}

impl Iterator for Nonces {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.next >= self.end {
            return None;
        }
        let nonce = self.next;
        self.next += 1;
        Some(nonce)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Write the decimal digits of `nonce` into the tail of `buf`
#[inline]
pub fn encode_decimal(nonce: u64, buf: &mut [u8; MAX_NONCE_DIGITS]) -> &[u8] {
    let mut pos = buf.len();
    let mut n = nonce;
    loop {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &buf[pos..]
}

/// SHA-256 state with the prefix already absorbed
///
/// Each candidate clones the state and feeds only the nonce digits, so the
/// prefix is hashed once per search instead of once per nonce.
#[derive(Clone)]
pub struct HashInput {
    base: Sha256,
}

impl HashInput {
    pub fn new(prefix: &[u8]) -> Self {
        let mut base = Sha256::new();
        base.update(prefix);
        Self { base }
    }

    /// Digest of `prefix || decimal(nonce)`
    #[inline]
    pub fn digest(&self, nonce: u64) -> [u8; DIGEST_SIZE] {
        let mut digits = [0u8; MAX_NONCE_DIGITS];
        let mut hasher = self.base.clone();
        hasher.update(encode_decimal(nonce, &mut digits));
        hasher.finalize().into()
    }
}
