//! Threshold predicate

use crate::target::Target;

/// Check if a digest is at or below the target threshold
///
/// Bytes are compared pairwise from the most significant end. The first
/// differing pair decides; if no pair differs over the compared length the
/// digest passes. Digest bytes past the end of the target are ignored, and so
/// are target bytes past the end of the digest.
///
/// For equal lengths this is `D <= T` with both read as big-endian integers.
///
/// # Example
///
/// ```rust
/// use powsolve_core::{meets_target, Target};
///
/// let target = Target::from_hex("00ff").unwrap();
///
/// assert!(meets_target(&[0x00, 0x10, 0xff, 0xff], &target)); // below
/// assert!(meets_target(&[0x00, 0xff, 0xff, 0xff], &target)); // equal prefix
/// assert!(!meets_target(&[0x01, 0x00, 0x00, 0x00], &target)); // above
/// ```
#[inline(always)]
pub fn meets_target(digest: &[u8], target: &Target) -> bool {
    meets_threshold(digest, target.as_bytes())
}

/// [`meets_target`] over raw threshold bytes
#[inline(always)]
pub fn meets_threshold(digest: &[u8], threshold: &[u8]) -> bool {
    for (d, t) in digest.iter().zip(threshold) {
        if d != t {
            return d < t;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Big-endian integer comparison over equal-length inputs
    fn reference_le(digest: &[u8], threshold: &[u8]) -> bool {
        assert_eq!(digest.len(), threshold.len());
        let value = |bytes: &[u8]| bytes.iter().fold(0u128, |acc, &b| (acc << 8) | b as u128);
        value(digest) <= value(threshold)
    }

    #[test]
    fn test_first_difference_decides() {
        assert!(meets_threshold(&[0x00, 0xff, 0xff], &[0x01, 0x00, 0x00]));
        assert!(!meets_threshold(&[0x01, 0x00, 0x00], &[0x00, 0xff, 0xff]));
        assert!(meets_threshold(&[0x12, 0x33, 0xff], &[0x12, 0x34, 0x00]));
        assert!(!meets_threshold(&[0x12, 0x35, 0x00], &[0x12, 0x34, 0xff]));
    }

    #[test]
    fn test_equal_passes() {
        let bytes = [0x00, 0x00, 0xab, 0xcd];
        assert!(meets_threshold(&bytes, &bytes));
    }

    #[test]
    fn test_shorter_target_truncates_digest() {
        // Only the first two digest bytes are compared
        assert!(meets_threshold(&[0x00, 0x00, 0xff, 0xff], &[0x00, 0x00]));
        assert!(meets_threshold(&[0x00, 0x01, 0xff, 0xff], &[0x00, 0x02]));
        assert!(!meets_threshold(&[0x00, 0x03, 0x00, 0x00], &[0x00, 0x02]));
    }

    #[test]
    fn test_shorter_digest_ignores_trailing_target() {
        assert!(meets_threshold(&[0x00, 0x01], &[0x00, 0x01, 0x00, 0x00]));
        assert!(meets_threshold(&[0x00, 0x00], &[0x00, 0x01, 0x00]));
        assert!(!meets_threshold(&[0x00, 0x02], &[0x00, 0x01, 0xff]));
    }

    #[test]
    fn test_empty_target_always_passes() {
        assert!(meets_threshold(&[0xff; 32], &[]));
        assert!(meets_threshold(&[], &[0x00]));
    }

    #[test]
    fn test_matches_big_endian_ordering() {
        // Exhaustive over two-byte values against a spread of thresholds
        let thresholds: [[u8; 2]; 6] = [
            [0x00, 0x00],
            [0x00, 0xff],
            [0x01, 0x00],
            [0x7f, 0x80],
            [0xfe, 0x01],
            [0xff, 0xff],
        ];
        for threshold in thresholds {
            for value in 0u16..=u16::MAX {
                let digest = value.to_be_bytes();
                assert_eq!(
                    meets_threshold(&digest, &threshold),
                    reference_le(&digest, &threshold),
                    "digest {:04x} threshold {}",
                    value,
                    hex::encode(threshold)
                );
            }
        }
    }

    #[test]
    fn test_meets_target_wraps_threshold() {
        let target = Target::from_hex("0000ff").unwrap();
        assert!(meets_target(&[0x00, 0x00, 0x10, 0xaa], &target));
        assert!(!meets_target(&[0x00, 0x01, 0x00, 0x00], &target));
    }
}
