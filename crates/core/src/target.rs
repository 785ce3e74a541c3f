//! Validated target threshold
//!
//! A target is parsed once from hex and then compared against every candidate
//! digest. Its length decides how many leading digest bytes take part in the
//! comparison.

use core::fmt;
use core::str::FromStr;

use crate::error::MalformedTargetError;
use crate::params::DIGEST_SIZE;

/// Maximum acceptable digest, compared big-endian
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    bytes: Vec<u8>,
}

impl Target {
    /// Decode a target from an even-length hex string.
    ///
    /// Upper- and lower-case digits are accepted. The empty string decodes to
    /// an empty target, which every digest satisfies.
    ///
    /// ```rust
    /// use powsolve_core::{MalformedTargetError, Target};
    ///
    /// let target = Target::from_hex("00ffff").unwrap();
    /// assert_eq!(target.as_bytes(), &[0x00, 0xff, 0xff]);
    ///
    /// assert!(matches!(
    ///     Target::from_hex("abc"),
    ///     Err(MalformedTargetError::OddLength { len: 3 })
    /// ));
    /// ```
    pub fn from_hex(hex_str: &str) -> Result<Self, MalformedTargetError> {
        if let Some((index, character)) = hex_str
            .char_indices()
            .find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(MalformedTargetError::InvalidCharacter { character, index });
        }

        let bytes = hex::decode(hex_str).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                MalformedTargetError::InvalidCharacter {
                    character: c,
                    index,
                }
            }
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                MalformedTargetError::OddLength { len: hex_str.len() }
            }
        })?;

        Ok(Self { bytes })
    }

    /// Wrap raw threshold bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The all-0xff 32-byte target, satisfied by any SHA-256 digest
    pub fn max() -> Self {
        Self {
            bytes: vec![0xff; DIGEST_SIZE],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of threshold bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl FromStr for Target {
    type Err = MalformedTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.bytes))
    }
}

impl AsRef<[u8]> for Target {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
