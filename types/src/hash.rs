//! Content identifiers for proposals, treasury transactions and metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte content identifier.
///
/// Used as the id of proposals and pending treasury transactions (derived
/// from the creating transaction by the host) and as the reference to
/// off-chain proposal metadata. The core never inspects the content behind
/// a metadata reference.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

// Inline hex encoding to avoid adding the `hex` crate as a dependency of types.
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_hash() {
        assert!(ContentHash::ZERO.is_zero());
        assert!(!ContentHash::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_display_is_full_hex() {
        let hash = ContentHash::new([0xffu8; 32]);
        assert_eq!(hash.to_string(), "ff".repeat(32));
    }
}
