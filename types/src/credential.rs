//! Fixed-width member credentials.
//!
//! A credential is the canonical 32-byte identity of a DAO member, derived
//! by the host from the member's public key. It is used directly as the key
//! in every state map; malformed input is rejected, never coerced.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A 32-byte member credential.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Credential([u8; 32]);

/// Error produced when decoding a credential from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("credential must be {expected} hex characters, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("credential contains a non-hex character at position {0}")]
    InvalidCharacter(usize),
}

impl Credential {
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

    /// Decode a credential from a 64-character hex string.
    ///
    /// Wrong-length or non-hex input is an error; there is no lossy
    /// fallback for malformed credentials.
    pub fn from_hex(s: &str) -> Result<Self, CredentialError> {
        if s.len() != 64 {
            return Err(CredentialError::InvalidLength {
                expected: 64,
                got: s.len(),
            });
        }
        let mut bytes = [0u8; 32];
        for (i, chunk) in s.as_bytes().chunks_exact(2).enumerate() {
            let hi = hex_val(chunk[0]).ok_or(CredentialError::InvalidCharacter(i * 2))?;
            let lo = hex_val(chunk[1]).ok_or(CredentialError::InvalidCharacter(i * 2 + 1))?;
            bytes[i] = (hi << 4) | lo;
        }
        Ok(Self(bytes))
    }

    /// Encode this credential as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Credential {
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
    fn test_hex_round_trip() {
        let cred = Credential::new([0xab; 32]);
        let encoded = cred.to_hex();
        assert_eq!(encoded.len(), 64);
        assert_eq!(Credential::from_hex(&encoded), Ok(cred));
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        let result = Credential::from_hex("abcd");
        assert_eq!(
            result,
            Err(CredentialError::InvalidLength {
                expected: 64,
                got: 4
            })
        );
    }

    #[test]
    fn test_from_hex_rejects_overlong_input() {
        // Longer-than-canonical input must error, not truncate.
        let s = "ab".repeat(40);
        let result = Credential::from_hex(&s);
        assert_eq!(
            result,
            Err(CredentialError::InvalidLength {
                expected: 64,
                got: 80
            })
        );
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let s = format!("zz{}", "ab".repeat(31));
        assert_eq!(
            Credential::from_hex(&s),
            Err(CredentialError::InvalidCharacter(0))
        );
    }

    #[test]
    fn test_mixed_case_hex_accepted() {
        let s = format!("AB{}", "cd".repeat(31));
        let cred = Credential::from_hex(&s).unwrap();
        assert_eq!(cred.as_bytes()[0], 0xab);
    }

    #[test]
    fn test_ordering_is_byte_lexicographic() {
        let a = Credential::new([1u8; 32]);
        let b = Credential::new([2u8; 32]);
        assert!(a < b);
    }
}
