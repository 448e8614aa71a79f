//! Integrity checks for downloaded artifacts

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::error::{Result, SetupError};

/// Hex-encoded SHA-1 of `bytes`
pub fn sha1_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

/// Hex-encoded SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// A vendor-published digest for an artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checksum {
    Sha1(String),
    Sha256(String),
}

impl Checksum {
    /// Check `bytes` against the digest; `artifact` names it in the error
    pub fn verify(&self, bytes: &[u8], artifact: &str) -> Result<()> {
        let (expected, actual) = match self {
            Checksum::Sha1(expected) => (expected, sha1_hex(bytes)),
            Checksum::Sha256(expected) => (expected, sha256_hex(bytes)),
        };
        tracing::debug!(artifact, %expected, %actual, "verifying checksum");

        if expected.trim().eq_ignore_ascii_case(&actual) {
            Ok(())
        } else {
            Err(SetupError::HashMismatch {
                artifact: artifact.to_string(),
            })
        }
    }
}

/// Check a download against the size the vendor published
pub fn verify_size(bytes: &[u8], expected: u64, artifact: &str) -> Result<()> {
    let actual = bytes.len() as u64;
    if actual == expected {
        Ok(())
    } else {
        Err(SetupError::SizeMismatch {
            artifact: artifact.to_string(),
            expected,
            actual,
        })
    }
}
