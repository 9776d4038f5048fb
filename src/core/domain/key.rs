//! Master key type.
//!
//! Wraps the 32-byte AES-256 key with zeroize-on-drop handling. The key is
//! never printed: `Debug` shows only a fingerprint.

use std::fmt;
use std::path::PathBuf;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{CipherError, Result};

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Key length in hex characters.
pub const KEY_HEX_LEN: usize = KEY_LEN * 2;

/// A 256-bit master key.
#[derive(Clone, PartialEq, Eq)]
pub struct MasterKey([u8; KEY_LEN]);

impl MasterKey {
    /// Generate a new key from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Parse a hex-encoded key (64 characters, any case).
    ///
    /// # Errors
    ///
    /// Returns `CipherError::InvalidKey` when the length or charset is wrong.
    pub fn from_hex(candidate: &str) -> Result<Self> {
        validate_key(candidate)?;

        let decoded = Zeroizing::new(
            hex::decode(candidate).map_err(|e| CipherError::InvalidKey(e.to_string()))?,
        );
        let mut bytes = [0u8; KEY_LEN];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    /// Lowercase hex encoding, as written to the key file.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.0))
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Short, non-reversible identifier for display.
    ///
    /// First 8 hex characters of the SHA-256 of the key bytes.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0);
        hex::encode(&digest[..4])
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MasterKey")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Check that a candidate is exactly 64 hex characters.
///
/// # Errors
///
/// Returns `CipherError::InvalidKey` naming the problem; the candidate
/// itself is never echoed.
pub fn validate_key(candidate: &str) -> Result<()> {
    if candidate.len() != KEY_HEX_LEN {
        return Err(CipherError::InvalidKey(format!(
            "expected {} hex characters, got {}",
            KEY_HEX_LEN,
            candidate.chars().count()
        ))
        .into());
    }

    if let Some(pos) = candidate.chars().position(|c| !c.is_ascii_hexdigit()) {
        return Err(CipherError::InvalidKey(format!(
            "non-hex character at position {}",
            pos + 1
        ))
        .into());
    }

    Ok(())
}

/// Where a resolved master key came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// Explicit `--master-key` path.
    Flag(PathBuf),
    /// `NVOI_MASTER_KEY` environment variable.
    Env,
    /// Discovered key file.
    File(PathBuf),
    /// Freshly generated by `init`.
    Generated(PathBuf),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(p) => write!(f, "--master-key {}", p.display()),
            Self::Env => write!(f, "${}", crate::core::constants::MASTER_KEY_ENV),
            Self::File(p) => write!(f, "{}", p.display()),
            Self::Generated(p) => write!(f, "{} (new)", p.display()),
        }
    }
}
