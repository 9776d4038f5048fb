//! Binary envelope layout.
//!
//! `nonce (12) || ciphertext (0..) || tag (16)`, no length prefix.

use crate::error::{CipherError, Result};

/// AES-GCM nonce length.
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Smallest valid envelope (empty plaintext).
pub const MIN_LEN: usize = NONCE_LEN + TAG_LEN;

/// Borrowed view over an encrypted envelope.
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    nonce: &'a [u8],
    ciphertext: &'a [u8],
    tag: &'a [u8],
}

impl<'a> Envelope<'a> {
    /// Split raw bytes into nonce, ciphertext and tag by position.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::TooShort` when fewer than 28 bytes are given.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() < MIN_LEN {
            return Err(CipherError::TooShort {
                len: bytes.len(),
                min: MIN_LEN,
            }
            .into());
        }

        let (nonce, rest) = bytes.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);
        Ok(Self {
            nonce,
            ciphertext,
            tag,
        })
    }

    /// Leading 12 bytes.
    pub fn nonce(&self) -> &'a [u8] {
        self.nonce
    }

    /// Bytes between nonce and tag; may be empty.
    pub fn ciphertext(&self) -> &'a [u8] {
        self.ciphertext
    }

    /// Trailing 16 bytes.
    pub fn tag(&self) -> &'a [u8] {
        self.tag
    }

    /// Ciphertext followed by tag, the layout the AEAD expects.
    pub fn sealed(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.ciphertext.len() + TAG_LEN);
        out.extend_from_slice(self.ciphertext);
        out.extend_from_slice(self.tag);
        out
    }
}

/// Concatenate a nonce with AEAD output (`ciphertext || tag`).
pub fn seal(nonce: &[u8; NONCE_LEN], sealed: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
    out.extend_from_slice(nonce);
    out.extend_from_slice(sealed);
    out
}
