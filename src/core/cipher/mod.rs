//! Cryptographic operations.
//!
//! AES-256-GCM over the fixed envelope in [`envelope`]. Every call to
//! [`encrypt`] draws a fresh random nonce; failures are terminal.

pub mod envelope;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::core::domain::MasterKey;
use crate::error::{CipherError, Result};

pub use crate::core::domain::validate_key;
pub use envelope::{Envelope, MIN_LEN, NONCE_LEN, TAG_LEN};

/// Generate a new random master key.
pub fn generate_key() -> MasterKey {
    MasterKey::generate()
}

/// Encrypt plaintext into `nonce || ciphertext || tag`.
///
/// # Errors
///
/// Returns `CipherError::EncryptionFailed` if the AEAD rejects the input.
pub fn encrypt(plaintext: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let sealed = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|_| CipherError::EncryptionFailed)?;

    debug!(plaintext = plaintext.len(), "encrypted");
    Ok(envelope::seal(&nonce, &sealed))
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
///
/// Returns `CipherError::TooShort` below 28 bytes and
/// `CipherError::DecryptionFailed` for any authentication failure.
pub fn decrypt(bytes: &[u8], key: &MasterKey) -> Result<Vec<u8>> {
    let envelope = Envelope::parse(bytes)?;
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));

    let plaintext = cipher
        .decrypt(Nonce::from_slice(envelope.nonce()), envelope.sealed().as_slice())
        .map_err(|_| CipherError::DecryptionFailed)?;

    debug!(plaintext = plaintext.len(), "decrypted");
    Ok(plaintext)
}
