//! PBKDF2-HMAC-SHA256 key derivation and AES-256-GCM encryption for the DCT path.
//!
//! Key derivation: PBKDF2-HMAC-SHA256(password, salt, 100_000 iterations) → 32-byte key
//! Encryption:     AES-256-GCM, random salt + random nonce, empty AAD
//!
//! Encrypted payload layout: `salt (16 B) | nonce (12 B) | ciphertext | GCM tag (16 B)`

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm};
use hmac::Hmac;
use sha2::Sha256;
use thiserror::Error;

/// Byte length of the random salt prepended to every encrypted payload.
pub const SALT_LEN: usize = 16;
/// Byte length of the AES-GCM nonce, written immediately after the salt.
pub const NONCE_LEN: usize = 12;
/// PBKDF2 iteration count. Fixed — part of the interoperable format.
pub const PBKDF2_ITERATIONS: u32 = 100_000;
/// Minimum length of a valid encrypted payload: salt + nonce + empty-message tag.
pub const MIN_CIPHERTEXT_LEN: usize = SALT_LEN + NONCE_LEN + 16;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed")]
    EncryptionFailed,
    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,
    #[error("Encrypted payload too short (minimum {MIN_CIPHERTEXT_LEN} bytes)")]
    TooShort,
}

/// Derive a 256-bit key from `password` and a 16-byte `salt` via PBKDF2-HMAC-SHA256.
pub fn derive_key(password: &str, salt: &[u8; SALT_LEN]) -> [u8; 32] {
    let mut key = [0u8; 32];
    let _ = pbkdf2::pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Encrypt `plaintext` with AES-256-GCM under a freshly derived key and nonce.
///
/// Returns `salt (16 B) || nonce (12 B) || ciphertext || GCM-tag (16 B)`.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    rand::RngCore::fill_bytes(&mut OsRng, &mut salt);
    let key = derive_key(password, &salt);

    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::EncryptionFailed)?;
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut out = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&salt);
    out.extend_from_slice(nonce.as_slice());
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a payload produced by [`encrypt`].
///
/// Input must be `salt (16 B) || nonce (12 B) || ciphertext+tag`, at least
/// [`MIN_CIPHERTEXT_LEN`] bytes. Fails as [`CryptoError::DecryptionFailed`] on
/// wrong password, a tampered ciphertext, or a tampered salt/nonce.
pub fn decrypt(password: &str, data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if data.len() < MIN_CIPHERTEXT_LEN {
        return Err(CryptoError::TooShort);
    }
    let salt: [u8; SALT_LEN] = data[..SALT_LEN].try_into().unwrap();
    let nonce_bytes = &data[SALT_LEN..SALT_LEN + NONCE_LEN];
    let ciphertext = &data[SALT_LEN + NONCE_LEN..];

    let key = derive_key(password, &salt);
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| CryptoError::DecryptionFailed)?;
    let nonce = aes_gcm::Nonce::from_slice(nonce_bytes);
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let ct = encrypt("correct horse", b"hello world").unwrap();
        let pt = decrypt("correct horse", &ct).unwrap();
        assert_eq!(pt, b"hello world");
    }

    #[test]
    fn wrong_password_fails() {
        let ct = encrypt("correct horse", b"hello world").unwrap();
        assert!(decrypt("wrong password", &ct).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let mut ct = encrypt("correct horse", b"hello world").unwrap();
        let last = ct.len() - 1;
        ct[last] ^= 0x01;
        assert!(decrypt("correct horse", &ct).is_err());
    }

    #[test]
    fn short_input_fails() {
        assert!(matches!(decrypt("pw", &[0u8; 10]), Err(CryptoError::TooShort)));
    }

    #[test]
    fn salt_and_nonce_are_fresh_each_call() {
        let a = encrypt("pw", b"msg").unwrap();
        let b = encrypt("pw", b"msg").unwrap();
        assert_ne!(&a[..28], &b[..28]);
    }
}
