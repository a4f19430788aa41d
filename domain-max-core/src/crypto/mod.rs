//! Credential-at-rest encryption.
//!
//! Provider configs are stored as a single opaque base64 envelope:
//! `base64( 12-byte nonce || AES-256-GCM ciphertext || 16-byte tag )`.
//! Ciphertexts are self-contained; rotating the passphrase means
//! re-encrypting every envelope externally.

use std::collections::HashMap;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};

const NONCE_LENGTH: usize = 12;
const KEY_LENGTH: usize = 32; // AES-256

/// AES-256-GCM encrypt/decrypt over strings, with JSON wrappers for the
/// flat credential maps.
///
/// The key is `SHA-256(passphrase)`, unstretched; the envelope format
/// stays stable if a password-based KDF is substituted for low-entropy
/// deployments.
pub struct CryptoService {
    key: [u8; KEY_LENGTH],
}

impl CryptoService {
    /// Derive the AES key from a passphrase.
    #[must_use]
    pub fn new(passphrase: &str) -> Self {
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut key = [0u8; KEY_LENGTH];
        key.copy_from_slice(&digest);
        Self { key }
    }

    fn cipher(&self) -> CoreResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| CoreError::Crypto(format!("failed to create cipher: {e}")))
    }

    /// Encrypt a plaintext string into a self-contained base64 envelope.
    ///
    /// A fresh random nonce is drawn per call, so equal plaintexts yield
    /// distinct ciphertexts.
    pub fn encrypt(&self, plaintext: &str) -> CoreResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LENGTH];
        rand::rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()?
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CoreError::Crypto("encryption failed".to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(envelope))
    }

    /// Reverse [`encrypt`](Self::encrypt).
    ///
    /// Any malformed envelope or AEAD verification failure, including a
    /// single flipped ciphertext byte, is a [`CoreError::Crypto`].
    pub fn decrypt(&self, envelope_b64: &str) -> CoreResult<String> {
        let envelope = BASE64
            .decode(envelope_b64)
            .map_err(|e| CoreError::Crypto(format!("invalid envelope encoding: {e}")))?;

        if envelope.len() < NONCE_LENGTH {
            return Err(CoreError::Crypto("envelope too short".to_string()));
        }
        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LENGTH);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher()?
            .decrypt(nonce, ciphertext)
            .map_err(|_| CoreError::Crypto("decryption failed: wrong key or corrupted data".to_string()))?;

        String::from_utf8(plaintext)
            .map_err(|e| CoreError::Crypto(format!("decrypted data is not UTF-8: {e}")))
    }

    /// Serialize a flat string map to JSON, then encrypt it.
    pub fn encrypt_json(&self, map: &HashMap<String, String>) -> CoreResult<String> {
        let json = serde_json::to_string(map)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
        self.encrypt(&json)
    }

    /// Reverse [`encrypt_json`](Self::encrypt_json).
    pub fn decrypt_json(&self, envelope_b64: &str) -> CoreResult<HashMap<String, String>> {
        let json = self.decrypt(envelope_b64)?;
        serde_json::from_str(&json).map_err(|e| CoreError::Serialization(e.to_string()))
    }
}
