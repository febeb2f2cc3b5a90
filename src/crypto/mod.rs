//! Symmetric encryption of session tokens.
//!
//! The only thing ever written to a cookie is the envelope produced here:
//! URL-safe base64 of `nonce (12 bytes) || ciphertext`. The key is the
//! SHA-256 digest of a static secret, so the same secret must be used on
//! both sides.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

const NONCE_LEN: usize = 12;

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Refusing to encrypt an empty token")]
    EmptyPlaintext,

    #[error("Encryption failure: {0}")]
    Encryption(String),

    #[error("Malformed envelope: {0}")]
    Malformed(String),

    #[error("Envelope was not produced with this secret or was modified")]
    Rejected,

    #[error("Decrypted token is not valid UTF-8")]
    InvalidUtf8,
}

/// Pluggable key management for session tokens
pub trait TokenCipher: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError>;
    fn decrypt(&self, envelope: &str) -> Result<String, CryptoError>;
}

/// ChaCha20-Poly1305 keyed from one static shared secret
#[derive(Clone)]
pub struct StaticKeyCipher {
    key: [u8; 32],
}

impl StaticKeyCipher {
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Cipher keyed from the configured secret
    pub fn from_config() -> Self {
        Self::new(&crate::config::config().security.secret_key)
    }

    #[allow(deprecated)]
    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new(Key::from_slice(&self.key))
    }
}

impl std::fmt::Debug for StaticKeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticKeyCipher").finish_non_exhaustive()
    }
}

impl TokenCipher for StaticKeyCipher {
    #[allow(deprecated)]
    fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        if plaintext.is_empty() {
            return Err(CryptoError::EmptyPlaintext);
        }

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher()
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    #[allow(deprecated)]
    fn decrypt(&self, envelope: &str) -> Result<String, CryptoError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(envelope.trim())
            .map_err(|e| CryptoError::Malformed(e.to_string()))?;

        if sealed.len() <= NONCE_LEN {
            return Err(CryptoError::Malformed("envelope too short".to_string()));
        }

        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher()
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::Rejected)?;

        let token = String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)?;
        if token.is_empty() {
            return Err(CryptoError::EmptyPlaintext);
        }
        Ok(token)
    }
}
