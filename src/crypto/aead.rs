//! XChaCha20-Poly1305 packet protection.
//!
//! Reference implementation of the [`ProtectionContext`] capability.
//! The connection derives one `PacketProtection` per direction from its
//! handshake output; this crate only consumes the finished key and IV.
//!
//! Nonce construction: the 24-byte per-context IV is XORed with the
//! packet number in the trailing 8 bytes (big-endian), so each packet
//! number yields a distinct nonce under the same key:
//!
//! ```text
//! [ iv[0..16] | iv[16..24] ^ pkt_num (BE64) ]
//! ```

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    XChaCha20Poly1305, XNonce,
};
use zeroize::Zeroize;

use crate::core::{AEAD_NONCE_SIZE, AEAD_TAG_SIZE, CryptoError, ProtectionContext};

/// Size of the session key (32 bytes for XChaCha20).
pub const SESSION_KEY_SIZE: usize = 32;

/// A session key for AEAD operations.
///
/// Zeroized on drop for security.
#[derive(Clone)]
pub struct SessionKey {
    key: [u8; SESSION_KEY_SIZE],
}

impl SessionKey {
    /// Create a new session key from bytes.
    pub fn from_bytes(key: [u8; SESSION_KEY_SIZE]) -> Self {
        Self { key }
    }

    /// Get the raw key bytes.
    ///
    /// # Security
    /// Handle with care - this exposes sensitive key material.
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.key
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

/// Packet protection bound to one direction of a connection.
pub struct PacketProtection {
    key: SessionKey,
    iv: [u8; AEAD_NONCE_SIZE],
}

impl PacketProtection {
    /// Create a protection context from a session key and per-context IV.
    pub fn new(key: SessionKey, iv: [u8; AEAD_NONCE_SIZE]) -> Self {
        Self { key, iv }
    }

    /// Build the nonce for a packet number.
    fn nonce(&self, pkt_num: u64) -> [u8; AEAD_NONCE_SIZE] {
        let mut nonce = self.iv;
        for (b, n) in nonce[AEAD_NONCE_SIZE - 8..]
            .iter_mut()
            .zip(pkt_num.to_be_bytes())
        {
            *b ^= n;
        }
        nonce
    }
}

impl ProtectionContext for PacketProtection {
    fn overhead(&self) -> usize {
        AEAD_TAG_SIZE
    }

    fn seal(&self, pkt_num: u64, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let nonce = self.nonce(pkt_num);
        let xnonce = XNonce::from_slice(&nonce);

        cipher
            .encrypt(xnonce, Payload { msg: plaintext, aad })
            .map_err(|_| CryptoError::EncryptionFailed)
    }

    fn open(&self, pkt_num: u64, aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if ciphertext.len() < AEAD_TAG_SIZE {
            return Err(CryptoError::DecryptionFailed);
        }

        let cipher = XChaCha20Poly1305::new(self.key.as_bytes().into());
        let nonce = self.nonce(pkt_num);
        let xnonce = XNonce::from_slice(&nonce);

        cipher
            .decrypt(xnonce, Payload { msg: ciphertext, aad })
            .map_err(|_| CryptoError::DecryptionFailed)
    }
}
