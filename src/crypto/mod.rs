//! Concrete packet protection (XChaCha20-Poly1305).

mod aead;

pub use aead::{PacketProtection, SessionKey, SESSION_KEY_SIZE};
