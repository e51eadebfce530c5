//! Core traits for the VELOX wire-format layer.

use super::error::CryptoError;

/// Packet protection capability, bound to a connection's current keys.
///
/// The wire core never derives or holds key material; it borrows a
/// `ProtectionContext` from the connection for exactly one seal or open
/// operation. Implementations are algorithm-agnostic from this crate's
/// point of view: the only contract is the trailer size reported by
/// [`overhead`](ProtectionContext::overhead) and the length arithmetic of
/// `seal`/`open`.
///
/// The packet number feeds nonce construction, so a (key, packet number)
/// pair must never be reused across seal calls; enforcing that is the
/// connection's responsibility.
pub trait ProtectionContext {
    /// Number of bytes `seal` appends beyond the plaintext length.
    fn overhead(&self) -> usize;

    /// Seal `plaintext`, authenticating `aad` alongside it.
    ///
    /// Returns exactly `plaintext.len() + self.overhead()` bytes.
    fn seal(&self, pkt_num: u64, aad: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Open `ciphertext` produced by [`seal`](ProtectionContext::seal)
    /// with the same packet number and `aad`.
    ///
    /// Returns the recovered plaintext, `ciphertext.len() -
    /// self.overhead()` bytes, or fails if authentication fails.
    fn open(&self, pkt_num: u64, aad: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
