//! Error types for the VELOX wire-format core.

use thiserror::Error;

/// Result alias for wire codec and builder operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors produced by the wire codec and the packet builders.
///
/// Structural decode errors (`InvalidArgument`, `UnknownPacketType`,
/// `FrameFormat`) are detected before any caller-visible state changes.
/// Encode-side errors (`NoBuffer`, `InvalidState`) leave the destination
/// buffer and the builder cursor untouched, so the caller can retry with
/// a larger buffer or a smaller frame.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Buffer is shorter than a fixed or declared layout requires, or a
    /// value cannot be represented in its wire field.
    #[error("invalid argument")]
    InvalidArgument,

    /// Header type byte outside the recognized set for its form.
    #[error("unknown packet type: 0x{0:02x}")]
    UnknownPacketType(u8),

    /// Payload is too short for the frame's declared layout, or the
    /// frame type byte is not recognized.
    #[error("invalid frame format")]
    FrameFormat,

    /// ACK blocks violate ordering or bounds invariants.
    #[error("malformed ack frame")]
    AckFrame,

    /// Destination buffer cannot hold the full encoding.
    #[error("no buffer space: required {required} bytes, available {available}")]
    NoBuffer {
        /// Bytes needed to complete the write.
        required: usize,
        /// Bytes available in the destination.
        available: usize,
    },

    /// Packet builder used out of order or after finalization.
    #[error("invalid encoder state")]
    InvalidState,

    /// Packet protection failed while finalizing.
    #[error("protection failed: {0}")]
    Crypto(#[from] CryptoError),
}

/// Errors raised by a packet protection context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// AEAD encryption failed.
    #[error("AEAD encryption failed")]
    EncryptionFailed,

    /// AEAD decryption failed (invalid tag or corrupted).
    #[error("AEAD decryption failed (invalid tag or corrupted)")]
    DecryptionFailed,
}
