//! Wire-format constants from the VELOX protocol specification.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

// =============================================================================
// PACKET HEADER BITS
// =============================================================================

/// Header form bit: set for the long form, clear for the short form.
pub const HEADER_FORM_BIT: u8 = 0x80;

/// Connection-id-present bit (short form).
pub const CONN_ID_BIT: u8 = 0x40;

/// Key phase bit (short form).
pub const KEY_PHASE_BIT: u8 = 0x20;

/// Mask extracting the packet type from a long-form flags byte.
pub const LONG_TYPE_MASK: u8 = 0x7f;

/// Mask extracting the packet type from a short-form flags byte.
pub const SHORT_TYPE_MASK: u8 = 0x1f;

/// Fixed long header length: flags + connection id + packet number + version.
pub const LONG_HEADER_SIZE: usize = 17;

// =============================================================================
// STREAM FRAME BITS
// =============================================================================

/// FIN bit in a STREAM type byte.
pub const STREAM_FIN_BIT: u8 = 0x20;

/// Stream-id width selector (SS) mask in a STREAM type byte.
pub const STREAM_SS_MASK: u8 = 0x18;

/// Offset width selector (OO) mask in a STREAM type byte.
pub const STREAM_OO_MASK: u8 = 0x06;

/// Explicit-data-length bit (D) in a STREAM type byte.
pub const STREAM_D_BIT: u8 = 0x01;

/// Maximum non-payload bytes of a STREAM frame: type byte, widest
/// stream id, widest offset, and the explicit length field.
pub const STREAM_OVERHEAD: usize = 15;

// =============================================================================
// ACK FRAME BITS
// =============================================================================

/// Additional-ack-blocks bit (N) in an ACK type byte.
pub const ACK_N_BIT: u8 = 0x10;

/// Largest-acknowledged width selector (LL) mask in an ACK type byte.
pub const ACK_LL_MASK: u8 = 0x0c;

/// Ack-block-length width selector (MM) mask in an ACK type byte.
pub const ACK_MM_MASK: u8 = 0x03;

/// Ack delay field width in bytes.
pub const ACK_DELAY_SIZE: usize = 2;

/// Maximum number of ack blocks one frame can carry (first block plus a
/// one-byte additional-block count).
pub const ACK_MAX_BLOCKS: usize = 256;

// =============================================================================
// FRAME TYPE BYTES
// =============================================================================

/// PADDING frame.
pub const FRAME_TYPE_PADDING: u8 = 0x00;

/// RST_STREAM frame.
pub const FRAME_TYPE_RST_STREAM: u8 = 0x01;

/// CONNECTION_CLOSE frame.
pub const FRAME_TYPE_CONNECTION_CLOSE: u8 = 0x02;

/// GOAWAY frame.
pub const FRAME_TYPE_GOAWAY: u8 = 0x03;

/// MAX_DATA frame.
pub const FRAME_TYPE_MAX_DATA: u8 = 0x04;

/// MAX_STREAM_DATA frame.
pub const FRAME_TYPE_MAX_STREAM_DATA: u8 = 0x05;

/// MAX_STREAM_ID frame.
pub const FRAME_TYPE_MAX_STREAM_ID: u8 = 0x06;

/// PING frame.
pub const FRAME_TYPE_PING: u8 = 0x07;

/// BLOCKED frame.
pub const FRAME_TYPE_BLOCKED: u8 = 0x08;

/// STREAM_BLOCKED frame.
pub const FRAME_TYPE_STREAM_BLOCKED: u8 = 0x09;

/// STREAM_ID_BLOCKED frame.
pub const FRAME_TYPE_STREAM_ID_BLOCKED: u8 = 0x0a;

/// NEW_CONNECTION_ID frame.
pub const FRAME_TYPE_NEW_CONNECTION_ID: u8 = 0x0b;

/// STOP_SENDING frame.
pub const FRAME_TYPE_STOP_SENDING: u8 = 0x0c;

/// APPLICATION_CLOSE frame.
pub const FRAME_TYPE_APPLICATION_CLOSE: u8 = 0x0d;

/// Base type byte of the ACK range (`0xa0..=0xbf`, low 5 bits structural).
pub const FRAME_TYPE_ACK: u8 = 0xa0;

/// Base type byte of the STREAM range (`0xc0..=0xff`, low 6 bits structural).
pub const FRAME_TYPE_STREAM: u8 = 0xc0;

// =============================================================================
// MISC SIZES
// =============================================================================

/// Stateless reset token size.
pub const STATELESS_RESET_TOKEN_SIZE: usize = 16;

/// AEAD authentication tag size (Poly1305).
pub const AEAD_TAG_SIZE: usize = 16;

/// XChaCha20 nonce size.
pub const AEAD_NONCE_SIZE: usize = 24;

/// Recommended maximum packet size for mobile networks.
pub const RECOMMENDED_MAX_PACKET: usize = 1200;
