//! # VELOX Protocol
//!
//! **V**ersatile **E**ncrypted **L**ow-**O**verhead e**X**change
//!
//! VELOX is a secure, UDP-based multiplexed transport protocol in the QUIC
//! family. This crate is its wire-format core:
//!
//! - **Header codec**: long and short packet headers ([`PacketHeader`])
//! - **Frame codec**: the full frame set ([`Frame`]), decoded from and
//!   encoded into caller-owned byte ranges
//! - **Packet-number reconstruction**: expanding wire-truncated packet
//!   numbers against the highest authenticated packet number
//! - **ACK validation**: structural checks on acknowledgment block ranges
//! - **Packet builders**: incremental assembly of one outgoing packet,
//!   with optional payload protection ([`PacketBuilder`],
//!   [`ProtectedPacketBuilder`])
//!
//! Everything here is a synchronous, allocation-light transform over
//! caller-owned memory. Connection state (retransmission, flow control,
//! handshake) and socket I/O live above this crate; cryptographic keys
//! arrive through the [`ProtectionContext`] capability.
//!
//! ## Feature Flags
//!
//! - `crypto` (default): XChaCha20-Poly1305 packet protection
//!   ([`crypto::PacketProtection`])
//!
//! ## Example
//!
//! ```rust
//! use velox_protocol::prelude::*;
//!
//! // Assemble an unprotected packet: short header plus a PING frame.
//! let mut buf = [0u8; 64];
//! let mut pe = PacketBuilder::new(&mut buf).unwrap();
//! let hd = PacketHeader::short(PacketType::Short02, Some(0x1234), 7, false);
//! pe.encode_header(&hd).unwrap();
//! pe.encode_frame(&Frame::Ping).unwrap();
//! let pktlen = pe.finish().unwrap();
//!
//! // Decode it back.
//! let (decoded, hdlen) = PacketHeader::decode(&buf[..pktlen]).unwrap();
//! assert_eq!(decoded.pkt_num, 7);
//! let (frame, _) = Frame::decode(&buf[hdlen..pktlen]).unwrap();
//! assert_eq!(frame, Frame::Ping);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Wire codec and packet assembly
pub mod packet;

// Packet protection (feature-gated)
#[cfg(feature = "crypto")]
#[cfg_attr(docsrs, doc(cfg(feature = "crypto")))]
pub mod crypto;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core errors, constants, and the protection capability
    pub use crate::core::*;

    // Wire codec types
    pub use crate::packet::*;

    // Concrete packet protection (when enabled)
    #[cfg(feature = "crypto")]
    pub use crate::crypto::*;
}

// Re-export commonly used items at crate root
pub use core::{CryptoError, ProtectionContext, WireError, WireResult};
pub use packet::{
    AckBlock, AckFrame, Frame, PacketBuilder, PacketHeader, PacketType,
    ProtectedPacketBuilder, StreamFrame,
};
