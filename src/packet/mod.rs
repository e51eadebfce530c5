//! VELOX wire codec and packet assembly.
//!
//! This module is the protocol's byte-level core:
//!
//! - **Header codec**: [`PacketHeader`] and [`PacketType`] for the long
//!   and short header forms
//! - **Frame codec**: [`Frame`] and the structured [`StreamFrame`] /
//!   [`AckFrame`] types
//! - **Packet-number reconstruction**: [`adjust_pkt_num`] and
//!   [`adjust_ack_pkt_num`]
//! - **ACK validation**: [`validate_ack`]
//! - **Packet builders**: [`PacketBuilder`] and
//!   [`ProtectedPacketBuilder`]
//!
//! # Decode flow
//!
//! A received datagram is decoded front to back: the header first, then
//! frames one at a time, each reporting exactly how many bytes it
//! consumed:
//!
//! ```rust
//! use velox_protocol::packet::{adjust_pkt_num, Frame, PacketHeader};
//!
//! # fn run(datagram: &[u8], max_pkt_num: u64) -> velox_protocol::WireResult<()> {
//! let (mut hd, hdlen) = PacketHeader::decode(datagram)?;
//! hd.pkt_num = adjust_pkt_num(max_pkt_num, hd.pkt_num, 8 * hd.ty.pkt_num_len() as u32);
//!
//! let mut payload = &datagram[hdlen..];
//! while !payload.is_empty() {
//!     let (frame, consumed) = Frame::decode(payload)?;
//!     payload = &payload[consumed..];
//!     // hand `frame` to the connection
//! }
//! # Ok(())
//! # }
//! ```

mod ack;
mod builder;
mod bytes;
mod frame;
mod header;
mod number;

pub use ack::validate_ack;
pub use builder::{PacketBuilder, ProtectedPacketBuilder};
pub use frame::{AckBlock, AckFrame, Frame, StreamFrame};
pub use header::{
    decode_version_negotiation, PacketHeader, PacketType, StatelessReset,
};
pub use number::{adjust_ack_pkt_num, adjust_pkt_num};
