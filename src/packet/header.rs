//! Packet header encoding and decoding.
//!
//! VELOX uses the two QUIC-family header forms:
//!
//! Long header (pre-handshake, 17 bytes fixed):
//! ```text
//! +--------+----------------------+----------------+------------+
//! | Flags  | Connection ID        | Packet Number  | Version    |
//! | 1 byte | 8 bytes (BE64)       | 4 bytes (BE32) | 4 bytes    |
//! +--------+----------------------+----------------+------------+
//! ```
//! Flags: `0x80` form marker, low 7 bits packet type.
//!
//! Short header (post-handshake, compact):
//! ```text
//! +--------+----------------------+------------------+
//! | Flags  | [Connection ID]      | Packet Number    |
//! | 1 byte | 8 bytes if 0x40 set  | 1/2/4 bytes (BE) |
//! +--------+----------------------+------------------+
//! ```
//! Flags: `0x80` clear, `0x40` connection-id present, `0x20` key phase,
//! low bits select the truncated packet number width.
//!
//! Decoded packet numbers are *not* reconstructed here; see
//! [`adjust_pkt_num`](crate::packet::adjust_pkt_num).

use crate::core::{
    CONN_ID_BIT, HEADER_FORM_BIT, KEY_PHASE_BIT, LONG_HEADER_SIZE, LONG_TYPE_MASK,
    SHORT_TYPE_MASK, STATELESS_RESET_TOKEN_SIZE, WireError, WireResult,
};

use super::bytes::{get_u32, get_u64, get_uint, put_uint};

/// Packet type, as carried in the low bits of the flags byte.
///
/// The first nine variants are long-form types; the `Short*` variants are
/// the short form's width selectors (the short form has no other type
/// information).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// Version negotiation (long form, 0x01).
    VersionNegotiation,
    /// Client initial (long form, 0x02).
    ClientInitial,
    /// Server stateless retry (long form, 0x03).
    ServerStatelessRetry,
    /// Server cleartext (long form, 0x04).
    ServerCleartext,
    /// Client cleartext (long form, 0x05).
    ClientCleartext,
    /// 0-RTT protected (long form, 0x06).
    ZeroRttProtected,
    /// 1-RTT protected, key phase 0 (long form, 0x07).
    OneRttProtectedK0,
    /// 1-RTT protected, key phase 1 (long form, 0x08).
    OneRttProtectedK1,
    /// Public reset (long form, 0x09).
    PublicReset,
    /// Short header, 1-byte packet number (0x01).
    Short01,
    /// Short header, 2-byte packet number (0x02).
    Short02,
    /// Short header, 4-byte packet number (0x03).
    Short03,
}

impl PacketType {
    /// Parse a long-form type from the low 7 bits of a flags byte.
    pub fn long_from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::VersionNegotiation),
            0x02 => Some(Self::ClientInitial),
            0x03 => Some(Self::ServerStatelessRetry),
            0x04 => Some(Self::ServerCleartext),
            0x05 => Some(Self::ClientCleartext),
            0x06 => Some(Self::ZeroRttProtected),
            0x07 => Some(Self::OneRttProtectedK0),
            0x08 => Some(Self::OneRttProtectedK1),
            0x09 => Some(Self::PublicReset),
            _ => None,
        }
    }

    /// Parse a short-form type (width selector) from a masked flags byte.
    pub fn short_from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(Self::Short01),
            0x02 => Some(Self::Short02),
            0x03 => Some(Self::Short03),
            _ => None,
        }
    }

    /// The type bits as they appear in the flags byte.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::VersionNegotiation | Self::Short01 => 0x01,
            Self::ClientInitial | Self::Short02 => 0x02,
            Self::ServerStatelessRetry | Self::Short03 => 0x03,
            Self::ServerCleartext => 0x04,
            Self::ClientCleartext => 0x05,
            Self::ZeroRttProtected => 0x06,
            Self::OneRttProtectedK0 => 0x07,
            Self::OneRttProtectedK1 => 0x08,
            Self::PublicReset => 0x09,
        }
    }

    /// Whether this is a long-form type.
    pub fn is_long(self) -> bool {
        !matches!(self, Self::Short01 | Self::Short02 | Self::Short03)
    }

    /// Wire width of the truncated packet number for this type.
    pub fn pkt_num_len(self) -> usize {
        match self {
            Self::Short01 => 1,
            Self::Short02 => 2,
            _ => 4,
        }
    }
}

/// A decoded packet header, either form.
///
/// `pkt_num` holds the wire-truncated value straight after decoding and
/// the full 64-bit value once the caller has run packet-number
/// reconstruction. `version` is meaningful only for the long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Packet type (also determines the header form).
    pub ty: PacketType,
    /// Key phase bit (short form).
    pub key_phase: bool,
    /// Connection id; always present in the long form.
    pub conn_id: Option<u64>,
    /// Packet number (truncated on the wire, full-width in memory).
    pub pkt_num: u64,
    /// Protocol version (long form only).
    pub version: u32,
}

impl PacketHeader {
    /// Create a long-form header.
    pub fn long(ty: PacketType, conn_id: u64, pkt_num: u64, version: u32) -> Self {
        Self {
            ty,
            key_phase: false,
            conn_id: Some(conn_id),
            pkt_num,
            version,
        }
    }

    /// Create a short-form header.
    pub fn short(ty: PacketType, conn_id: Option<u64>, pkt_num: u64, key_phase: bool) -> Self {
        Self {
            ty,
            key_phase,
            conn_id,
            pkt_num,
            version: 0,
        }
    }

    /// Decode either header form, dispatching on the form bit.
    ///
    /// Returns the header and the exact number of bytes consumed.
    pub fn decode(pkt: &[u8]) -> WireResult<(Self, usize)> {
        if pkt.is_empty() {
            return Err(WireError::InvalidArgument);
        }
        if pkt[0] & HEADER_FORM_BIT != 0 {
            Self::decode_long(pkt)
        } else {
            Self::decode_short(pkt)
        }
    }

    /// Decode a long header from the start of `pkt`.
    pub fn decode_long(pkt: &[u8]) -> WireResult<(Self, usize)> {
        if pkt.len() < LONG_HEADER_SIZE {
            return Err(WireError::InvalidArgument);
        }
        if pkt[0] & HEADER_FORM_BIT == 0 {
            return Err(WireError::InvalidArgument);
        }

        let type_bits = pkt[0] & LONG_TYPE_MASK;
        let ty =
            PacketType::long_from_byte(type_bits).ok_or(WireError::UnknownPacketType(type_bits))?;

        let conn_id = get_u64(&pkt[1..]);
        let pkt_num = u64::from(get_u32(&pkt[9..]));
        let version = get_u32(&pkt[13..]);

        Ok((
            Self {
                ty,
                key_phase: false,
                conn_id: Some(conn_id),
                pkt_num,
                version,
            },
            LONG_HEADER_SIZE,
        ))
    }

    /// Decode a short header from the start of `pkt`.
    pub fn decode_short(pkt: &[u8]) -> WireResult<(Self, usize)> {
        if pkt.is_empty() {
            return Err(WireError::InvalidArgument);
        }
        if pkt[0] & HEADER_FORM_BIT != 0 {
            return Err(WireError::InvalidArgument);
        }

        let type_bits = pkt[0] & SHORT_TYPE_MASK;
        let ty = PacketType::short_from_byte(type_bits)
            .ok_or(WireError::UnknownPacketType(type_bits))?;

        let has_conn_id = pkt[0] & CONN_ID_BIT != 0;
        let key_phase = pkt[0] & KEY_PHASE_BIT != 0;
        let num_len = ty.pkt_num_len();

        let len = 1 + if has_conn_id { 8 } else { 0 } + num_len;
        if pkt.len() < len {
            return Err(WireError::InvalidArgument);
        }

        let mut pos = 1;
        let conn_id = if has_conn_id {
            let id = get_u64(&pkt[pos..]);
            pos += 8;
            Some(id)
        } else {
            None
        };
        let pkt_num = get_uint(&pkt[pos..], num_len);

        Ok((
            Self {
                ty,
                key_phase,
                conn_id,
                pkt_num,
                version: 0,
            },
            len,
        ))
    }

    /// Encode this header into `out`, returning bytes written.
    ///
    /// The writer is total: on [`WireError::NoBuffer`] nothing has been
    /// written.
    pub fn encode_into(&self, out: &mut [u8]) -> WireResult<usize> {
        if self.ty.is_long() {
            self.encode_long(out)
        } else {
            self.encode_short(out)
        }
    }

    fn encode_long(&self, out: &mut [u8]) -> WireResult<usize> {
        if out.len() < LONG_HEADER_SIZE {
            return Err(WireError::NoBuffer {
                required: LONG_HEADER_SIZE,
                available: out.len(),
            });
        }

        out[0] = HEADER_FORM_BIT | self.ty.to_byte();
        put_uint(&mut out[1..], self.conn_id.unwrap_or_default(), 8);
        put_uint(&mut out[9..], self.pkt_num & 0xffff_ffff, 4);
        put_uint(&mut out[13..], u64::from(self.version), 4);

        Ok(LONG_HEADER_SIZE)
    }

    fn encode_short(&self, out: &mut [u8]) -> WireResult<usize> {
        let num_len = self.ty.pkt_num_len();
        let len = 1 + if self.conn_id.is_some() { 8 } else { 0 } + num_len;
        if out.len() < len {
            return Err(WireError::NoBuffer {
                required: len,
                available: out.len(),
            });
        }

        let mut flags = self.ty.to_byte();
        if self.conn_id.is_some() {
            flags |= CONN_ID_BIT;
        }
        if self.key_phase {
            flags |= KEY_PHASE_BIT;
        }
        out[0] = flags;

        let mut pos = 1;
        if let Some(id) = self.conn_id {
            put_uint(&mut out[pos..], id, 8);
            pos += 8;
        }
        let mask = if num_len == 8 { u64::MAX } else { (1u64 << (num_len * 8)) - 1 };
        put_uint(&mut out[pos..], self.pkt_num & mask, num_len);

        Ok(len)
    }
}

/// Decode the payload of a version negotiation packet into the list of
/// versions the peer supports.
///
/// The payload must be a whole number of 4-byte versions.
pub fn decode_version_negotiation(payload: &[u8]) -> WireResult<Vec<u32>> {
    if payload.len() % 4 != 0 {
        return Err(WireError::InvalidArgument);
    }
    Ok(payload.chunks_exact(4).map(get_u32).collect())
}

/// A decoded stateless reset payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatelessReset {
    /// The 16-byte stateless reset token.
    pub token: [u8; STATELESS_RESET_TOKEN_SIZE],
    /// The random tail following the token.
    pub rand: Vec<u8>,
}

impl StatelessReset {
    /// Decode a stateless reset payload, which must start with the token.
    pub fn decode(payload: &[u8]) -> WireResult<Self> {
        if payload.len() < STATELESS_RESET_TOKEN_SIZE {
            return Err(WireError::InvalidArgument);
        }
        let mut token = [0u8; STATELESS_RESET_TOKEN_SIZE];
        token.copy_from_slice(&payload[..STATELESS_RESET_TOKEN_SIZE]);
        Ok(Self {
            token,
            rand: payload[STATELESS_RESET_TOKEN_SIZE..].to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_header_roundtrip() {
        let hd = PacketHeader::long(
            PacketType::ClientInitial,
            0x1122_3344_5566_7788,
            0xdead_beef,
            0x0000_0001,
        );

        let mut buf = [0u8; 32];
        let written = hd.encode_into(&mut buf).unwrap();
        assert_eq!(written, LONG_HEADER_SIZE);
        assert_eq!(buf[0], 0x82);

        let (decoded, consumed) = PacketHeader::decode_long(&buf[..written]).unwrap();
        assert_eq!(consumed, written);
        assert_eq!(decoded, hd);
    }

    #[test]
    fn test_long_header_wire_layout() {
        let hd = PacketHeader::long(PacketType::ServerCleartext, 0x0102_0304_0506_0708, 9, 0x1a2a3a4a);
        let mut buf = [0u8; LONG_HEADER_SIZE];
        hd.encode_into(&mut buf).unwrap();
        assert_eq!(
            hex::encode(buf),
            "840102030405060708000000091a2a3a4a"
        );
    }

    #[test]
    fn test_long_header_truncated() {
        let hd = PacketHeader::long(PacketType::ClientCleartext, 1, 2, 3);
        let mut buf = [0u8; LONG_HEADER_SIZE];
        hd.encode_into(&mut buf).unwrap();

        for len in 0..LONG_HEADER_SIZE {
            assert_eq!(
                PacketHeader::decode_long(&buf[..len]),
                Err(WireError::InvalidArgument),
                "len={len}"
            );
        }
    }

    #[test]
    fn test_long_header_unknown_type() {
        let mut buf = [0u8; LONG_HEADER_SIZE];
        buf[0] = HEADER_FORM_BIT | 0x0a;
        assert_eq!(
            PacketHeader::decode_long(&buf),
            Err(WireError::UnknownPacketType(0x0a))
        );

        buf[0] = HEADER_FORM_BIT; // type 0x00
        assert_eq!(
            PacketHeader::decode_long(&buf),
            Err(WireError::UnknownPacketType(0x00))
        );
    }

    #[test]
    fn test_long_header_rejects_short_form() {
        let buf = [0u8; LONG_HEADER_SIZE];
        assert_eq!(
            PacketHeader::decode_long(&buf),
            Err(WireError::InvalidArgument)
        );
    }

    #[test]
    fn test_short_header_roundtrip_all_widths() {
        for (ty, num_len) in [
            (PacketType::Short01, 1usize),
            (PacketType::Short02, 2),
            (PacketType::Short03, 4),
        ] {
            let pkt_num = 0xffff_ffffu64 & ((1 << (num_len * 8)) - 1);
            let hd = PacketHeader::short(ty, Some(0xabcd), pkt_num, true);

            let mut buf = [0u8; 16];
            let written = hd.encode_into(&mut buf).unwrap();
            assert_eq!(written, 1 + 8 + num_len);

            let (decoded, consumed) = PacketHeader::decode_short(&buf[..written]).unwrap();
            assert_eq!(consumed, written);
            assert_eq!(decoded, hd);
            assert!(decoded.key_phase);
        }
    }

    #[test]
    fn test_short_header_without_conn_id() {
        let hd = PacketHeader::short(PacketType::Short02, None, 0x0102, false);

        let mut buf = [0u8; 8];
        let written = hd.encode_into(&mut buf).unwrap();
        assert_eq!(written, 3);
        assert_eq!(&buf[..3], &[0x02, 0x01, 0x02]);

        let (decoded, _) = PacketHeader::decode_short(&buf[..written]).unwrap();
        assert_eq!(decoded.conn_id, None);
        assert_eq!(decoded.pkt_num, 0x0102);
    }

    #[test]
    fn test_short_header_truncated() {
        let hd = PacketHeader::short(PacketType::Short03, Some(7), 0x01020304, false);
        let mut buf = [0u8; 16];
        let written = hd.encode_into(&mut buf).unwrap();

        for len in 0..written {
            assert_eq!(
                PacketHeader::decode_short(&buf[..len]),
                Err(WireError::InvalidArgument),
                "len={len}"
            );
        }
    }

    #[test]
    fn test_short_header_unknown_type() {
        // Type bits 0x00 and 0x04..=0x1f are not assigned.
        for type_bits in [0x00u8, 0x04, 0x1f] {
            let buf = [type_bits, 0, 0, 0, 0];
            assert_eq!(
                PacketHeader::decode_short(&buf),
                Err(WireError::UnknownPacketType(type_bits)),
                "type_bits={type_bits:#x}"
            );
        }
    }

    #[test]
    fn test_decode_dispatch() {
        let long = PacketHeader::long(PacketType::ClientInitial, 1, 2, 3);
        let short = PacketHeader::short(PacketType::Short01, None, 4, false);

        let mut buf = [0u8; 32];
        let n = long.encode_into(&mut buf).unwrap();
        let (decoded, _) = PacketHeader::decode(&buf[..n]).unwrap();
        assert!(decoded.ty.is_long());

        let n = short.encode_into(&mut buf).unwrap();
        let (decoded, _) = PacketHeader::decode(&buf[..n]).unwrap();
        assert!(!decoded.ty.is_long());

        assert_eq!(PacketHeader::decode(&[]), Err(WireError::InvalidArgument));
    }

    #[test]
    fn test_encode_no_buffer() {
        let hd = PacketHeader::long(PacketType::ClientInitial, 1, 2, 3);
        let mut buf = [0xffu8; LONG_HEADER_SIZE - 1];
        let before = buf;
        assert!(matches!(
            hd.encode_into(&mut buf),
            Err(WireError::NoBuffer { required: 17, .. })
        ));
        // Nothing written on failure.
        assert_eq!(buf, before);

        let hd = PacketHeader::short(PacketType::Short03, Some(1), 2, false);
        let mut buf = [0u8; 12];
        assert!(matches!(
            hd.encode_into(&mut buf),
            Err(WireError::NoBuffer { required: 13, .. })
        ));
    }

    #[test]
    fn test_version_negotiation_decode() {
        let payload = hex::decode("0000000100000002ff000005").unwrap();
        let versions = decode_version_negotiation(&payload).unwrap();
        assert_eq!(versions, vec![1, 2, 0xff000005]);

        assert_eq!(decode_version_negotiation(&[]).unwrap(), Vec::<u32>::new());
        assert_eq!(
            decode_version_negotiation(&payload[..7]),
            Err(WireError::InvalidArgument)
        );
    }

    #[test]
    fn test_stateless_reset_decode() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&[0x11u8; STATELESS_RESET_TOKEN_SIZE]);
        payload.extend_from_slice(&[0x22, 0x33]);

        let sr = StatelessReset::decode(&payload).unwrap();
        assert_eq!(sr.token, [0x11u8; STATELESS_RESET_TOKEN_SIZE]);
        assert_eq!(sr.rand, vec![0x22, 0x33]);

        assert_eq!(
            StatelessReset::decode(&payload[..STATELESS_RESET_TOKEN_SIZE - 1]),
            Err(WireError::InvalidArgument)
        );
    }
}
