//! Incremental packet assembly.
//!
//! A builder binds to a caller-owned output buffer and appends one
//! encoded header followed by any number of encoded frames, each checked
//! against the remaining capacity before a single byte is written. The
//! lifecycle is a strict three-state machine:
//!
//! ```text
//! Initialized --encode_header--> Accumulating --finish--> Finalized
//! ```
//!
//! A failed append leaves the cursor where it was and the builder still
//! accumulating, so the caller may retry with a smaller frame or finish
//! early. Any call after `finish`, a frame before the header, or a
//! second header fails [`WireError::InvalidState`]; nothing ever
//! silently reuses a finalized buffer.
//!
//! [`ProtectedPacketBuilder`] additionally borrows a
//! [`ProtectionContext`] and seals the frame region during `finish`,
//! authenticating the header bytes and consuming up to
//! [`overhead`](ProtectionContext::overhead) extra bytes of capacity.

use crate::core::{ProtectionContext, WireError, WireResult};

use super::frame::Frame;
use super::header::PacketHeader;

/// Builder lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuilderState {
    /// Bound to a buffer, header not yet written.
    Initialized,
    /// Header written, frames may follow.
    Accumulating,
    /// Terminal; the instance must not be reused.
    Finalized,
}

/// Assembles one unprotected packet into a caller-owned buffer.
#[derive(Debug)]
pub struct PacketBuilder<'a> {
    out: &'a mut [u8],
    pos: usize,
    state: BuilderState,
}

impl<'a> PacketBuilder<'a> {
    /// Bind a builder to `out`, which must not be empty.
    pub fn new(out: &'a mut [u8]) -> WireResult<Self> {
        if out.is_empty() {
            return Err(WireError::InvalidArgument);
        }
        Ok(Self {
            out,
            pos: 0,
            state: BuilderState::Initialized,
        })
    }

    /// Encode the packet header; must be the first operation.
    pub fn encode_header(&mut self, hd: &PacketHeader) -> WireResult<usize> {
        if self.state != BuilderState::Initialized {
            return Err(WireError::InvalidState);
        }
        let written = hd.encode_into(self.out)?;
        self.pos = written;
        self.state = BuilderState::Accumulating;
        Ok(written)
    }

    /// Append one encoded frame immediately after the previous write.
    pub fn encode_frame(&mut self, fr: &Frame) -> WireResult<usize> {
        if self.state != BuilderState::Accumulating {
            return Err(WireError::InvalidState);
        }
        let written = fr.encode_into(&mut self.out[self.pos..])?;
        self.pos += written;
        Ok(written)
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Finalize the packet, returning its total length.
    pub fn finish(&mut self) -> WireResult<usize> {
        if self.state == BuilderState::Finalized {
            return Err(WireError::InvalidState);
        }
        self.state = BuilderState::Finalized;
        Ok(self.pos)
    }
}

/// Assembles one protected packet: like [`PacketBuilder`], but `finish`
/// seals the accumulated frames through a borrowed protection context,
/// with the header bytes as additional authenticated data.
pub struct ProtectedPacketBuilder<'a, C: ProtectionContext> {
    out: &'a mut [u8],
    pos: usize,
    hd_end: usize,
    pkt_num: u64,
    ctx: &'a C,
    state: BuilderState,
}

impl<'a, C: ProtectionContext> ProtectedPacketBuilder<'a, C> {
    /// Bind a builder to `out` and a protection context; `out` must not
    /// be empty.
    pub fn new(out: &'a mut [u8], ctx: &'a C) -> WireResult<Self> {
        if out.is_empty() {
            return Err(WireError::InvalidArgument);
        }
        Ok(Self {
            out,
            pos: 0,
            hd_end: 0,
            pkt_num: 0,
            ctx,
            state: BuilderState::Initialized,
        })
    }

    /// Encode the packet header; must be the first operation.
    ///
    /// The header's packet number also feeds nonce construction when the
    /// packet is sealed.
    pub fn encode_header(&mut self, hd: &PacketHeader) -> WireResult<usize> {
        if self.state != BuilderState::Initialized {
            return Err(WireError::InvalidState);
        }
        let written = hd.encode_into(self.out)?;
        self.pos = written;
        self.hd_end = written;
        self.pkt_num = hd.pkt_num;
        self.state = BuilderState::Accumulating;
        Ok(written)
    }

    /// Append one encoded frame immediately after the previous write.
    pub fn encode_frame(&mut self, fr: &Frame) -> WireResult<usize> {
        if self.state != BuilderState::Accumulating {
            return Err(WireError::InvalidState);
        }
        let written = fr.encode_into(&mut self.out[self.pos..])?;
        self.pos += written;
        Ok(written)
    }

    /// Bytes accumulated so far (header plus unsealed frames).
    pub fn len(&self) -> usize {
        self.pos
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Seal the frame region and finalize the packet.
    ///
    /// The sealed payload grows by the context's overhead; if the buffer
    /// cannot hold it, fails [`WireError::NoBuffer`] with the buffer and
    /// cursor untouched. On success returns the full protected packet
    /// length including the overhead.
    pub fn finish(&mut self) -> WireResult<usize> {
        if self.state == BuilderState::Finalized {
            return Err(WireError::InvalidState);
        }

        let required = self.pos + self.ctx.overhead();
        if required > self.out.len() {
            return Err(WireError::NoBuffer {
                required,
                available: self.out.len(),
            });
        }

        let available = self.out.len();
        let (hd, payload) = self.out.split_at_mut(self.hd_end);
        let sealed = self
            .ctx
            .seal(self.pkt_num, hd, &payload[..self.pos - self.hd_end])?;
        if sealed.len() > payload.len() {
            // The context owes exactly overhead() extra bytes; refuse to
            // overrun if it returns more.
            return Err(WireError::NoBuffer {
                required: self.hd_end + sealed.len(),
                available,
            });
        }
        payload[..sealed.len()].copy_from_slice(&sealed);

        self.pos = self.hd_end + sealed.len();
        self.state = BuilderState::Finalized;
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CryptoError, LONG_HEADER_SIZE};
    use crate::packet::frame::StreamFrame;
    use crate::packet::header::PacketType;

    /// Test double: appends a fixed-size marker trailer instead of real
    /// cryptography.
    struct FakeProtection {
        overhead: usize,
    }

    impl ProtectionContext for FakeProtection {
        fn overhead(&self) -> usize {
            self.overhead
        }

        fn seal(
            &self,
            _pkt_num: u64,
            _aad: &[u8],
            plaintext: &[u8],
        ) -> Result<Vec<u8>, CryptoError> {
            let mut out = plaintext.to_vec();
            out.extend(std::iter::repeat_n(0xEE, self.overhead));
            Ok(out)
        }

        fn open(
            &self,
            _pkt_num: u64,
            _aad: &[u8],
            ciphertext: &[u8],
        ) -> Result<Vec<u8>, CryptoError> {
            if ciphertext.len() < self.overhead {
                return Err(CryptoError::DecryptionFailed);
            }
            Ok(ciphertext[..ciphertext.len() - self.overhead].to_vec())
        }
    }

    fn long_header() -> PacketHeader {
        PacketHeader::long(PacketType::ClientCleartext, 0xc0ffee, 42, 1)
    }

    #[test]
    fn test_unprotected_assembly() {
        let mut buf = [0u8; 64];
        let mut pe = PacketBuilder::new(&mut buf).unwrap();

        let hdlen = pe.encode_header(&long_header()).unwrap();
        assert_eq!(hdlen, LONG_HEADER_SIZE);

        let n1 = pe.encode_frame(&Frame::Ping).unwrap();
        let n2 = pe
            .encode_frame(&Frame::MaxData { max_data: 7 })
            .unwrap();
        let total = pe.finish().unwrap();
        assert_eq!(total, hdlen + n1 + n2);

        // Frames sit contiguously after the header.
        let (frame, consumed) = Frame::decode(&buf[hdlen..total]).unwrap();
        assert_eq!(frame, Frame::Ping);
        let (frame, _) = Frame::decode(&buf[hdlen + consumed..total]).unwrap();
        assert_eq!(frame, Frame::MaxData { max_data: 7 });
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let mut buf = [0u8; 0];
        assert!(matches!(
            PacketBuilder::new(&mut buf),
            Err(WireError::InvalidArgument)
        ));
        let ctx = FakeProtection { overhead: 16 };
        let mut buf = [0u8; 0];
        assert!(matches!(
            ProtectedPacketBuilder::new(&mut buf, &ctx),
            Err(WireError::InvalidArgument)
        ));
    }

    #[test]
    fn test_frame_before_header_rejected() {
        let mut buf = [0u8; 64];
        let mut pe = PacketBuilder::new(&mut buf).unwrap();
        assert_eq!(pe.encode_frame(&Frame::Ping), Err(WireError::InvalidState));
    }

    #[test]
    fn test_second_header_rejected() {
        let mut buf = [0u8; 64];
        let mut pe = PacketBuilder::new(&mut buf).unwrap();
        pe.encode_header(&long_header()).unwrap();
        assert_eq!(
            pe.encode_header(&long_header()),
            Err(WireError::InvalidState)
        );
    }

    #[test]
    fn test_use_after_finish_rejected() {
        let mut buf = [0u8; 64];
        let mut pe = PacketBuilder::new(&mut buf).unwrap();
        pe.encode_header(&long_header()).unwrap();
        pe.finish().unwrap();

        assert_eq!(pe.encode_frame(&Frame::Ping), Err(WireError::InvalidState));
        assert_eq!(
            pe.encode_header(&long_header()),
            Err(WireError::InvalidState)
        );
        assert_eq!(pe.finish(), Err(WireError::InvalidState));
    }

    #[test]
    fn test_full_frame_rejected_header_intact() {
        // 20-byte buffer: the 17-byte header fits, a stream frame needing
        // 24 more bytes does not; the cursor stays at the header end.
        let mut buf = [0u8; 20];
        let mut pe = PacketBuilder::new(&mut buf).unwrap();
        pe.encode_header(&long_header()).unwrap();

        let frame = Frame::Stream(StreamFrame {
            fin: false,
            stream_id: 1,
            offset: 0,
            data: vec![0xaa; 20],
        });
        assert!(matches!(
            pe.encode_frame(&frame),
            Err(WireError::NoBuffer { .. })
        ));
        assert_eq!(pe.len(), LONG_HEADER_SIZE);

        // A smaller frame still fits afterwards.
        pe.encode_frame(&Frame::Ping).unwrap();
        assert_eq!(pe.finish().unwrap(), LONG_HEADER_SIZE + 1);
    }

    #[test]
    fn test_protected_finish_seals_and_extends() {
        let ctx = FakeProtection { overhead: 16 };
        let mut buf = [0u8; 64];
        let mut pe = ProtectedPacketBuilder::new(&mut buf, &ctx).unwrap();

        let hdlen = pe.encode_header(&long_header()).unwrap();
        pe.encode_frame(&Frame::Ping).unwrap();
        let total = pe.finish().unwrap();
        assert_eq!(total, hdlen + 1 + 16);

        // Trailer landed right after the payload.
        assert_eq!(&buf[hdlen + 1..total], &[0xEE; 16]);
    }

    #[test]
    fn test_protected_finish_capacity() {
        // 10 bytes of header+frames against a 16-byte overhead: a 24-byte
        // buffer is two short, 26 bytes is exactly enough.
        let ctx = FakeProtection { overhead: 16 };
        let hd = PacketHeader::short(PacketType::Short01, None, 3, false);

        let mut buf = [0u8; 24];
        let mut pe = ProtectedPacketBuilder::new(&mut buf, &ctx).unwrap();
        let hdlen = pe.encode_header(&hd).unwrap();
        assert_eq!(hdlen, 2);
        pe.encode_frame(&Frame::Padding { len: 8 }).unwrap();
        assert_eq!(pe.len(), 10);
        assert_eq!(
            pe.finish(),
            Err(WireError::NoBuffer {
                required: 26,
                available: 24
            })
        );
        // Still accumulating: the failed finish changed nothing.
        assert_eq!(pe.len(), 10);

        let mut buf = [0u8; 26];
        let mut pe = ProtectedPacketBuilder::new(&mut buf, &ctx).unwrap();
        pe.encode_header(&hd).unwrap();
        pe.encode_frame(&Frame::Padding { len: 8 }).unwrap();
        assert_eq!(pe.finish().unwrap(), 26);
    }

    #[test]
    fn test_protected_roundtrip_through_open() {
        let ctx = FakeProtection { overhead: 16 };
        let mut buf = [0u8; 128];
        let mut pe = ProtectedPacketBuilder::new(&mut buf, &ctx).unwrap();

        let hd = PacketHeader::short(PacketType::Short02, Some(9), 1234, false);
        let hdlen = pe.encode_header(&hd).unwrap();
        pe.encode_frame(&Frame::StreamIdBlocked).unwrap();
        pe.encode_frame(&Frame::Blocked).unwrap();
        let total = pe.finish().unwrap();

        let opened = ctx.open(1234, &buf[..hdlen], &buf[hdlen..total]).unwrap();
        assert_eq!(opened, vec![0x0a, 0x08]);
    }
}
