//! Frame encoding and decoding.
//!
//! Every frame begins with a type byte. Most types are exact values
//! (`0x00..=0x0d`); STREAM and ACK occupy ranges whose low bits carry
//! structural flags:
//!
//! ```text
//! STREAM  11FSSOOD  F = fin, SS = stream-id width - 1,
//!                   OO = offset width {0,2,4,8}, D = explicit length
//! ACK     101NLLMM  N = additional-block count present,
//!                   LL = largest-acknowledged width, MM = block width
//! ```
//!
//! Decoders consume exactly the bytes their variant's layout requires
//! and return that count; they fail [`WireError::FrameFormat`] before
//! reading past the payload. Encoders are the structural inverse and
//! fail [`WireError::NoBuffer`] without writing when the destination is
//! too small; for STREAM and ACK they pick the smallest width that
//! represents each value.

use crate::core::{
    ACK_DELAY_SIZE, ACK_LL_MASK, ACK_MAX_BLOCKS, ACK_MM_MASK, ACK_N_BIT,
    FRAME_TYPE_ACK, FRAME_TYPE_APPLICATION_CLOSE, FRAME_TYPE_BLOCKED,
    FRAME_TYPE_CONNECTION_CLOSE, FRAME_TYPE_GOAWAY, FRAME_TYPE_MAX_DATA,
    FRAME_TYPE_MAX_STREAM_DATA, FRAME_TYPE_MAX_STREAM_ID,
    FRAME_TYPE_NEW_CONNECTION_ID, FRAME_TYPE_PADDING, FRAME_TYPE_PING,
    FRAME_TYPE_RST_STREAM, FRAME_TYPE_STOP_SENDING, FRAME_TYPE_STREAM,
    FRAME_TYPE_STREAM_BLOCKED, FRAME_TYPE_STREAM_ID_BLOCKED, STATELESS_RESET_TOKEN_SIZE,
    STREAM_D_BIT, STREAM_FIN_BIT, STREAM_OO_MASK, STREAM_SS_MASK, WireError, WireResult,
};

use super::bytes::{get_u16, get_u32, get_u64, get_uint, put_uint, selector_len, width_selector};

/// One acknowledged block: a gap below the previous block and the number
/// of acknowledged packets in this block.
///
/// `gap` counts the unacknowledged packets between this block's high end
/// and the previous block's low end (0 for the first block). `length`
/// counts acknowledged packets inclusive of the block's high end, so it
/// is at least 1 in a well-formed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AckBlock {
    /// Unacknowledged packets skipped below the previous block.
    pub gap: u8,
    /// Acknowledged packets in this block.
    pub length: u64,
}

/// An ACK frame: the largest acknowledged packet number plus an ordered
/// run of [`AckBlock`]s walked downward from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckFrame {
    /// Largest acknowledged packet number. Wire-truncated after decode
    /// until [`adjust_ack_pkt_num`](crate::packet::adjust_ack_pkt_num)
    /// reconstructs it.
    pub largest_ack: u64,
    /// Wire width of `largest_ack` in bytes as decoded (1, 2, 4, or 8).
    /// Caller-built frames default to 8 (already full width).
    pub largest_ack_len: usize,
    /// Ack delay as transmitted.
    pub ack_delay: u16,
    /// Acknowledged blocks, highest first. The first block's gap is 0.
    pub blocks: Vec<AckBlock>,
}

impl AckFrame {
    /// Create an ACK frame with no blocks yet.
    pub fn new(largest_ack: u64, ack_delay: u16) -> Self {
        Self {
            largest_ack,
            largest_ack_len: 8,
            ack_delay,
            blocks: Vec::new(),
        }
    }

    /// The exact type byte the encoder serializes for this frame.
    pub fn wire_type(&self) -> u8 {
        let (ll, mm) = self.widths();
        let n = if self.blocks.len() > 1 { ACK_N_BIT } else { 0 };
        FRAME_TYPE_ACK | n | (ll << 2) | mm
    }

    /// Absolute `(low, high)` inclusive packet-number ranges implied by
    /// the blocks, highest range first.
    ///
    /// Meaningful once the frame has been through packet-number
    /// reconstruction. The walk stops early at a malformed block; run
    /// [`validate_ack`](crate::packet::validate_ack) first to reject
    /// those outright.
    pub fn acked_ranges(&self) -> Vec<(u64, u64)> {
        let mut out = Vec::with_capacity(self.blocks.len());
        let mut low = 0u64;
        for (i, b) in self.blocks.iter().enumerate() {
            let high = if i == 0 {
                self.largest_ack
            } else {
                match low.checked_sub(u64::from(b.gap) + 1) {
                    Some(h) => h,
                    None => break,
                }
            };
            if b.length == 0 || b.length - 1 > high {
                break;
            }
            low = high - (b.length - 1);
            out.push((low, high));
        }
        out
    }

    /// Decode one ACK frame from the start of `payload`.
    pub fn decode(payload: &[u8]) -> WireResult<(Self, usize)> {
        if payload.is_empty() || payload[0] & 0xe0 != FRAME_TYPE_ACK {
            return Err(WireError::FrameFormat);
        }
        let b0 = payload[0];
        let has_count = b0 & ACK_N_BIT != 0;
        let la_len = selector_len((b0 & ACK_LL_MASK) >> 2);
        let abl_len = selector_len(b0 & ACK_MM_MASK);

        let mut need = 1 + la_len + ACK_DELAY_SIZE + usize::from(has_count) + abl_len;
        if payload.len() < need {
            return Err(WireError::FrameFormat);
        }

        let mut pos = 1;
        let largest_ack = get_uint(&payload[pos..], la_len);
        pos += la_len;
        let ack_delay = get_u16(&payload[pos..]);
        pos += ACK_DELAY_SIZE;

        let extra = if has_count {
            let n = usize::from(payload[pos]);
            pos += 1;
            n
        } else {
            0
        };
        need += extra * (1 + abl_len);
        if payload.len() < need {
            return Err(WireError::FrameFormat);
        }

        let mut blocks = Vec::with_capacity(1 + extra);
        blocks.push(AckBlock {
            gap: 0,
            length: get_uint(&payload[pos..], abl_len),
        });
        pos += abl_len;
        for _ in 0..extra {
            let gap = payload[pos];
            pos += 1;
            let length = get_uint(&payload[pos..], abl_len);
            pos += abl_len;
            blocks.push(AckBlock { gap, length });
        }

        Ok((
            Self {
                largest_ack,
                largest_ack_len: la_len,
                ack_delay,
                blocks,
            },
            pos,
        ))
    }

    /// Encode this frame into `out`, returning bytes written.
    ///
    /// Fails [`WireError::InvalidArgument`] if the frame cannot be
    /// represented on the wire: no blocks, more than
    /// [`ACK_MAX_BLOCKS`], or a nonzero first gap.
    pub fn encode_into(&self, out: &mut [u8]) -> WireResult<usize> {
        if self.blocks.is_empty() || self.blocks.len() > ACK_MAX_BLOCKS {
            return Err(WireError::InvalidArgument);
        }
        if self.blocks[0].gap != 0 {
            return Err(WireError::InvalidArgument);
        }

        let (ll, mm) = self.widths();
        let la_len = selector_len(ll);
        let abl_len = selector_len(mm);
        let extra = self.blocks.len() - 1;
        let len = 1
            + la_len
            + ACK_DELAY_SIZE
            + usize::from(extra > 0)
            + abl_len
            + extra * (1 + abl_len);
        if out.len() < len {
            return Err(WireError::NoBuffer {
                required: len,
                available: out.len(),
            });
        }

        out[0] = self.wire_type();
        let mut pos = 1;
        put_uint(&mut out[pos..], self.largest_ack, la_len);
        pos += la_len;
        put_uint(&mut out[pos..], u64::from(self.ack_delay), ACK_DELAY_SIZE);
        pos += ACK_DELAY_SIZE;
        if extra > 0 {
            out[pos] = extra as u8;
            pos += 1;
        }
        put_uint(&mut out[pos..], self.blocks[0].length, abl_len);
        pos += abl_len;
        for b in &self.blocks[1..] {
            out[pos] = b.gap;
            pos += 1;
            put_uint(&mut out[pos..], b.length, abl_len);
            pos += abl_len;
        }

        Ok(pos)
    }

    fn widths(&self) -> (u8, u8) {
        let ll = width_selector(self.largest_ack);
        let mm = self
            .blocks
            .iter()
            .map(|b| width_selector(b.length))
            .max()
            .unwrap_or(0);
        (ll, mm)
    }
}

/// A STREAM frame carrying application data at an offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    /// Final frame of the stream.
    pub fin: bool,
    /// Stream identifier.
    pub stream_id: u32,
    /// Byte offset of `data` within the stream.
    pub offset: u64,
    /// Application data.
    pub data: Vec<u8>,
}

impl StreamFrame {
    /// The exact type byte the encoder serializes for this frame.
    ///
    /// The encoder always emits an explicit data length; a frame decoded
    /// from the length-omitting form re-encodes to the same values with
    /// the D bit set.
    pub fn wire_type(&self) -> u8 {
        let mut ty = FRAME_TYPE_STREAM | STREAM_D_BIT;
        if self.fin {
            ty |= STREAM_FIN_BIT;
        }
        ty |= ((self.id_width() - 1) as u8) << 3;
        ty |= self.offset_selector() << 1;
        ty
    }

    /// Decode one STREAM frame from the start of `payload`.
    ///
    /// Without the D bit the frame consumes the remainder of the payload
    /// as data.
    pub fn decode(payload: &[u8]) -> WireResult<(Self, usize)> {
        if payload.is_empty() || payload[0] & FRAME_TYPE_STREAM != FRAME_TYPE_STREAM {
            return Err(WireError::FrameFormat);
        }
        let b0 = payload[0];
        let fin = b0 & STREAM_FIN_BIT != 0;
        let id_len = usize::from((b0 & STREAM_SS_MASK) >> 3) + 1;
        let offset_len = match (b0 & STREAM_OO_MASK) >> 1 {
            0 => 0,
            1 => 2,
            2 => 4,
            _ => 8,
        };
        let has_len = b0 & STREAM_D_BIT != 0;

        let fixed = 1 + id_len + offset_len + if has_len { 2 } else { 0 };
        if payload.len() < fixed {
            return Err(WireError::FrameFormat);
        }

        let mut pos = 1;
        let stream_id = get_uint(&payload[pos..], id_len) as u32;
        pos += id_len;
        let offset = if offset_len == 0 {
            0
        } else {
            get_uint(&payload[pos..], offset_len)
        };
        pos += offset_len;

        let data = if has_len {
            let datalen = usize::from(get_u16(&payload[pos..]));
            pos += 2;
            if payload.len() - pos < datalen {
                return Err(WireError::FrameFormat);
            }
            let data = payload[pos..pos + datalen].to_vec();
            pos += datalen;
            data
        } else {
            let data = payload[pos..].to_vec();
            pos = payload.len();
            data
        };

        Ok((
            Self {
                fin,
                stream_id,
                offset,
                data,
            },
            pos,
        ))
    }

    /// Encode this frame into `out`, returning bytes written.
    ///
    /// Fails [`WireError::InvalidArgument`] when the data does not fit
    /// the 2-byte explicit length field.
    pub fn encode_into(&self, out: &mut [u8]) -> WireResult<usize> {
        if self.data.len() > usize::from(u16::MAX) {
            return Err(WireError::InvalidArgument);
        }

        let id_len = self.id_width();
        let offset_len = selector_offset_len(self.offset_selector());
        let len = 1 + id_len + offset_len + 2 + self.data.len();
        if out.len() < len {
            return Err(WireError::NoBuffer {
                required: len,
                available: out.len(),
            });
        }

        out[0] = self.wire_type();
        let mut pos = 1;
        put_uint(&mut out[pos..], u64::from(self.stream_id), id_len);
        pos += id_len;
        if offset_len > 0 {
            put_uint(&mut out[pos..], self.offset, offset_len);
            pos += offset_len;
        }
        put_uint(&mut out[pos..], self.data.len() as u64, 2);
        pos += 2;
        out[pos..pos + self.data.len()].copy_from_slice(&self.data);
        pos += self.data.len();

        Ok(pos)
    }

    /// Smallest stream-id encoding, 1 to 4 bytes.
    fn id_width(&self) -> usize {
        if self.stream_id > 0xff_ffff {
            4
        } else if self.stream_id > 0xffff {
            3
        } else if self.stream_id > 0xff {
            2
        } else {
            1
        }
    }

    /// Smallest offset encoding as the OO selector (0 encodes offset 0).
    fn offset_selector(&self) -> u8 {
        if self.offset == 0 {
            0
        } else if self.offset <= u64::from(u16::MAX) {
            1
        } else if self.offset <= u64::from(u32::MAX) {
            2
        } else {
            3
        }
    }
}

/// Byte width of the OO offset selector.
fn selector_offset_len(selector: u8) -> usize {
    match selector {
        0 => 0,
        1 => 2,
        2 => 4,
        _ => 8,
    }
}

/// A decoded frame.
///
/// One value is exactly one frame; each variant holds only the fields
/// its wire layout defines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A run of consecutive PADDING bytes.
    Padding {
        /// Length of the run.
        len: usize,
    },
    /// Abrupt stream termination.
    RstStream {
        /// Stream being reset.
        stream_id: u32,
        /// Transport error code.
        error_code: u32,
        /// Final byte offset of the stream.
        final_offset: u64,
    },
    /// Transport-level connection termination.
    ConnectionClose {
        /// Transport error code.
        error_code: u32,
        /// Human-readable reason phrase.
        reason: Vec<u8>,
    },
    /// Application-level connection termination.
    ApplicationClose {
        /// Application error code.
        error_code: u16,
        /// Human-readable reason phrase.
        reason: Vec<u8>,
    },
    /// Graceful shutdown announcement.
    Goaway {
        /// Largest client-initiated stream id the sender will process.
        largest_client_stream_id: u32,
        /// Largest server-initiated stream id the sender will process.
        largest_server_stream_id: u32,
    },
    /// Connection-level flow control update.
    MaxData {
        /// New connection data limit.
        max_data: u64,
    },
    /// Stream-level flow control update.
    MaxStreamData {
        /// Stream the limit applies to.
        stream_id: u32,
        /// New stream data limit.
        max_stream_data: u64,
    },
    /// Raise the peer's stream id ceiling.
    MaxStreamId {
        /// Highest stream id the peer may open.
        max_stream_id: u32,
    },
    /// Liveness probe.
    Ping,
    /// Sender is blocked on connection flow control.
    Blocked,
    /// Sender is blocked on stream flow control.
    StreamBlocked {
        /// The blocked stream.
        stream_id: u32,
    },
    /// Sender is blocked on the stream id ceiling.
    StreamIdBlocked,
    /// Announce an alternate connection id.
    NewConnectionId {
        /// Sequence number of this id.
        seq: u16,
        /// The alternate connection id.
        conn_id: u64,
        /// Stateless reset token tied to the id.
        token: [u8; STATELESS_RESET_TOKEN_SIZE],
    },
    /// Ask the peer to stop sending on a stream.
    StopSending {
        /// The stream to silence.
        stream_id: u32,
        /// Application error code.
        error_code: u16,
    },
    /// Acknowledgment.
    Ack(AckFrame),
    /// Stream data.
    Stream(StreamFrame),
}

impl Frame {
    /// Decode one frame from the start of `payload`, returning the frame
    /// and the exact number of bytes consumed.
    pub fn decode(payload: &[u8]) -> WireResult<(Self, usize)> {
        if payload.is_empty() {
            return Err(WireError::FrameFormat);
        }
        let ty = payload[0];
        if ty & FRAME_TYPE_STREAM == FRAME_TYPE_STREAM {
            return StreamFrame::decode(payload).map(|(f, n)| (Self::Stream(f), n));
        }
        if ty & FRAME_TYPE_ACK == FRAME_TYPE_ACK {
            return AckFrame::decode(payload).map(|(f, n)| (Self::Ack(f), n));
        }
        match ty {
            FRAME_TYPE_PADDING => Ok(decode_padding(payload)),
            FRAME_TYPE_RST_STREAM => decode_rst_stream(payload),
            FRAME_TYPE_CONNECTION_CLOSE => decode_connection_close(payload),
            FRAME_TYPE_GOAWAY => decode_goaway(payload),
            FRAME_TYPE_MAX_DATA => decode_max_data(payload),
            FRAME_TYPE_MAX_STREAM_DATA => decode_max_stream_data(payload),
            FRAME_TYPE_MAX_STREAM_ID => decode_max_stream_id(payload),
            FRAME_TYPE_PING => Ok((Self::Ping, 1)),
            FRAME_TYPE_BLOCKED => Ok((Self::Blocked, 1)),
            FRAME_TYPE_STREAM_BLOCKED => decode_stream_blocked(payload),
            FRAME_TYPE_STREAM_ID_BLOCKED => Ok((Self::StreamIdBlocked, 1)),
            FRAME_TYPE_NEW_CONNECTION_ID => decode_new_connection_id(payload),
            FRAME_TYPE_STOP_SENDING => decode_stop_sending(payload),
            FRAME_TYPE_APPLICATION_CLOSE => decode_application_close(payload),
            _ => Err(WireError::FrameFormat),
        }
    }

    /// Encode this frame into `out`, returning bytes written.
    ///
    /// The writer is total: on [`WireError::NoBuffer`] nothing has been
    /// written.
    pub fn encode_into(&self, out: &mut [u8]) -> WireResult<usize> {
        match self {
            Self::Padding { len } => {
                if out.len() < *len {
                    return Err(WireError::NoBuffer {
                        required: *len,
                        available: out.len(),
                    });
                }
                out[..*len].fill(FRAME_TYPE_PADDING);
                Ok(*len)
            }
            Self::RstStream {
                stream_id,
                error_code,
                final_offset,
            } => {
                let out = fixed_frame(out, FRAME_TYPE_RST_STREAM, 17)?;
                put_uint(&mut out[1..], u64::from(*stream_id), 4);
                put_uint(&mut out[5..], u64::from(*error_code), 4);
                put_uint(&mut out[9..], *final_offset, 8);
                Ok(17)
            }
            Self::ConnectionClose { error_code, reason } => {
                let len = 7 + check_reason_len(reason)?;
                let out = fixed_frame(out, FRAME_TYPE_CONNECTION_CLOSE, len)?;
                put_uint(&mut out[1..], u64::from(*error_code), 4);
                put_uint(&mut out[5..], reason.len() as u64, 2);
                out[7..len].copy_from_slice(reason);
                Ok(len)
            }
            Self::ApplicationClose { error_code, reason } => {
                let len = 5 + check_reason_len(reason)?;
                let out = fixed_frame(out, FRAME_TYPE_APPLICATION_CLOSE, len)?;
                put_uint(&mut out[1..], u64::from(*error_code), 2);
                put_uint(&mut out[3..], reason.len() as u64, 2);
                out[5..len].copy_from_slice(reason);
                Ok(len)
            }
            Self::Goaway {
                largest_client_stream_id,
                largest_server_stream_id,
            } => {
                let out = fixed_frame(out, FRAME_TYPE_GOAWAY, 9)?;
                put_uint(&mut out[1..], u64::from(*largest_client_stream_id), 4);
                put_uint(&mut out[5..], u64::from(*largest_server_stream_id), 4);
                Ok(9)
            }
            Self::MaxData { max_data } => {
                let out = fixed_frame(out, FRAME_TYPE_MAX_DATA, 9)?;
                put_uint(&mut out[1..], *max_data, 8);
                Ok(9)
            }
            Self::MaxStreamData {
                stream_id,
                max_stream_data,
            } => {
                let out = fixed_frame(out, FRAME_TYPE_MAX_STREAM_DATA, 13)?;
                put_uint(&mut out[1..], u64::from(*stream_id), 4);
                put_uint(&mut out[5..], *max_stream_data, 8);
                Ok(13)
            }
            Self::MaxStreamId { max_stream_id } => {
                let out = fixed_frame(out, FRAME_TYPE_MAX_STREAM_ID, 5)?;
                put_uint(&mut out[1..], u64::from(*max_stream_id), 4);
                Ok(5)
            }
            Self::Ping => {
                let _ = fixed_frame(out, FRAME_TYPE_PING, 1)?;
                Ok(1)
            }
            Self::Blocked => {
                let _ = fixed_frame(out, FRAME_TYPE_BLOCKED, 1)?;
                Ok(1)
            }
            Self::StreamBlocked { stream_id } => {
                let out = fixed_frame(out, FRAME_TYPE_STREAM_BLOCKED, 5)?;
                put_uint(&mut out[1..], u64::from(*stream_id), 4);
                Ok(5)
            }
            Self::StreamIdBlocked => {
                let _ = fixed_frame(out, FRAME_TYPE_STREAM_ID_BLOCKED, 1)?;
                Ok(1)
            }
            Self::NewConnectionId {
                seq,
                conn_id,
                token,
            } => {
                let out = fixed_frame(out, FRAME_TYPE_NEW_CONNECTION_ID, 27)?;
                put_uint(&mut out[1..], u64::from(*seq), 2);
                put_uint(&mut out[3..], *conn_id, 8);
                out[11..27].copy_from_slice(token);
                Ok(27)
            }
            Self::StopSending {
                stream_id,
                error_code,
            } => {
                let out = fixed_frame(out, FRAME_TYPE_STOP_SENDING, 7)?;
                put_uint(&mut out[1..], u64::from(*stream_id), 4);
                put_uint(&mut out[5..], u64::from(*error_code), 2);
                Ok(7)
            }
            Self::Ack(fr) => fr.encode_into(out),
            Self::Stream(fr) => fr.encode_into(out),
        }
    }
}

/// Check capacity for a fixed-layout frame of `len` bytes and write the
/// type byte; returns the writable prefix.
fn fixed_frame(out: &mut [u8], ty: u8, len: usize) -> WireResult<&mut [u8]> {
    if out.len() < len {
        return Err(WireError::NoBuffer {
            required: len,
            available: out.len(),
        });
    }
    out[0] = ty;
    Ok(&mut out[..len])
}

/// Reason phrases are capped by their 2-byte length field.
fn check_reason_len(reason: &[u8]) -> WireResult<usize> {
    if reason.len() > usize::from(u16::MAX) {
        return Err(WireError::InvalidArgument);
    }
    Ok(reason.len())
}

/// Consume the run of consecutive PADDING bytes at the start of the
/// payload. Never fails; the run ends at the first nonzero byte or the
/// end of the payload.
fn decode_padding(payload: &[u8]) -> (Frame, usize) {
    let len = payload
        .iter()
        .take_while(|&&b| b == FRAME_TYPE_PADDING)
        .count();
    (Frame::Padding { len }, len)
}

fn decode_rst_stream(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 17 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::RstStream {
            stream_id: get_u32(&payload[1..]),
            error_code: get_u32(&payload[5..]),
            final_offset: get_u64(&payload[9..]),
        },
        17,
    ))
}

fn decode_connection_close(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 7 {
        return Err(WireError::FrameFormat);
    }
    let reason_len = usize::from(get_u16(&payload[5..]));
    if payload.len() < 7 + reason_len {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::ConnectionClose {
            error_code: get_u32(&payload[1..]),
            reason: payload[7..7 + reason_len].to_vec(),
        },
        7 + reason_len,
    ))
}

fn decode_application_close(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 5 {
        return Err(WireError::FrameFormat);
    }
    let reason_len = usize::from(get_u16(&payload[3..]));
    if payload.len() < 5 + reason_len {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::ApplicationClose {
            error_code: get_u16(&payload[1..]),
            reason: payload[5..5 + reason_len].to_vec(),
        },
        5 + reason_len,
    ))
}

fn decode_goaway(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 9 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::Goaway {
            largest_client_stream_id: get_u32(&payload[1..]),
            largest_server_stream_id: get_u32(&payload[5..]),
        },
        9,
    ))
}

fn decode_max_data(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 9 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::MaxData {
            max_data: get_u64(&payload[1..]),
        },
        9,
    ))
}

fn decode_max_stream_data(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 13 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::MaxStreamData {
            stream_id: get_u32(&payload[1..]),
            max_stream_data: get_u64(&payload[5..]),
        },
        13,
    ))
}

fn decode_max_stream_id(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 5 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::MaxStreamId {
            max_stream_id: get_u32(&payload[1..]),
        },
        5,
    ))
}

fn decode_stream_blocked(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 5 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::StreamBlocked {
            stream_id: get_u32(&payload[1..]),
        },
        5,
    ))
}

fn decode_new_connection_id(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 27 {
        return Err(WireError::FrameFormat);
    }
    let mut token = [0u8; STATELESS_RESET_TOKEN_SIZE];
    token.copy_from_slice(&payload[11..27]);
    Ok((
        Frame::NewConnectionId {
            seq: get_u16(&payload[1..]),
            conn_id: get_u64(&payload[3..]),
            token,
        },
        27,
    ))
}

fn decode_stop_sending(payload: &[u8]) -> WireResult<(Frame, usize)> {
    if payload.len() < 7 {
        return Err(WireError::FrameFormat);
    }
    Ok((
        Frame::StopSending {
            stream_id: get_u32(&payload[1..]),
            error_code: get_u16(&payload[5..]),
        },
        7,
    ))
}
