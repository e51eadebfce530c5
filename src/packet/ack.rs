//! Structural validation of ACK frames.
//!
//! Runs after decode and packet-number reconstruction. The blocks are
//! walked downward from the largest acknowledged packet number; every
//! step must stay on or above packet number 0 and keep strictly
//! descending, otherwise the frame acknowledges packets that cannot
//! exist and the peer has violated the protocol.

use crate::core::{WireError, WireResult};

use super::frame::AckFrame;

/// Check an ACK frame's block structure.
///
/// Requirements:
/// - at least one block, and the first block's gap is 0 (its high end is
///   `largest_ack` itself);
/// - every block length is at least 1 and never reaches below packet
///   number 0;
/// - successive blocks are strictly decreasing and non-overlapping when
///   walked downward through the `(gap, length)` pairs.
///
/// Any violation fails [`WireError::AckFrame`]; the caller should treat
/// that as a protocol violation rather than a retryable condition.
pub fn validate_ack(fr: &AckFrame) -> WireResult<()> {
    let Some(first) = fr.blocks.first() else {
        return Err(WireError::AckFrame);
    };
    if first.gap != 0 {
        return Err(WireError::AckFrame);
    }

    // Low end of the block walked most recently.
    let mut low = fr.largest_ack;
    for (i, block) in fr.blocks.iter().enumerate() {
        let high = if i == 0 {
            fr.largest_ack
        } else {
            // The gap skips at least the one packet separating adjacent
            // blocks.
            match low.checked_sub(u64::from(block.gap) + 1) {
                Some(high) => high,
                None => return Err(WireError::AckFrame),
            }
        };
        if block.length == 0 || block.length - 1 > high {
            return Err(WireError::AckFrame);
        }
        low = high - (block.length - 1);
    }

    Ok(())
}
