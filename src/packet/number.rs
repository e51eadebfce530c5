//! Truncated packet-number reconstruction.
//!
//! Packet numbers are 64-bit monotone counters, but only their low 8, 16,
//! or 32 bits travel on the wire. The receiver reconstructs the full
//! value from the highest packet number it has successfully
//! authenticated: the true value is almost certainly close to
//! `max_pkt_num + 1`, so of all values congruent to the truncated bits,
//! the closest one to that expectation is chosen.

use super::frame::AckFrame;

/// Expand a truncated packet number to its full 64-bit value.
///
/// `pkt_num` carries the low `n_bits` bits of the true packet number;
/// `max_pkt_num` is the highest successfully authenticated packet number
/// so far. Of all 64-bit values congruent to `pkt_num` modulo
/// `2^n_bits`, the one closest to `max_pkt_num + 1` is returned; a
/// candidate exactly half the window away on either side resolves to
/// the *larger* value (the result always lies in the half-open window
/// `(expected - 2^(n_bits-1), expected + 2^(n_bits-1)]`).
///
/// Total for every input. Arithmetic is modulo 2^64, so the result is
/// consistent across counter wraparound; `n_bits >= 64` returns
/// `pkt_num` unchanged.
pub fn adjust_pkt_num(max_pkt_num: u64, pkt_num: u64, n_bits: u32) -> u64 {
    if n_bits >= 64 {
        return pkt_num;
    }

    let expected = max_pkt_num.wrapping_add(1);
    let win = 1u64 << n_bits;
    let hwin = win >> 1;
    let mask = win - 1;

    let cand = (expected & !mask) | (pkt_num & mask);
    // Signed distance from the expectation; |cand - expected| < 2^n_bits,
    // so the cast is exact even when the subtraction wraps.
    let delta = cand.wrapping_sub(expected) as i64;
    if delta > hwin as i64 {
        cand.wrapping_sub(win)
    } else if delta <= -(hwin as i64) {
        cand.wrapping_add(win)
    } else {
        cand
    }
}

/// Reconstruct the largest-acknowledged field of an ACK frame in place.
///
/// The block gaps and lengths are deltas below `largest_ack` and need no
/// adjustment of their own; the absolute packet numbers they imply are
/// available through [`AckFrame::acked_ranges`] afterwards.
pub fn adjust_ack_pkt_num(ack: &mut AckFrame, max_pkt_num: u64) {
    let n_bits = (ack.largest_ack_len * 8) as u32;
    ack.largest_ack = adjust_pkt_num(max_pkt_num, ack.largest_ack, n_bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::frame::AckBlock;

    /// Reference reconstruction: scan the congruent candidates around the
    /// expectation and pick the closest, ties upward. Valid while the
    /// true arithmetic stays far from the u64 boundaries.
    fn reference(max_pkt_num: u64, pkt_num: u64, n_bits: u32) -> u64 {
        let expected = i128::from(max_pkt_num) + 1;
        let win = 1i128 << n_bits;
        let trunc = i128::from(pkt_num) & (win - 1);
        let base = (expected / win) * win + trunc;

        let mut best = None::<i128>;
        for cand in [base - win, base, base + win] {
            let dist = (cand - expected).abs();
            best = Some(match best {
                None => cand,
                Some(b) => {
                    let bdist = (b - expected).abs();
                    if dist < bdist || (dist == bdist && cand > b) {
                        cand
                    } else {
                        b
                    }
                }
            });
        }
        // The window around a small expectation can reach below zero; the
        // wrapping implementation maps those candidates onto the top of
        // the u64 range.
        best.unwrap().rem_euclid(1i128 << 64) as u64
    }

    #[test]
    fn test_congruence_all_widths() {
        for n_bits in [8u32, 16, 32] {
            let mask = (1u64 << n_bits) - 1;
            for max in [0u64, 1, 0xfe, 0xff, 0x100, 0xffff, 0x10000, 1 << 35] {
                for trunc in [0u64, 1, 0x7f, 0x80, 0xff, mask / 2, mask] {
                    let full = adjust_pkt_num(max, trunc, n_bits);
                    assert_eq!(full & mask, trunc & mask, "max={max} trunc={trunc} n={n_bits}");
                }
            }
        }
    }

    #[test]
    fn test_exhaustive_8bit_window() {
        for max in 0..2048u64 {
            for trunc in 0..256u64 {
                assert_eq!(
                    adjust_pkt_num(max, trunc, 8),
                    reference(max, trunc, 8),
                    "max={max} trunc={trunc}"
                );
            }
        }
    }

    #[test]
    fn test_sampled_16bit_window() {
        for max in (0..200_000u64).step_by(977) {
            for trunc in (0..65536u64).step_by(251) {
                assert_eq!(
                    adjust_pkt_num(max, trunc, 16),
                    reference(max, trunc, 16),
                    "max={max} trunc={trunc}"
                );
            }
        }
    }

    #[test]
    fn test_32bit_spot_checks() {
        // Next in sequence.
        assert_eq!(adjust_pkt_num(0xdead_beee, 0xdead_beef, 32), 0xdead_beef);
        // Carry into the high half.
        assert_eq!(
            adjust_pkt_num(0x1_ffff_ffff, 0x0000_0001, 32),
            0x2_0000_0001
        );
        // Reordered packet from just below.
        assert_eq!(
            adjust_pkt_num(0x2_0000_0003, 0xffff_fff0, 32),
            0x1_ffff_fff0
        );
    }

    #[test]
    fn test_half_window_tie_resolves_upward() {
        // expected = 0x1_0080; candidates for trunc 0x00 are 0x1_0000 and
        // 0x1_0100, both exactly 0x80 away. The larger one wins.
        assert_eq!(adjust_pkt_num(0x1_007f, 0x00, 8), 0x1_0100);
        // One below the tie point: the lower candidate is closer.
        assert_eq!(adjust_pkt_num(0x1_007e, 0x00, 8), 0x1_0000);
        // One above: the upper candidate is closer.
        assert_eq!(adjust_pkt_num(0x1_0080, 0x00, 8), 0x1_0100);
    }

    #[test]
    fn test_wraparound_near_max() {
        // max at the very top: expected wraps to 0, reconstruction keeps
        // following the counter modulo 2^64.
        assert_eq!(adjust_pkt_num(u64::MAX, 0x00, 8), 0);
        assert_eq!(adjust_pkt_num(u64::MAX - 1, 0xff, 8), u64::MAX);
        // A late packet from before the wrap.
        assert_eq!(adjust_pkt_num(u64::MAX, 0xfe, 8), u64::MAX - 1);
        // And right after the wrap, old high values still resolve back.
        assert_eq!(adjust_pkt_num(0, 0xff, 8), u64::MAX);
        assert_eq!(adjust_pkt_num(2, 0x05, 8), 5);
    }

    #[test]
    fn test_width_64_is_identity() {
        assert_eq!(adjust_pkt_num(123, 456, 64), 456);
        assert_eq!(adjust_pkt_num(u64::MAX, u64::MAX, 64), u64::MAX);
    }

    #[test]
    fn test_adjust_ack_pkt_num() {
        let mut ack = AckFrame::new(0xbeef, 0);
        ack.largest_ack_len = 2;
        ack.blocks.push(AckBlock { gap: 0, length: 16 });

        adjust_ack_pkt_num(&mut ack, 0xdead_beee);
        assert_eq!(ack.largest_ack, 0xdead_beef);
        // Blocks stay in delta form; the implied ranges move with the
        // reconstructed largest.
        assert_eq!(ack.acked_ranges(), vec![(0xdead_bee0, 0xdead_beef)]);
    }

    #[test]
    fn test_adjust_ack_full_width_unchanged() {
        let mut ack = AckFrame::new(42, 0);
        ack.blocks.push(AckBlock { gap: 0, length: 1 });
        adjust_ack_pkt_num(&mut ack, 1 << 60);
        assert_eq!(ack.largest_ack, 42);
    }
}
