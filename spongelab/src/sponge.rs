//! `pad10*1` padding layout over a Keccak sponge rate.
//!
//! The planner computes where a message's bits land relative to rate-sized
//! blocks and how much `1 0…0 1` padding closes the final block. It never
//! builds the padded buffer; the demos only need the layout figures.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpongeLabError};

/// Width of the Keccak-f[1600] state in bits.
pub const STATE_BITS: usize = 1600;
/// Rounds of Keccak-f[1600] applied per absorb/squeeze step.
pub const KECCAK_ROUNDS: usize = 24;

/// Rate/capacity split of the 1600-bit sponge state for one SHA-3 variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpongeParams {
    /// Bits of state exchanged with input/output per absorb/squeeze step.
    pub rate_bits: usize,
    /// Bits of state never exposed; the security margin.
    pub capacity_bits: usize,
}

impl SpongeParams {
    /// Split the 1600-bit state for a given capacity.
    pub fn with_capacity(capacity_bits: usize) -> Self {
        Self {
            rate_bits: STATE_BITS - capacity_bits,
            capacity_bits,
        }
    }
}

/// How one rate-sized block is occupied by message vs padding bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockLayout {
    pub index: usize,
    pub message_bits: usize,
    pub padding_bits: usize,
}

/// `pad10*1` layout for a message length and rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddingPlan {
    pub message_bytes: usize,
    pub message_bits: usize,
    pub rate_bits: usize,
    pub padding_bits: usize,
    /// Bytes needed to hold the padding, rounded up. Display figure only.
    pub padding_bytes: usize,
    /// Zero bits between the leading and trailing 1 of `pad10*1`.
    pub zero_fill: usize,
    pub total_bits: usize,
    pub block_count: usize,
}

/// Compute the `pad10*1` layout for a `message_bytes`-long message absorbed
/// at `rate_bits` bits per block.
///
/// The padding is the smallest run of at least 2 bits that lands the total
/// on a block boundary; a message already aligned to the rate still gets one
/// full block of padding. Rates below 2 bits cannot hold the mandatory
/// leading and trailing 1 and are rejected with
/// [`SpongeLabError::InvalidRate`].
pub fn plan_padding(message_bytes: usize, rate_bits: usize) -> Result<PaddingPlan> {
    if rate_bits < 2 {
        return Err(SpongeLabError::InvalidRate { rate_bits });
    }

    let message_bits = message_bytes * 8;
    // Smallest zero run such that 1 + zeros + 1 closes a block. When the
    // free space in the last block is a single bit, the padding spills into
    // one extra block (zero run of rate_bits - 1).
    let zero_fill = (rate_bits - (message_bits + 2) % rate_bits) % rate_bits;
    let padding_bits = zero_fill + 2;
    let total_bits = message_bits + padding_bits;
    let block_count = total_bits / rate_bits;

    tracing::debug!(
        message_bits,
        rate_bits,
        padding_bits,
        block_count,
        "padding plan computed"
    );

    Ok(PaddingPlan {
        message_bytes,
        message_bits,
        rate_bits,
        padding_bits,
        padding_bytes: padding_bits.div_ceil(8),
        zero_fill,
        total_bits,
        block_count,
    })
}

impl PaddingPlan {
    /// Per-block occupancy, message bits first, padding filling the rest.
    pub fn blocks(&self) -> Vec<BlockLayout> {
        (0..self.block_count)
            .map(|index| {
                let start = index * self.rate_bits;
                let end = (start + self.rate_bits).min(self.total_bits);
                let message_bits = self
                    .message_bits
                    .saturating_sub(start)
                    .min(self.rate_bits);
                BlockLayout {
                    index,
                    message_bits,
                    padding_bits: (end - start) - message_bits,
                }
            })
            .collect()
    }

    /// Render the padding pattern as `1`, a zero run, `1`, capping the run
    /// at `max_zeros` characters. The cap only elides characters; it never
    /// changes [`PaddingPlan::zero_fill`].
    pub fn pattern_preview(&self, max_zeros: usize) -> String {
        let shown = self.zero_fill.min(max_zeros);
        let mut out = String::with_capacity(shown + 16);
        out.push('1');
        for _ in 0..shown {
            out.push('0');
        }
        if self.zero_fill > shown {
            out.push_str(&format!("...(+{})", self.zero_fill - shown));
        }
        out.push('1');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_pads_to_one_block() {
        // "Hola" is 4 UTF-8 bytes = 32 bits against the SHA3-224 rate.
        let plan = plan_padding(4, 1152).unwrap();
        assert_eq!(plan.message_bits, 32);
        assert_eq!(plan.padding_bits, 1120);
        assert_eq!(plan.padding_bytes, 140);
        assert_eq!(plan.zero_fill, 1118);
        assert_eq!(plan.total_bits, 1152);
        assert_eq!(plan.block_count, 1);
    }

    #[test]
    fn aligned_message_gets_full_extra_block() {
        // 144 bytes is exactly one 1152-bit block.
        let plan = plan_padding(144, 1152).unwrap();
        assert_eq!(plan.padding_bits, 1152);
        assert_eq!(plan.zero_fill, 1150);
        assert_eq!(plan.total_bits, 2304);
        assert_eq!(plan.block_count, 2);
    }

    #[test]
    fn empty_message_still_pads() {
        let plan = plan_padding(0, 1088).unwrap();
        assert_eq!(plan.message_bits, 0);
        assert_eq!(plan.padding_bits, 1088);
        assert_eq!(plan.zero_fill, 1086);
        assert_eq!(plan.block_count, 1);
    }

    #[test]
    fn tiny_rates_rejected() {
        for rate in [0, 1] {
            let err = plan_padding(4, rate).unwrap_err();
            assert!(matches!(err, SpongeLabError::InvalidRate { rate_bits } if rate_bits == rate));
        }
        // Rate 2 is the smallest legal rate: every block is pure padding
        // pairs for an empty message.
        let plan = plan_padding(0, 2).unwrap();
        assert_eq!(plan.padding_bits, 2);
        assert_eq!(plan.zero_fill, 0);
    }

    #[test]
    fn single_free_bit_spills_a_block() {
        // rate 9, message 8 bits: one free bit cannot hold both 1s, so the
        // padding runs into an extra block.
        let plan = plan_padding(1, 9).unwrap();
        assert_eq!(plan.padding_bits, 10);
        assert_eq!(plan.zero_fill, 8);
        assert_eq!(plan.total_bits, 18);
        assert_eq!(plan.block_count, 2);
    }

    #[test]
    fn padding_is_minimal_and_aligned() {
        for rate in [2, 3, 8, 9, 17, 576, 832, 1088, 1152] {
            for bytes in [0usize, 1, 2, 7, 8, 63, 144, 145, 1000] {
                let plan = plan_padding(bytes, rate).unwrap();
                assert_eq!(plan.total_bits % rate, 0, "rate {rate} bytes {bytes}");
                assert!(plan.padding_bits >= 2);
                assert!(plan.padding_bits <= rate + 1);
                assert_eq!(plan.zero_fill, plan.padding_bits - 2);
                assert_eq!(plan.block_count, plan.total_bits / rate);
                // Minimality: no shorter padding of at least 2 bits aligns.
                for shorter in 2..plan.padding_bits {
                    assert_ne!((plan.message_bits + shorter) % rate, 0);
                }
            }
        }
    }

    #[test]
    fn block_occupancy_sums_match() {
        for (bytes, rate) in [(4, 1152), (144, 1152), (0, 1088), (300, 1088), (1, 9)] {
            let plan = plan_padding(bytes, rate).unwrap();
            let blocks = plan.blocks();
            assert_eq!(blocks.len(), plan.block_count);
            let message: usize = blocks.iter().map(|b| b.message_bits).sum();
            let padding: usize = blocks.iter().map(|b| b.padding_bits).sum();
            assert_eq!(message, plan.message_bits);
            assert_eq!(padding, plan.padding_bits);
            for block in &blocks {
                assert_eq!(block.message_bits + block.padding_bits, rate);
            }
        }
    }

    #[test]
    fn pattern_preview_caps_without_changing_counts() {
        let plan = plan_padding(4, 1152).unwrap();
        let full = plan.pattern_preview(usize::MAX);
        assert_eq!(full.len(), plan.padding_bits);
        assert!(full.starts_with('1') && full.ends_with('1'));

        let capped = plan.pattern_preview(50);
        assert!(capped.starts_with("1000"));
        assert!(capped.contains("...(+1068)"));
        assert!(capped.ends_with('1'));
        assert_eq!(plan.zero_fill, 1118);

        let tiny = plan_padding(0, 2).unwrap();
        assert_eq!(tiny.pattern_preview(50), "11");
    }

    #[test]
    fn sponge_params_split_the_state() {
        let params = SpongeParams::with_capacity(512);
        assert_eq!(params.rate_bits, 1088);
        assert_eq!(params.rate_bits + params.capacity_bits, STATE_BITS);
        assert_eq!(KECCAK_ROUNDS, 24);
    }
}
