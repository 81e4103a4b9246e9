//! Single-bit-flip avalanche measurement.
//!
//! Flip one input bit, hash the original and the modified buffer with an
//! injected capability, and count how many digest bits changed. A hash with
//! a strong avalanche effect flips roughly half of them.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::bits::{self, BitPosition};
use crate::error::{Result, SpongeLabError};
use crate::hash::HashFn;

/// One digest bit together with whether the other digest agrees at that
/// position. The presentation layer colors the grid from `matches_other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitMatch {
    pub bit: bool,
    pub matches_other: bool,
}

/// Result of one avalanche analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvalancheReport {
    /// The input bit that was toggled.
    pub flipped: BitPosition,
    pub digest_original: Vec<u8>,
    pub digest_modified: Vec<u8>,
    pub original_hex: String,
    pub modified_hex: String,
    pub bits_changed: usize,
    pub total_digest_bits: usize,
    /// Full-precision percentage of digest bits that changed.
    pub ratio: f64,
    /// `ratio` rounded to two decimal places for display.
    pub percentage: f64,
    /// Original digest bits, each flagged against the modified digest.
    pub comparison_original: Vec<BitMatch>,
    /// Modified digest bits, each flagged against the original digest.
    pub comparison_modified: Vec<BitMatch>,
}

/// Analyze with a bit position drawn from the thread-local RNG.
pub fn analyze<H: HashFn>(input: &[u8], hash: &H) -> Result<AvalancheReport> {
    analyze_with_rng(input, hash, &mut rand::thread_rng())
}

/// Analyze with a bit position drawn uniformly from the provided RNG.
pub fn analyze_with_rng<H, R>(input: &[u8], hash: &H, rng: &mut R) -> Result<AvalancheReport>
where
    H: HashFn,
    R: Rng + ?Sized,
{
    if input.is_empty() {
        return Err(SpongeLabError::InvalidInput(
            "cannot flip a bit in an empty buffer".into(),
        ));
    }
    let offset = rng.gen_range(0..input.len() * 8);
    analyze_at(input, hash, BitPosition::from_offset(offset))
}

/// Analyze with the flipped bit forced to `position`.
///
/// This is the deterministic entry point: a fixed input, position, and
/// capability always produce the same report.
pub fn analyze_at<H: HashFn>(
    input: &[u8],
    hash: &H,
    position: BitPosition,
) -> Result<AvalancheReport> {
    if input.is_empty() {
        return Err(SpongeLabError::InvalidInput(
            "cannot flip a bit in an empty buffer".into(),
        ));
    }
    let modified = bits::flip_bit(input, position)?;

    let digest_original = hash
        .hash(input)
        .map_err(|source| SpongeLabError::HashComputation { source })?;
    let digest_modified = hash
        .hash(&modified)
        .map_err(|source| SpongeLabError::HashComputation { source })?;

    if digest_original.len() != digest_modified.len() {
        return Err(SpongeLabError::DigestLengthMismatch {
            original: digest_original.len(),
            modified: digest_modified.len(),
        });
    }
    if digest_original.is_empty() {
        return Err(SpongeLabError::InvalidInput(
            "hash capability returned an empty digest".into(),
        ));
    }

    let bits_changed = bits::hamming_distance(&digest_original, &digest_modified)?;
    let total_digest_bits = digest_original.len() * 8;
    let ratio = bits_changed as f64 / total_digest_bits as f64 * 100.0;
    let percentage = (ratio * 100.0).round() / 100.0;

    let original_bits = bits::expand_bits(&digest_original);
    let modified_bits = bits::expand_bits(&digest_modified);
    let comparison_original = original_bits
        .iter()
        .zip(&modified_bits)
        .map(|(&bit, &other)| BitMatch {
            bit,
            matches_other: bit == other,
        })
        .collect();
    let comparison_modified = modified_bits
        .iter()
        .zip(&original_bits)
        .map(|(&bit, &other)| BitMatch {
            bit,
            matches_other: bit == other,
        })
        .collect();

    tracing::debug!(
        byte_index = position.byte_index,
        bit_index = position.bit_index,
        bits_changed,
        total_digest_bits,
        "avalanche analysis complete"
    );

    Ok(AvalancheReport {
        flipped: position,
        original_hex: bits::to_hex(&digest_original),
        modified_hex: bits::to_hex(&digest_modified),
        digest_original,
        digest_modified,
        bits_changed,
        total_digest_bits,
        ratio,
        percentage,
        comparison_original,
        comparison_modified,
    })
}
