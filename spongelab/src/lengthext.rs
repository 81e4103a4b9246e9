//! Length-extension exposure.
//!
//! A Merkle–Damgård digest is the chaining state after the last block, so
//! anyone holding `H(secret ‖ public)` can keep absorbing and produce
//! `H(secret ‖ public ‖ glue ‖ extra)` without the secret. A sponge keeps
//! its capacity hidden and admits no such continuation. Like the original
//! demo, this module shows which construction admits the forgery; it does
//! not forge a digest.

use serde::{Deserialize, Serialize};

use crate::bits::to_hex;
use crate::error::{Result, SpongeLabError};
use crate::hash::{Algorithm, Construction};

/// One algorithm's view of the extension scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionReport {
    pub algorithm: String,
    pub construction: Construction,
    /// Hex digest of `secret ‖ public`.
    pub original_hex: String,
    /// Hex digest of `secret ‖ public ‖ extra`.
    pub extended_hex: String,
    /// Whether the construction lets an attacker derive the extended digest
    /// from the original digest alone.
    pub vulnerable: bool,
}

/// Side-by-side pairing of a vulnerable and a resistant algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionComparison {
    pub vulnerable: ExtensionReport,
    pub resistant: ExtensionReport,
}

/// Hash `secret ‖ public` and `secret ‖ public ‖ extra` under `alg` and
/// report its length-extension exposure.
pub fn exposure(alg: Algorithm, secret: &[u8], public: &[u8], extra: &[u8]) -> ExtensionReport {
    let mut original = Vec::with_capacity(secret.len() + public.len() + extra.len());
    original.extend_from_slice(secret);
    original.extend_from_slice(public);
    let mut extended = original.clone();
    extended.extend_from_slice(extra);

    ExtensionReport {
        algorithm: alg.name().to_string(),
        construction: alg.construction(),
        original_hex: to_hex(&alg.digest(&original)),
        extended_hex: to_hex(&alg.digest(&extended)),
        vulnerable: alg.construction() == Construction::MerkleDamgard,
    }
}

/// The side-by-side demo: `md` must be a vulnerable construction and
/// `sponge` a resistant one, or the pairing is rejected.
pub fn compare(
    md: Algorithm,
    sponge: Algorithm,
    secret: &[u8],
    public: &[u8],
    extra: &[u8],
) -> Result<ExtensionComparison> {
    let vulnerable = exposure(md, secret, public, extra);
    let resistant = exposure(sponge, secret, public, extra);
    if !vulnerable.vulnerable || resistant.vulnerable {
        return Err(SpongeLabError::InvalidInput(format!(
            "comparison needs a vulnerable algorithm first and a resistant one second, got {} and {}",
            md.name(),
            sponge.name()
        )));
    }
    Ok(ExtensionComparison {
        vulnerable,
        resistant,
    })
}
