// Named hash algorithms the demos compare, and the pluggable capability
// the analyzer consumes. All actual digest computation is delegated to the
// sha2 / sha3 / blake3 crates.

// Both sha2 and sha3 re-export the same `digest` traits.
// Import once from sha2 to avoid redundant imports.
use sha2::{Digest, Sha256};
use sha3::{Keccak256, Sha3_224, Sha3_256, Sha3_384, Sha3_512};

use serde::{Deserialize, Serialize};

use crate::sponge::SpongeParams;

/// Errors raised by an injected hash capability.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// How a hash function chains its internal state, which decides its
/// length-extension exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Construction {
    /// SHA-2 family: the digest *is* the final chaining state.
    MerkleDamgard,
    /// Keccak family: the capacity half of the state is never exposed.
    Sponge,
    /// BLAKE3: chunked hash tree with a distinct root finalization.
    MerkleTree,
}

/// A named, fixed-output hash algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Sha256,
    Sha3_224,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Keccak256,
    Blake3,
}

impl Algorithm {
    /// Every supported algorithm, in display order.
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Sha256,
        Algorithm::Sha3_224,
        Algorithm::Sha3_256,
        Algorithm::Sha3_384,
        Algorithm::Sha3_512,
        Algorithm::Keccak256,
        Algorithm::Blake3,
    ];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha3_224 => "sha3-224",
            Algorithm::Sha3_256 => "sha3-256",
            Algorithm::Sha3_384 => "sha3-384",
            Algorithm::Sha3_512 => "sha3-512",
            Algorithm::Keccak256 => "keccak256",
            Algorithm::Blake3 => "blake3",
        }
    }

    /// Resolve from a name. Case-insensitive; `_` and `-` are interchangeable
    /// and a `sha-256` spelling is accepted for the SHA-2 entry.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "sha256" | "sha-256" => Some(Algorithm::Sha256),
            "sha3-224" => Some(Algorithm::Sha3_224),
            "sha3-256" => Some(Algorithm::Sha3_256),
            "sha3-384" => Some(Algorithm::Sha3_384),
            "sha3-512" => Some(Algorithm::Sha3_512),
            "keccak256" | "keccak-256" => Some(Algorithm::Keccak256),
            "blake3" => Some(Algorithm::Blake3),
            _ => None,
        }
    }

    /// Digest length in bytes. Fixed per algorithm.
    pub fn output_bytes(self) -> usize {
        match self {
            Algorithm::Sha3_224 => 28,
            Algorithm::Sha256 | Algorithm::Sha3_256 | Algorithm::Keccak256 | Algorithm::Blake3 => {
                32
            }
            Algorithm::Sha3_384 => 48,
            Algorithm::Sha3_512 => 64,
        }
    }

    /// Digest length in bits.
    pub fn output_bits(self) -> usize {
        self.output_bytes() * 8
    }

    pub fn construction(self) -> Construction {
        match self {
            Algorithm::Sha256 => Construction::MerkleDamgard,
            Algorithm::Sha3_224
            | Algorithm::Sha3_256
            | Algorithm::Sha3_384
            | Algorithm::Sha3_512
            | Algorithm::Keccak256 => Construction::Sponge,
            Algorithm::Blake3 => Construction::MerkleTree,
        }
    }

    /// Rate/capacity split of the 1600-bit Keccak state, for the sponge
    /// algorithms. `None` for SHA-2 and BLAKE3, which have no sponge rate.
    pub fn sponge(self) -> Option<SpongeParams> {
        match self {
            Algorithm::Sha3_224 => Some(SpongeParams::with_capacity(448)),
            Algorithm::Sha3_256 | Algorithm::Keccak256 => Some(SpongeParams::with_capacity(512)),
            Algorithm::Sha3_384 => Some(SpongeParams::with_capacity(768)),
            Algorithm::Sha3_512 => Some(SpongeParams::with_capacity(1024)),
            Algorithm::Sha256 | Algorithm::Blake3 => None,
        }
    }

    /// One-shot digest of `data`.
    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            Algorithm::Sha256 => Sha256::digest(data).to_vec(),
            Algorithm::Sha3_224 => Sha3_224::digest(data).to_vec(),
            Algorithm::Sha3_256 => Sha3_256::digest(data).to_vec(),
            Algorithm::Sha3_384 => Sha3_384::digest(data).to_vec(),
            Algorithm::Sha3_512 => Sha3_512::digest(data).to_vec(),
            Algorithm::Keccak256 => Keccak256::digest(data).to_vec(),
            Algorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        }
    }
}

/// A pluggable hash capability: anything that turns bytes into a digest.
///
/// [`Algorithm`] implements this infallibly. Tests inject failing or
/// non-conforming capabilities through [`FnHash`].
pub trait HashFn {
    fn hash(&self, data: &[u8]) -> std::result::Result<Vec<u8>, BoxError>;
}

impl HashFn for Algorithm {
    fn hash(&self, data: &[u8]) -> std::result::Result<Vec<u8>, BoxError> {
        Ok(self.digest(data))
    }
}

/// Adapter turning a closure into a [`HashFn`] capability.
pub struct FnHash<F>(pub F);

impl<F> HashFn for FnHash<F>
where
    F: Fn(&[u8]) -> std::result::Result<Vec<u8>, BoxError>,
{
    fn hash(&self, data: &[u8]) -> std::result::Result<Vec<u8>, BoxError> {
        (self.0)(data)
    }
}
