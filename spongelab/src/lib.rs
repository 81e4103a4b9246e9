// SpongeLab — the computational core behind the SHA-3 / SHA-2 education demos.
//
// Crate root: module declarations and public re-exports. All digest
// computation is delegated to the sha2 / sha3 / blake3 crates; this crate
// only measures and lays out what those digests do.

pub mod avalanche;
pub mod bits;
pub mod error;
pub mod hash;
pub mod lengthext;
pub mod speed;
pub mod sponge;

// Re-export key types at crate root for convenience.
pub use avalanche::AvalancheReport;
pub use bits::BitPosition;
pub use error::{Result, SpongeLabError};
pub use hash::{Algorithm, Construction, HashFn};
pub use sponge::PaddingPlan;
