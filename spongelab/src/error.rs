use thiserror::Error;

/// All errors produced by the spongelab analysis primitives.
#[derive(Debug, Error)]
pub enum SpongeLabError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid rate: {rate_bits} bits cannot hold the minimum 2-bit pad10*1 padding")]
    InvalidRate { rate_bits: usize },

    #[error("digest length mismatch: original {original} bytes, modified {modified} bytes")]
    DigestLengthMismatch { original: usize, modified: usize },

    #[error("hash capability failed")]
    HashComputation {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, SpongeLabError>;
