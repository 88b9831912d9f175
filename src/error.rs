//! Error types for the consensus primitives

use thiserror::Error;

/// Which half of a signature came out as zero while signing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceFailure {
    ZeroR,
    ZeroS,
}

impl std::fmt::Display for NonceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NonceFailure::ZeroR => write!(f, "r = 0"),
            NonceFailure::ZeroS => write!(f, "s = 0"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedHashAlgorithm(String),

    #[error("Degenerate nonce ({0}), retry with fresh nonce material")]
    DegenerateNonce(NonceFailure),

    #[error("Cannot compute Merkle root of an empty tree")]
    EmptyMerkleTree,

    #[error("Attempted to pop from stack when empty")]
    StackUnderflow,

    #[error("Invalid stack position: {0}")]
    InvalidStackPosition(i64),

    #[error("No value in stack position: {0}")]
    MissingStackValue(i64),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Integer does not fit in {size} bytes")]
    IntegerTooLarge { size: usize },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrimitiveError {
    /// True when the caller may retry signing with a different nonce
    pub fn is_retryable(&self) -> bool {
        matches!(self, PrimitiveError::DegenerateNonce(_))
    }
}

pub type Result<T> = std::result::Result<T, PrimitiveError>;
