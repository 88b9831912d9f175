//! # Consensus-Primitives
//!
//! Cryptographic and tree/stack primitives underneath a Bitcoin-style ledger.
//!
//! This crate provides the pieces whose behaviour must be reproduced bit for bit
//! to stay compatible with the network: deterministic nonce generation, ECDSA
//! signing and verification, the block Merkle root, and the operand stack the
//! script interpreter runs on.
//!
//! ## Components
//!
//! - [`buffer::ByteBuffer`] - immutable bytes with hex and integer views
//! - [`drbg::HmacDrbg`] - HMAC deterministic random bit generator
//! - [`signature::Signer`] - ECDSA over any [`curve::CurveMath`] provider
//! - [`merkle::MerkleRoot`] - Merkle root with odd-count duplication
//! - [`stack::ScriptStack`] - LIFO stack with top-relative addressing
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: identical inputs give byte-identical outputs
//! 2. **Total verification**: `verify` returns a boolean and never fails
//! 3. **Typed failures**: degenerate nonces, empty trees and stack bounds are distinct errors
//! 4. **Exact Version Pinning**: all consensus-critical dependencies pinned to exact versions
//!
//! ## Usage
//!
//! ```rust
//! use consensus_primitives::ConsensusPrimitives;
//! use consensus_primitives::{ByteBuffer, PrivateKey};
//! use num_bigint::BigUint;
//!
//! let primitives = ConsensusPrimitives::new();
//! let key = PrivateKey::new(primitives.signer().curve(), BigUint::from(1234u32)).unwrap();
//! let public_key = key.public_key(primitives.signer().curve()).unwrap();
//! let digest = ByteBuffer::from([0x5au8; 32]);
//!
//! let signature = primitives.sign(&key, &digest).unwrap();
//! assert!(primitives.verify(&public_key, &digest, &signature));
//! ```

pub mod buffer;
pub mod config;
pub mod constants;
pub mod curve;
pub mod drbg;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod nonce;
pub mod signature;
pub mod stack;
pub mod types;

// Re-export commonly used types
pub use buffer::ByteBuffer;
pub use config::{MerkleHash, PrimitivesConfig};
pub use constants::*;
pub use curve::{CurveMath, PrivateKey, PublicKey, Secp256k1Curve};
pub use drbg::HmacDrbg;
pub use error::{NonceFailure, PrimitiveError, Result};
pub use hash::{Hash160, HashAlgorithm, HashFunction, Sha256, Sha256d};
pub use merkle::{Encodable, MerkleRoot};
pub use nonce::{DeterministicNonce, NonceSource, RandomNonce};
pub use signature::{Signature, Signer};
pub use stack::ScriptStack;
pub use types::*;

/// Entry point bundling the secp256k1 signer with a policy configuration
///
/// # Examples
///
/// ```
/// use consensus_primitives::{ConsensusPrimitives, PrimitivesConfig};
///
/// let config = PrimitivesConfig::from_json(r#"{"drbg_algorithm": "sha512"}"#).unwrap();
/// let primitives = ConsensusPrimitives::with_config(config).unwrap();
/// assert!(primitives.signer().low_s());
/// ```
#[derive(Debug)]
pub struct ConsensusPrimitives {
    config: PrimitivesConfig,
    drbg_algorithm: HashAlgorithm,
    signer: Signer<Secp256k1Curve>,
}

impl ConsensusPrimitives {
    /// Create an instance with the default policy: low-s signatures,
    /// SHA-256 nonces and double-SHA-256 Merkle trees
    pub fn new() -> Self {
        let config = PrimitivesConfig::default();
        Self {
            drbg_algorithm: HashAlgorithm::Sha256,
            signer: Signer::new(Secp256k1Curve::new(), config.low_s),
            config,
        }
    }

    pub fn with_config(config: PrimitivesConfig) -> Result<Self> {
        Ok(Self {
            drbg_algorithm: config.drbg_algorithm()?,
            signer: Signer::new(Secp256k1Curve::new(), config.low_s),
            config,
        })
    }

    pub fn config(&self) -> &PrimitivesConfig {
        &self.config
    }

    pub fn signer(&self) -> &Signer<Secp256k1Curve> {
        &self.signer
    }

    /// Sign a digest with an RFC6979 deterministic nonce
    pub fn sign(&self, private_key: &PrivateKey, digest: &ByteBuffer) -> Result<Signature> {
        self.signer
            .sign_deterministic(private_key, digest, self.drbg_algorithm)
    }

    /// Sign a digest with a caller-supplied nonce source
    pub fn sign_with(
        &self,
        private_key: &PrivateKey,
        digest: &ByteBuffer,
        nonce: &mut dyn NonceSource,
    ) -> Result<Signature> {
        self.signer.sign(private_key, digest, nonce)
    }

    pub fn verify(
        &self,
        public_key: &PublicKey<secp256k1::PublicKey>,
        digest: &ByteBuffer,
        signature: &Signature,
    ) -> bool {
        self.signer.verify(public_key, digest, signature)
    }

    /// Merkle root of `transactions` with the configured hash
    ///
    /// # Examples
    ///
    /// ```
    /// use consensus_primitives::{ConsensusPrimitives, PrimitiveError};
    ///
    /// let primitives = ConsensusPrimitives::new();
    /// let root = primitives.merkle_root(&[vec![1u8], vec![2u8]]).unwrap();
    /// assert_eq!(root.len(), 32);
    ///
    /// let empty: Vec<Vec<u8>> = vec![];
    /// assert_eq!(primitives.merkle_root(&empty), Err(PrimitiveError::EmptyMerkleTree));
    /// ```
    pub fn merkle_root<T: Encodable>(&self, transactions: &[T]) -> Result<ByteBuffer> {
        MerkleRoot::new(self.config.merkle_hash.hash_function()).calculate(transactions)
    }

    /// Fresh HMAC-DRBG over the configured algorithm
    pub fn drbg(&self, entropy: &ByteBuffer, personalization: Option<&ByteBuffer>) -> HmacDrbg {
        HmacDrbg::with_algorithm(self.drbg_algorithm, entropy, personalization)
    }
}

impl Default for ConsensusPrimitives {
    fn default() -> Self {
        Self::new()
    }
}
