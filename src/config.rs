//! Policy configuration for signing and Merkle hashing

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DRBG_ALGORITHM;
use crate::error::{PrimitiveError, Result};
use crate::hash::{Hash160, HashAlgorithm, HashFunction, Sha256, Sha256d};

/// Hash applied to Merkle leaves and node pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MerkleHash {
    Sha256,
    #[default]
    Sha256d,
    Hash160,
}

impl MerkleHash {
    pub fn hash_function(self) -> Box<dyn HashFunction> {
        match self {
            MerkleHash::Sha256 => Box::new(Sha256),
            MerkleHash::Sha256d => Box::new(Sha256d),
            MerkleHash::Hash160 => Box::new(Hash160),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitivesConfig {
    /// Normalize every produced signature to low-s form
    pub low_s: bool,
    /// Hash algorithm name for deterministic nonces
    pub drbg_algorithm: String,
    pub merkle_hash: MerkleHash,
}

impl Default for PrimitivesConfig {
    fn default() -> Self {
        Self {
            low_s: true,
            drbg_algorithm: DEFAULT_DRBG_ALGORITHM.to_string(),
            merkle_hash: MerkleHash::default(),
        }
    }
}

impl PrimitivesConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PrimitiveError::InvalidConfig(e.to_string()))?;
        config.drbg_algorithm()?;
        Ok(config)
    }

    pub fn drbg_algorithm(&self) -> Result<HashAlgorithm> {
        HashAlgorithm::from_name(&self.drbg_algorithm)
    }
}
