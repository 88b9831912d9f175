//! Hash providers: named algorithms with HMAC, and plain digest functions

use bitcoin_hashes::hmac::{Hmac, HmacEngine};
use bitcoin_hashes::{ripemd160, sha1, sha256, sha512, Hash as _, HashEngine};
use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256 as Sha256Engine};
use std::fmt;
use std::str::FromStr;

use crate::buffer::ByteBuffer;
use crate::error::{PrimitiveError, Result};

/// Hash algorithm selectable by name, used for HMAC keyed hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
    Sha512,
    Ripemd160,
}

impl HashAlgorithm {
    /// Look up an algorithm by its conventional lowercase name
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "ripemd160" => Ok(HashAlgorithm::Ripemd160),
            _ => Err(PrimitiveError::UnsupportedHashAlgorithm(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Ripemd160 => "ripemd160",
        }
    }

    /// Digest size in bytes
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => sha1::Hash::LEN,
            HashAlgorithm::Sha256 => sha256::Hash::LEN,
            HashAlgorithm::Sha512 => sha512::Hash::LEN,
            HashAlgorithm::Ripemd160 => ripemd160::Hash::LEN,
        }
    }

    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => sha1::Hash::hash(data)[..].to_vec(),
            HashAlgorithm::Sha256 => sha256::Hash::hash(data)[..].to_vec(),
            HashAlgorithm::Sha512 => sha512::Hash::hash(data)[..].to_vec(),
            HashAlgorithm::Ripemd160 => ripemd160::Hash::hash(data)[..].to_vec(),
        }
    }

    /// HMAC(algorithm, data, key)
    pub fn hmac(self, data: &[u8], key: &[u8]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha1 => hmac_with::<sha1::Hash>(data, key),
            HashAlgorithm::Sha256 => hmac_with::<sha256::Hash>(data, key),
            HashAlgorithm::Sha512 => hmac_with::<sha512::Hash>(data, key),
            HashAlgorithm::Ripemd160 => hmac_with::<ripemd160::Hash>(data, key),
        }
    }
}

fn hmac_with<T: bitcoin_hashes::Hash>(data: &[u8], key: &[u8]) -> Vec<u8> {
    let mut engine = HmacEngine::<T>::new(key);
    engine.input(data);
    Hmac::<T>::from_engine(engine)[..].to_vec()
}

impl FromStr for HashAlgorithm {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self> {
        HashAlgorithm::from_name(s)
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = PrimitiveError;

    fn try_from(value: String) -> Result<Self> {
        HashAlgorithm::from_name(&value)
    }
}

impl From<HashAlgorithm> for String {
    fn from(algorithm: HashAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pure function from bytes to a fixed-width digest
pub trait HashFunction {
    /// Width of every digest in bytes. `hash` must return exactly this many;
    /// `MerkleRoot` rejects nodes of any other width.
    fn output_len(&self) -> usize;

    fn hash(&self, data: &[u8]) -> ByteBuffer;
}

impl<H: HashFunction + ?Sized> HashFunction for Box<H> {
    fn output_len(&self) -> usize {
        (**self).output_len()
    }

    fn hash(&self, data: &[u8]) -> ByteBuffer {
        (**self).hash(data)
    }
}

impl HashFunction for HashAlgorithm {
    fn output_len(&self) -> usize {
        HashAlgorithm::output_len(*self)
    }

    fn hash(&self, data: &[u8]) -> ByteBuffer {
        ByteBuffer::new(self.digest(data))
    }
}

/// SHA256(x)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256;

impl HashFunction for Sha256 {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, data: &[u8]) -> ByteBuffer {
        ByteBuffer::new(Sha256Engine::digest(data).to_vec())
    }
}

/// SHA256(SHA256(x)), the hash used for txids and Merkle trees
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256d;

impl HashFunction for Sha256d {
    fn output_len(&self) -> usize {
        32
    }

    fn hash(&self, data: &[u8]) -> ByteBuffer {
        let hash1 = Sha256Engine::digest(data);
        let hash2 = Sha256Engine::digest(hash1);
        ByteBuffer::new(hash2.to_vec())
    }
}

/// RIPEMD160(SHA256(x))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hash160;

impl HashFunction for Hash160 {
    fn output_len(&self) -> usize {
        20
    }

    fn hash(&self, data: &[u8]) -> ByteBuffer {
        let sha256_hash = Sha256Engine::digest(data);
        let ripemd160_hash = Ripemd160::digest(sha256_hash);
        ByteBuffer::new(ripemd160_hash.to_vec())
    }
}
