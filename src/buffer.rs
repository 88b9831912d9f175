//! Immutable byte buffer with hex and big-endian integer views

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PrimitiveError, Result};

/// An immutable sequence of bytes.
///
/// The length is fixed at construction; every transformation returns a new buffer.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ByteBuffer(Vec<u8>);

impl ByteBuffer {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a hex string. An odd number of digits is rejected.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        hex::decode(hex_str)
            .map(Self)
            .map_err(|e| PrimitiveError::InvalidHex(e.to_string()))
    }

    /// Encode `value` as big-endian bytes.
    ///
    /// With `size` the output is left-padded with zeros to exactly that many
    /// bytes; a value that does not fit is an error. Without it, the minimal
    /// encoding is used (a single zero byte for zero).
    pub fn from_int(value: &BigUint, size: Option<usize>) -> Result<Self> {
        let bytes = if value.is_zero() {
            Vec::new()
        } else {
            value.to_bytes_be()
        };

        match size {
            None if bytes.is_empty() => Ok(Self(vec![0])),
            None => Ok(Self(bytes)),
            Some(size) if bytes.len() > size => Err(PrimitiveError::IntegerTooLarge { size }),
            Some(size) => {
                let mut padded = vec![0u8; size - bytes.len()];
                padded.extend_from_slice(&bytes);
                Ok(Self(padded))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex encoding
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Interpret the bytes as a big-endian unsigned integer
    pub fn to_int(&self) -> BigUint {
        BigUint::from_bytes_be(&self.0)
    }

    /// Copy of bytes `start..end`
    pub fn slice(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.0.len() {
            return Err(PrimitiveError::InvalidLength {
                expected: end,
                actual: self.0.len(),
            });
        }
        Ok(Self(self.0[start..end].to_vec()))
    }

    /// Byte-reversed copy (internal vs. display order for hashes)
    pub fn flip(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }

    pub fn concat(&self, other: &ByteBuffer) -> Self {
        let mut bytes = Vec::with_capacity(self.0.len() + other.0.len());
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&other.0);
        Self(bytes)
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteBuffer({})", self.to_hex())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuffer {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}
