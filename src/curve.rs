//! Elliptic-curve group operations and key types
//!
//! Signing code only sees the [`CurveMath`] trait; [`Secp256k1Curve`] provides
//! it on top of libsecp256k1 point arithmetic with scalars held as [`BigUint`].

use num_bigint::BigUint;
use num_traits::Zero;
use secp256k1::{All, Scalar, Secp256k1, SecretKey};
use std::fmt;

use crate::buffer::ByteBuffer;
use crate::constants::*;
use crate::error::{PrimitiveError, Result};

/// Prime-order group arithmetic consumed by the signature engine.
///
/// The point at infinity is represented as `None`.
pub trait CurveMath {
    type Point: Clone + PartialEq + fmt::Debug;

    /// Group order n
    fn order(&self) -> &BigUint;

    /// k·G
    fn mul_generator(&self, k: &BigUint) -> Option<Self::Point>;

    /// k·P
    fn mul_point(&self, point: &Self::Point, k: &BigUint) -> Option<Self::Point>;

    /// P + Q
    fn add_points(&self, a: &Self::Point, b: &Self::Point) -> Option<Self::Point>;

    /// Affine x-coordinate as an integer
    fn x_coordinate(&self, point: &Self::Point) -> BigUint;

    /// Bytes needed to encode a scalar below n
    fn scalar_len(&self) -> usize {
        ((self.order().bits() + 7) / 8) as usize
    }

    fn reduce(&self, a: &BigUint) -> BigUint {
        a % self.order()
    }

    fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % self.order()
    }

    fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % self.order()
    }

    /// a⁻¹ mod n by Fermat's little theorem; n is prime
    fn inverse_mod(&self, a: &BigUint) -> BigUint {
        let n = self.order();
        a.modpow(&(n - BigUint::from(2u32)), n)
    }

    /// True iff 1 ≤ a ≤ n − 1
    fn in_scalar_range(&self, a: &BigUint) -> bool {
        !a.is_zero() && a < self.order()
    }
}

/// secp256k1 via libsecp256k1
pub struct Secp256k1Curve {
    secp: Secp256k1<All>,
    order: BigUint,
}

impl Secp256k1Curve {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::new(),
            order: BigUint::from_bytes_be(&SECP256K1_ORDER),
        }
    }

    /// Reduce and encode a scalar as 32 bytes, None if it reduces to zero
    fn scalar_bytes(&self, k: &BigUint) -> Option<[u8; SCALAR_SIZE]> {
        let k = self.reduce(k);
        if k.is_zero() {
            return None;
        }
        let buffer = ByteBuffer::from_int(&k, Some(SCALAR_SIZE)).ok()?;
        buffer.as_bytes().try_into().ok()
    }
}

impl Default for Secp256k1Curve {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Secp256k1Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secp256k1Curve")
    }
}

impl CurveMath for Secp256k1Curve {
    type Point = secp256k1::PublicKey;

    fn order(&self) -> &BigUint {
        &self.order
    }

    fn mul_generator(&self, k: &BigUint) -> Option<Self::Point> {
        let bytes = self.scalar_bytes(k)?;
        let secret = SecretKey::from_slice(&bytes).ok()?;
        Some(secp256k1::PublicKey::from_secret_key(&self.secp, &secret))
    }

    fn mul_point(&self, point: &Self::Point, k: &BigUint) -> Option<Self::Point> {
        let bytes = self.scalar_bytes(k)?;
        let scalar = Scalar::from_be_bytes(bytes).ok()?;
        point.mul_tweak(&self.secp, &scalar).ok()
    }

    fn add_points(&self, a: &Self::Point, b: &Self::Point) -> Option<Self::Point> {
        a.combine(b).ok()
    }

    fn x_coordinate(&self, point: &Self::Point) -> BigUint {
        let serialized = point.serialize_uncompressed();
        BigUint::from_bytes_be(&serialized[1..1 + SCALAR_SIZE])
    }
}

/// Secret scalar in [1, n − 1]
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    secret: BigUint,
    len: usize,
}

impl PrivateKey {
    pub fn new<C: CurveMath>(curve: &C, secret: BigUint) -> Result<Self> {
        if !curve.in_scalar_range(&secret) {
            return Err(PrimitiveError::InvalidKey(
                "secret multiplier outside [1, n-1]".to_string(),
            ));
        }
        Ok(Self {
            secret,
            len: curve.scalar_len(),
        })
    }

    pub fn from_bytes<C: CurveMath>(curve: &C, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != curve.scalar_len() {
            return Err(PrimitiveError::InvalidLength {
                expected: curve.scalar_len(),
                actual: bytes.len(),
            });
        }
        Self::new(curve, BigUint::from_bytes_be(bytes))
    }

    pub fn secret_multiplier(&self) -> &BigUint {
        &self.secret
    }

    /// Fixed-width big-endian encoding of the secret
    pub fn to_bytes(&self) -> Result<ByteBuffer> {
        ByteBuffer::from_int(&self.secret, Some(self.len))
    }

    /// Q = x·G
    pub fn public_key<C: CurveMath>(&self, curve: &C) -> Result<PublicKey<C::Point>> {
        curve
            .mul_generator(&self.secret)
            .map(PublicKey::new)
            .ok_or_else(|| PrimitiveError::InvalidKey("public key is the point at infinity".to_string()))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}

/// A curve point used as a verification key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey<P> {
    point: P,
}

impl<P> PublicKey<P> {
    pub fn new(point: P) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &P {
        &self.point
    }
}

impl PublicKey<secp256k1::PublicKey> {
    /// Parse a compressed (33-byte) or uncompressed (65-byte) SEC1 encoding
    pub fn from_sec1(bytes: &[u8]) -> Result<Self> {
        secp256k1::PublicKey::from_slice(bytes)
            .map(Self::new)
            .map_err(|e| PrimitiveError::InvalidKey(e.to_string()))
    }

    pub fn to_sec1_compressed(&self) -> ByteBuffer {
        ByteBuffer::from(self.point.serialize())
    }
}
