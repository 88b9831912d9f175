//! ECDSA signing and verification over an abstract prime-order group

use num_bigint::BigUint;
use num_traits::Zero;
use tracing::warn;

use crate::buffer::ByteBuffer;
use crate::constants::SCALAR_SIZE;
use crate::curve::{CurveMath, PrivateKey, PublicKey};
use crate::error::{NonceFailure, PrimitiveError, Result};
use crate::hash::HashAlgorithm;
use crate::nonce::{DeterministicNonce, NonceSource};

/// ECDSA signature (r, s), both reduced modulo the group order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    pub fn r(&self) -> &BigUint {
        &self.r
    }

    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// 64-byte r ‖ s encoding
    pub fn to_compact(&self) -> Result<ByteBuffer> {
        let r = ByteBuffer::from_int(&self.r, Some(SCALAR_SIZE))?;
        let s = ByteBuffer::from_int(&self.s, Some(SCALAR_SIZE))?;
        Ok(r.concat(&s))
    }

    pub fn from_compact(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 2 * SCALAR_SIZE {
            return Err(PrimitiveError::InvalidLength {
                expected: 2 * SCALAR_SIZE,
                actual: bytes.len(),
            });
        }
        let (r, s) = bytes.split_at(SCALAR_SIZE);
        Ok(Self::new(BigUint::from_bytes_be(r), BigUint::from_bytes_be(s)))
    }

    /// s ≤ (n − 1)/2
    pub fn is_low_s(&self, order: &BigUint) -> bool {
        self.s <= half_order(order)
    }
}

/// ⌊n/2⌋, which is (n − 1)/2 for odd n
fn half_order(order: &BigUint) -> BigUint {
    order >> 1u32
}

/// Signs and verifies digests with a curve provider.
///
/// With `low_s` set (the default policy) every emitted signature has s in
/// the lower half of [1, n − 1].
#[derive(Debug)]
pub struct Signer<C: CurveMath> {
    curve: C,
    low_s: bool,
}

impl<C: CurveMath> Signer<C> {
    pub fn new(curve: C, low_s: bool) -> Self {
        Self { curve, low_s }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    pub fn low_s(&self) -> bool {
        self.low_s
    }

    /// Sign: 𝒦 × ℍ × 𝒩 → (r, s)
    ///
    /// 1. k = getK() mod n
    /// 2. r = (k·G).x mod n, r ≠ 0
    /// 3. s = k⁻¹ · (h + x·r) mod n, s ≠ 0
    /// 4. If low-s: s > (n − 1)/2 ⇒ s = n − s
    pub fn sign<N: NonceSource + ?Sized>(
        &self,
        private_key: &PrivateKey,
        digest: &ByteBuffer,
        nonce: &mut N,
    ) -> Result<Signature> {
        let n = self.curve.order();
        let k = self.curve.reduce(&nonce.get_k());

        let r = self
            .curve
            .mul_generator(&k)
            .map(|point| self.curve.reduce(&self.curve.x_coordinate(&point)))
            .unwrap_or_default();
        if r.is_zero() {
            warn!("Rejected degenerate nonce: r = 0");
            return Err(PrimitiveError::DegenerateNonce(NonceFailure::ZeroR));
        }

        let h = digest.to_int();
        let xr = self.curve.mul_mod(private_key.secret_multiplier(), &r);
        let mut s = self.curve.mul_mod(
            &self.curve.inverse_mod(&k),
            &self.curve.add_mod(&h, &xr),
        );
        if s.is_zero() {
            warn!("Rejected degenerate nonce: s = 0");
            return Err(PrimitiveError::DegenerateNonce(NonceFailure::ZeroS));
        }

        if self.low_s && s > half_order(n) {
            s = n - &s;
        }

        Ok(Signature::new(r, s))
    }

    /// Sign with an RFC6979 nonce derived from the key and digest
    pub fn sign_deterministic(
        &self,
        private_key: &PrivateKey,
        digest: &ByteBuffer,
        algorithm: HashAlgorithm,
    ) -> Result<Signature> {
        let mut nonce = DeterministicNonce::new(&self.curve, algorithm, private_key, digest)?;
        self.sign(private_key, digest, &mut nonce)
    }

    /// Verify: 𝒫 × ℍ × (r, s) → {true, false}
    ///
    /// 1. r, s ∈ [1, n − 1]
    /// 2. c = s⁻¹, u1 = h·c, u2 = r·c (mod n)
    /// 3. valid iff (u1·G + u2·Q).x mod n = r
    pub fn verify(
        &self,
        public_key: &PublicKey<C::Point>,
        digest: &ByteBuffer,
        signature: &Signature,
    ) -> bool {
        if !self.curve.in_scalar_range(signature.r()) || !self.curve.in_scalar_range(signature.s()) {
            return false;
        }

        let c = self.curve.inverse_mod(signature.s());
        let u1 = self.curve.mul_mod(&digest.to_int(), &c);
        let u2 = self.curve.mul_mod(signature.r(), &c);

        let point = match (
            self.curve.mul_generator(&u1),
            self.curve.mul_point(public_key.point(), &u2),
        ) {
            (Some(a), Some(b)) => self.curve.add_points(&a, &b),
            (Some(a), None) => Some(a),
            (None, b) => b,
        };

        match point {
            Some(point) => self.curve.reduce(&self.curve.x_coordinate(&point)) == *signature.r(),
            None => false,
        }
    }
}
