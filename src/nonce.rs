//! Sources of the per-signature secret nonce k

use num_bigint::BigUint;
use rand::RngCore;

use crate::buffer::ByteBuffer;
use crate::curve::{CurveMath, PrivateKey};
use crate::drbg::HmacDrbg;
use crate::error::Result;
use crate::hash::HashAlgorithm;

/// Anything that can hand the signer a candidate nonce
pub trait NonceSource {
    fn get_k(&mut self) -> BigUint;
}

/// RFC6979 deterministic nonce derived from the key and the message digest
#[derive(Debug)]
pub struct DeterministicNonce {
    drbg: HmacDrbg,
    order: BigUint,
    qlen: usize,
}

impl DeterministicNonce {
    pub fn new<C: CurveMath>(
        curve: &C,
        algorithm: HashAlgorithm,
        private_key: &PrivateKey,
        digest: &ByteBuffer,
    ) -> Result<Self> {
        let order = curve.order().clone();
        let qlen = curve.scalar_len();

        // int2octets(x) ‖ bits2octets(h)
        let h = bits_to_int(digest.as_bytes(), order.bits());
        let h = ByteBuffer::from_int(&(h % &order), Some(qlen))?;
        let entropy = private_key.to_bytes()?.concat(&h);

        Ok(Self {
            drbg: HmacDrbg::with_algorithm(algorithm, &entropy, None),
            order,
            qlen,
        })
    }
}

impl NonceSource for DeterministicNonce {
    fn get_k(&mut self) -> BigUint {
        loop {
            let candidate = self.drbg.generate_bytes(self.qlen);
            let k = bits_to_int(candidate.as_bytes(), self.order.bits());
            if k > BigUint::default() && k < self.order {
                return k;
            }
        }
    }
}

/// Leftmost `qbits` bits of `bytes` as an integer
fn bits_to_int(bytes: &[u8], qbits: u64) -> BigUint {
    let value = BigUint::from_bytes_be(bytes);
    let blen = bytes.len() as u64 * 8;
    if blen > qbits {
        value >> (blen - qbits)
    } else {
        value
    }
}

/// Uniform nonce in [1, n − 1] from the thread-local CSPRNG
#[derive(Debug, Clone)]
pub struct RandomNonce {
    order: BigUint,
    len: usize,
}

impl RandomNonce {
    pub fn new<C: CurveMath>(curve: &C) -> Self {
        Self {
            order: curve.order().clone(),
            len: curve.scalar_len(),
        }
    }
}

impl NonceSource for RandomNonce {
    fn get_k(&mut self) -> BigUint {
        let mut bytes = vec![0u8; self.len];
        loop {
            rand::thread_rng().fill_bytes(&mut bytes);
            let k = BigUint::from_bytes_be(&bytes);
            if k > BigUint::default() && k < self.order {
                return k;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Secp256k1Curve;

    #[test]
    fn test_deterministic_nonce_is_repeatable() {
        let curve = Secp256k1Curve::new();
        let key = PrivateKey::new(&curve, BigUint::from(1u32)).unwrap();
        let digest = ByteBuffer::from([0xabu8; 32]);

        let mut a = DeterministicNonce::new(&curve, HashAlgorithm::Sha256, &key, &digest).unwrap();
        let mut b = DeterministicNonce::new(&curve, HashAlgorithm::Sha256, &key, &digest).unwrap();
        assert_eq!(a.get_k(), b.get_k());
        assert_eq!(a.get_k(), b.get_k());
    }

    #[test]
    fn test_deterministic_nonce_depends_on_message() {
        let curve = Secp256k1Curve::new();
        let key = PrivateKey::new(&curve, BigUint::from(1u32)).unwrap();

        let mut a = DeterministicNonce::new(&curve, HashAlgorithm::Sha256, &key, &ByteBuffer::from([1u8; 32])).unwrap();
        let mut b = DeterministicNonce::new(&curve, HashAlgorithm::Sha256, &key, &ByteBuffer::from([2u8; 32])).unwrap();
        assert_ne!(a.get_k(), b.get_k());
    }

    #[test]
    fn test_deterministic_nonce_in_range() {
        let curve = Secp256k1Curve::new();
        let key = PrivateKey::new(&curve, BigUint::from(99u32)).unwrap();
        let mut nonce = DeterministicNonce::new(&curve, HashAlgorithm::Sha512, &key, &ByteBuffer::from([7u8; 32])).unwrap();
        for _ in 0..5 {
            assert!(curve.in_scalar_range(&nonce.get_k()));
        }
    }

    #[test]
    fn test_bits_to_int_truncates_long_input() {
        let bytes = [0xffu8; 64];
        let value = bits_to_int(&bytes, 256);
        assert_eq!(value.bits(), 256);
        assert_eq!(bits_to_int(&[0x01, 0x00], 8), BigUint::from(1u32));
    }

    #[test]
    fn test_random_nonce_in_range_and_varies() {
        let curve = Secp256k1Curve::new();
        let mut nonce = RandomNonce::new(&curve);
        let a = nonce.get_k();
        let b = nonce.get_k();
        assert!(curve.in_scalar_range(&a));
        assert_ne!(a, b);
    }
}
