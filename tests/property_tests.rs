//! Property tests for the DRBG, signer, Merkle root and script stack

use consensus_primitives::*;
use num_bigint::BigUint;
use proptest::prelude::*;

fn secp256k1_order() -> BigUint {
    BigUint::from_bytes_be(&SECP256K1_ORDER)
}

proptest! {
    #[test]
    fn prop_drbg_deterministic(
        entropy in proptest::collection::vec(any::<u8>(), 1..64),
        personalization in proptest::collection::vec(any::<u8>(), 0..32),
        lengths in proptest::collection::vec(0usize..200, 1..5),
    ) {
        let entropy = ByteBuffer::new(entropy);
        let personalization = ByteBuffer::new(personalization);
        let mut a = HmacDrbg::new("sha256", &entropy, Some(&personalization)).unwrap();
        let mut b = HmacDrbg::new("sha256", &entropy, Some(&personalization)).unwrap();

        for len in lengths {
            let out = a.generate_bytes(len);
            prop_assert_eq!(out.len(), len);
            prop_assert_eq!(out, b.generate_bytes(len));
        }
        prop_assert_eq!(a.reseed_counter(), b.reseed_counter());
    }

    #[test]
    fn prop_drbg_reseed_changes_stream(
        entropy in proptest::collection::vec(any::<u8>(), 1..64),
        extra in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        let entropy = ByteBuffer::new(entropy);
        let mut plain = HmacDrbg::new("sha256", &entropy, None).unwrap();
        let mut reseeded = HmacDrbg::new("sha256", &entropy, None).unwrap();
        plain.generate_bytes(32);
        reseeded.generate_bytes(32);

        reseeded.reseed(&ByteBuffer::new(extra));
        prop_assert_eq!(reseeded.reseed_counter(), 1);
        prop_assert_ne!(plain.generate_bytes(32), reseeded.generate_bytes(32));
    }

    #[test]
    fn prop_sign_verify_round_trip(
        secret in any::<[u8; 32]>(),
        digest in any::<[u8; 32]>(),
    ) {
        let primitives = ConsensusPrimitives::new();
        let curve = primitives.signer().curve();
        let key = PrivateKey::from_bytes(curve, &secret);
        prop_assume!(key.is_ok());
        let key = key.unwrap();
        let public_key = key.public_key(curve).unwrap();
        let digest = ByteBuffer::from(digest);

        let signature = primitives.sign(&key, &digest).unwrap();
        prop_assert!(primitives.verify(&public_key, &digest, &signature));
        prop_assert!(signature.is_low_s(&secp256k1_order()));
    }

    #[test]
    fn prop_complement_s_verifies(
        secret in any::<[u8; 32]>(),
        digest in any::<[u8; 32]>(),
    ) {
        let signer = Signer::new(Secp256k1Curve::new(), false);
        let key = PrivateKey::from_bytes(signer.curve(), &secret);
        prop_assume!(key.is_ok());
        let key = key.unwrap();
        let public_key = key.public_key(signer.curve()).unwrap();
        let digest = ByteBuffer::from(digest);

        let signature = signer.sign_deterministic(&key, &digest, HashAlgorithm::Sha256).unwrap();
        let complement = Signature::new(signature.r().clone(), secp256k1_order() - signature.s());
        prop_assert!(signer.verify(&public_key, &digest, &signature));
        prop_assert!(signer.verify(&public_key, &digest, &complement));
    }

    #[test]
    fn prop_merkle_odd_count_duplicates_last(
        leaves in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..40), 1..12),
    ) {
        prop_assume!(leaves.len() % 2 == 1 && leaves.len() > 1);
        let mut padded = leaves.clone();
        padded.push(leaves[leaves.len() - 1].clone());

        let mut merkle = MerkleRoot::new(Sha256d);
        let odd = merkle.calculate(&leaves).unwrap();
        let even = merkle.calculate(&padded).unwrap();
        prop_assert_eq!(odd, even);
    }

    #[test]
    fn prop_stack_lifo(values in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..8), 0..32)) {
        let mut stack = ScriptStack::new();
        for value in &values {
            stack.push(value.clone());
        }
        for value in values.iter().rev() {
            prop_assert_eq!(&stack.pop().unwrap(), value);
        }
        prop_assert_eq!(stack.pop(), Err(PrimitiveError::StackUnderflow));
    }

    #[test]
    fn prop_stack_bounds_leave_contents(
        values in proptest::collection::vec(any::<u8>(), 0..16),
        offset in -40i64..40,
    ) {
        let mut stack: ScriptStack<u8> = ScriptStack::new();
        for &value in &values {
            stack.push(value);
        }
        let in_bounds = offset < 0 && (-offset) as usize <= values.len();
        let before = stack.clone();

        prop_assert_eq!(stack.top(offset).is_ok(), in_bounds);
        if !in_bounds {
            prop_assert!(stack.set(offset, 0).is_err());
            prop_assert!(stack.erase(offset).is_err());
            prop_assert_eq!(&stack, &before);
        }
    }
}
