//! Integration tests for consensus-primitives

use consensus_primitives::*;
use num_bigint::BigUint;

fn coinbase(value: Integer) -> Transaction {
    Transaction {
        version: 1,
        inputs: vec![TransactionInput {
            prevout: OutPoint { hash: [0; 32], index: 0xffffffff },
            script_sig: vec![0x51],
            sequence: 0xffffffff,
        }],
        outputs: vec![TransactionOutput {
            value,
            script_pubkey: vec![0x51],
        }],
        lock_time: 0,
    }
}

fn spend(prev: &Transaction, value: Integer) -> Transaction {
    let txid = Sha256d.hash(&prev.encode());
    Transaction {
        version: 1,
        inputs: vec![TransactionInput {
            prevout: OutPoint {
                hash: txid.as_bytes().try_into().unwrap(),
                index: 0,
            },
            script_sig: vec![],
            sequence: 0xffffffff,
        }],
        outputs: vec![TransactionOutput {
            value,
            script_pubkey: vec![0x76, 0xa9],
        }],
        lock_time: 0,
    }
}

#[test]
fn test_block_merkle_root_single_coinbase_is_txid() {
    let primitives = ConsensusPrimitives::new();
    let tx = coinbase(5000000000);

    let root = primitives.merkle_root(&[tx.clone()]).unwrap();
    assert_eq!(root, Sha256d.hash(&tx.encode()));
}

#[test]
fn test_block_merkle_root_over_transactions() {
    let cb = coinbase(5000000000);
    let a = spend(&cb, 1000);
    let b = spend(&a, 900);
    let txs = vec![cb.clone(), a.clone(), b.clone()];

    let mut merkle = MerkleRoot::new(Sha256d);
    let root = merkle.calculate(&txs).unwrap();

    let ids: Vec<ByteBuffer> = txs.iter().map(|tx| Sha256d.hash(&tx.encode())).collect();
    let left = Sha256d.hash(ids[0].concat(&ids[1]).as_bytes());
    let right = Sha256d.hash(ids[2].concat(&ids[2]).as_bytes());
    let expected = Sha256d.hash(left.concat(&right).as_bytes());

    assert_eq!(root, expected);
    assert_eq!(merkle.last_hash_hex().unwrap(), expected.flip().to_hex());
}

#[test]
fn test_block_merkle_root_empty_block() {
    let primitives = ConsensusPrimitives::new();
    let txs: Vec<Transaction> = vec![];
    assert_eq!(primitives.merkle_root(&txs), Err(PrimitiveError::EmptyMerkleTree));
}

#[test]
fn test_sign_transaction_digest() -> anyhow::Result<()> {
    let primitives = ConsensusPrimitives::new();
    let curve = primitives.signer().curve();
    let key = PrivateKey::new(curve, BigUint::from(0xdeadbeefu64))?;
    let public_key = key.public_key(curve)?;

    let tx = spend(&coinbase(5000000000), 4999990000);
    let digest = Sha256d.hash(&tx.encode());
    let signature = primitives.sign(&key, &digest)?;

    assert!(primitives.verify(&public_key, &digest, &signature));
    assert!(signature.is_low_s(curve.order()));
    Ok(())
}

#[test]
fn test_drbg_from_facade_matches_direct() {
    let primitives = ConsensusPrimitives::new();
    let entropy = ByteBuffer::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
    let nonce = ByteBuffer::from_hex("2021222324252627").unwrap();

    let mut from_facade = primitives.drbg(&entropy, Some(&nonce));
    let mut direct = HmacDrbg::new("sha256", &entropy, Some(&nonce)).unwrap();
    assert_eq!(from_facade.generate_bytes(80), direct.generate_bytes(80));
}

#[test]
fn test_stack_as_interpreter_substrate() {
    // OP_1 OP_2 OP_3, then OP_ROT-style manipulation through erase/push
    let mut stack = ScriptStack::new();
    stack.push(vec![1u8]).push(vec![2]).push(vec![3]);

    let third = stack.erase(-3).unwrap();
    stack.push(third);
    assert_eq!(stack.dump(), &[vec![2u8], vec![3], vec![1]]);

    stack.set(-1, vec![]).unwrap();
    assert_eq!(stack.top(-1).unwrap(), &Vec::<u8>::new());
    assert!(stack.top(-4).is_err());
}

#[test]
fn test_interpreter_limits_and_sighash() {
    assert_eq!(MAX_SCRIPT_SIZE, 10_000);
    assert_eq!(MAX_SCRIPT_ELEMENT_SIZE, 520);
    assert_eq!(MAX_SCRIPT_OPS, 201);
    assert_eq!(SigHashType::from_u32(0x01 | SIGHASH_ANYONECANPAY).unwrap().to_u32(), 0x81);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        PrimitiveError::EmptyMerkleTree.to_string(),
        "Cannot compute Merkle root of an empty tree"
    );
    assert_eq!(
        PrimitiveError::StackUnderflow.to_string(),
        "Attempted to pop from stack when empty"
    );
    assert!(PrimitiveError::DegenerateNonce(NonceFailure::ZeroS).is_retryable());
    assert!(!PrimitiveError::StackUnderflow.is_retryable());
}
