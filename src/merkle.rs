//! Block Merkle root over an ordered transaction list

use tracing::debug;

use crate::buffer::ByteBuffer;
use crate::error::{PrimitiveError, Result};
use crate::hash::HashFunction;
use crate::types::*;

/// Wire serialization of a Merkle leaf
pub trait Encodable {
    fn encode(&self) -> Vec<u8>;
}

impl Encodable for ByteBuffer {
    fn encode(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl Encodable for Vec<u8> {
    fn encode(&self) -> Vec<u8> {
        self.clone()
    }
}

/// Legacy (non-witness) transaction encoding
impl Encodable for Transaction {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());

        write_compact_size(&mut out, self.inputs.len() as u64);
        for input in &self.inputs {
            out.extend_from_slice(&input.prevout.hash);
            out.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_compact_size(&mut out, input.script_sig.len() as u64);
            out.extend_from_slice(&input.script_sig);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            write_compact_size(&mut out, output.script_pubkey.len() as u64);
            out.extend_from_slice(&output.script_pubkey);
        }

        out.extend_from_slice(&self.lock_time.to_le_bytes());
        out
    }
}

fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x10000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// Computes and caches the Merkle root of a transaction list.
///
/// Leaves are the encoded transactions; the hash function is applied to each
/// leaf and to every concatenated pair of child hashes. A level with an odd
/// number of nodes repeats its last node, so every internal node has two
/// children.
#[derive(Debug)]
pub struct MerkleRoot<H: HashFunction> {
    hash_function: H,
    last_hash: Option<ByteBuffer>,
}

impl<H: HashFunction> MerkleRoot<H> {
    pub fn new(hash_function: H) -> Self {
        Self {
            hash_function,
            last_hash: None,
        }
    }

    /// Root of `transactions`, in internal byte order
    pub fn calculate<T: Encodable>(&mut self, transactions: &[T]) -> Result<ByteBuffer> {
        let root = match transactions {
            [] => return Err(PrimitiveError::EmptyMerkleTree),
            [only] => self.hash_function.hash(&only.encode()),
            _ => {
                let mut leaves: Vec<Vec<u8>> = transactions.iter().map(Encodable::encode).collect();
                if leaves.len() % 2 == 1 {
                    if let Some(last) = leaves.last().cloned() {
                        leaves.push(last);
                    }
                }
                debug!(
                    tx_count = transactions.len(),
                    leaf_count = leaves.len(),
                    "Computing Merkle root"
                );
                self.build_tree(&leaves)?
            }
        };

        self.last_hash = Some(root.clone());
        Ok(root)
    }

    /// Root in display order: byte-reversed hex, as block explorers print it
    pub fn calculate_hex<T: Encodable>(&mut self, transactions: &[T]) -> Result<String> {
        self.calculate(transactions).map(|root| root.flip().to_hex())
    }

    /// Root from the most recent successful calculation
    pub fn last_hash(&self) -> Option<&ByteBuffer> {
        self.last_hash.as_ref()
    }

    pub fn last_hash_hex(&self) -> Option<String> {
        self.last_hash.as_ref().map(|root| root.flip().to_hex())
    }

    /// Bottom-up pairwise hashing. All node hashes live in one flat arena,
    /// level after level; `level_start` is the offset of the current level.
    fn build_tree(&self, leaves: &[Vec<u8>]) -> Result<ByteBuffer> {
        let width = self.hash_function.output_len();
        let mut nodes: Vec<u8> = Vec::with_capacity(2 * leaves.len() * width);
        for leaf in leaves {
            self.push_node(&mut nodes, leaf, width)?;
        }

        let mut level_start = 0;
        let mut level_len = leaves.len();
        while level_len > 1 {
            let next_start = nodes.len();
            let mut i = 0;
            while i < level_len {
                // odd level: pair the last node with itself
                let right = if i + 1 < level_len { i + 1 } else { i };
                let left_at = level_start + i * width;
                let right_at = level_start + right * width;

                let mut pair = Vec::with_capacity(2 * width);
                pair.extend_from_slice(&nodes[left_at..left_at + width]);
                pair.extend_from_slice(&nodes[right_at..right_at + width]);
                self.push_node(&mut nodes, &pair, width)?;

                i += 2;
            }
            level_start = next_start;
            level_len = (level_len + 1) / 2;
        }

        Ok(ByteBuffer::from(&nodes[level_start..level_start + width]))
    }

    /// Hash `data` into the arena; every node must be exactly `width` bytes
    fn push_node(&self, nodes: &mut Vec<u8>, data: &[u8], width: usize) -> Result<()> {
        let node = self.hash_function.hash(data);
        if node.len() != width {
            return Err(PrimitiveError::InvalidLength {
                expected: width,
                actual: node.len(),
            });
        }
        nodes.extend_from_slice(node.as_bytes());
        Ok(())
    }
}
