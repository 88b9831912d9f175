//! Shared Bitcoin types

use serde::{Deserialize, Serialize};

use crate::constants::SIGHASH_ANYONECANPAY;

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Integer type
pub type Integer = i64;

/// OutPoint: 𝒪 = ℍ × ℕ₃₂
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

/// Transaction Input: ℐ = 𝒪 × 𝕊 × ℕ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

/// Transaction Output: 𝒯 = ℤ × 𝕊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub value: Integer,
    pub script_pubkey: ByteString,
}

/// Transaction: 𝒯𝒳 = ℤ₃₂ × ℐ* × 𝒯* × ℕ₃₂
///
/// Scalar fields carry their wire widths, so every value has exactly one encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

/// Base signature hash mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum SigHashMode {
    All = 0x01,
    None = 0x02,
    Single = 0x03,
}

/// Signature hash type: base mode plus the ANYONECANPAY flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SigHashType {
    pub mode: SigHashMode,
    pub anyone_can_pay: bool,
}

impl SigHashType {
    pub const ALL: SigHashType = SigHashType { mode: SigHashMode::All, anyone_can_pay: false };

    /// Parse the sighash byte appended to a script signature
    pub fn from_u32(value: u32) -> Option<Self> {
        let mode = match value & !SIGHASH_ANYONECANPAY {
            0x01 => SigHashMode::All,
            0x02 => SigHashMode::None,
            0x03 => SigHashMode::Single,
            _ => return None,
        };
        Some(SigHashType {
            mode,
            anyone_can_pay: value & SIGHASH_ANYONECANPAY != 0,
        })
    }

    pub fn to_u32(self) -> u32 {
        let flag = if self.anyone_can_pay { SIGHASH_ANYONECANPAY } else { 0 };
        self.mode as u32 | flag
    }
}
