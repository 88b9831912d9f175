//! Curve, generator and interpreter constants

/// secp256k1 group order n, big-endian
pub const SECP256K1_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b,
    0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Size of a secp256k1 scalar or field element in bytes
pub const SCALAR_SIZE: usize = 32;

/// Byte V is filled with before the DRBG is first seeded
pub const DRBG_INITIAL_V_BYTE: u8 = 0x01;

/// Byte K is filled with before the DRBG is first seeded
pub const DRBG_INITIAL_K_BYTE: u8 = 0x00;

/// Value the reseed counter holds after instantiation or reseed
pub const DRBG_RESEED_COUNTER_START: u64 = 1;

/// Default algorithm for deterministic nonces
pub const DEFAULT_DRBG_ALGORITHM: &str = "sha256";

/// Maximum script length
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Maximum number of bytes pushable to the stack in one operation
pub const MAX_SCRIPT_ELEMENT_SIZE: usize = 520;

/// Maximum number of non-push operations in a script
pub const MAX_SCRIPT_OPS: usize = 201;

/// Sighash flag: only the current input is committed to
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;
