//! HMAC deterministic random bit generator
//!
//! Produces a reproducible byte stream from a seed by iterating HMAC over an
//! evolving (K, V) state pair. Used to derive signing nonces deterministically.

use tracing::{debug, trace};

use crate::buffer::ByteBuffer;
use crate::constants::*;
use crate::error::Result;
use crate::hash::HashAlgorithm;

/// HMAC-DRBG state: keying value K, chaining value V and the reseed counter.
///
/// Every output call mutates the state, so an instance must not be shared
/// between concurrent signing operations.
pub struct HmacDrbg {
    algorithm: HashAlgorithm,
    k: Vec<u8>,
    v: Vec<u8>,
    reseed_counter: u64,
}

impl HmacDrbg {
    /// Construct and instantiate a generator over the named hash algorithm.
    ///
    /// Fails immediately if the runtime does not support `algorithm`.
    pub fn new(
        algorithm: &str,
        entropy: &ByteBuffer,
        personalization: Option<&ByteBuffer>,
    ) -> Result<Self> {
        let algorithm = HashAlgorithm::from_name(algorithm)?;
        Ok(Self::with_algorithm(algorithm, entropy, personalization))
    }

    pub fn with_algorithm(
        algorithm: HashAlgorithm,
        entropy: &ByteBuffer,
        personalization: Option<&ByteBuffer>,
    ) -> Self {
        let mut drbg = Self {
            algorithm,
            k: Vec::new(),
            v: Vec::new(),
            reseed_counter: DRBG_RESEED_COUNTER_START,
        };
        drbg.initialize(entropy, personalization);
        drbg
    }

    /// Reset K and V and seed them with `entropy ‖ personalization`
    pub fn initialize(&mut self, entropy: &ByteBuffer, personalization: Option<&ByteBuffer>) {
        let len = self.algorithm.output_len();
        self.v = vec![DRBG_INITIAL_V_BYTE; len];
        self.k = vec![DRBG_INITIAL_K_BYTE; len];
        self.reseed_counter = DRBG_RESEED_COUNTER_START;

        let seed = match personalization {
            Some(personalization) => entropy.concat(personalization),
            None => entropy.clone(),
        };
        self.update(Some(seed.as_bytes()));

        debug!(algorithm = %self.algorithm, seed_len = seed.len(), "HMAC-DRBG instantiated");
    }

    /// HMAC(K, data)
    fn hash(&self, data: &[u8]) -> Vec<u8> {
        self.algorithm.hmac(data, &self.k)
    }

    /// K = HMAC(K, V ‖ 0x00 ‖ data), V = HMAC(K, V); repeated with 0x01 only
    /// when `data` is non-empty.
    pub fn update(&mut self, data: Option<&[u8]>) {
        let data = data.unwrap_or_default();

        self.k = self.hash(&self.chain(0x00, data));
        self.v = self.hash(&self.v);

        if !data.is_empty() {
            self.k = self.hash(&self.chain(0x01, data));
            self.v = self.hash(&self.v);
        }
    }

    fn chain(&self, separator: u8, data: &[u8]) -> Vec<u8> {
        let mut input = Vec::with_capacity(self.v.len() + 1 + data.len());
        input.extend_from_slice(&self.v);
        input.push(separator);
        input.extend_from_slice(data);
        input
    }

    /// Mix in fresh entropy and reset the reseed counter
    pub fn reseed(&mut self, entropy: &ByteBuffer) {
        self.update(Some(entropy.as_bytes()));
        self.reseed_counter = DRBG_RESEED_COUNTER_START;
        debug!(algorithm = %self.algorithm, "HMAC-DRBG reseeded");
    }

    /// Produce exactly `len` bytes, then advance the state once more
    pub fn generate_bytes(&mut self, len: usize) -> ByteBuffer {
        let mut output = Vec::with_capacity(len + self.v.len());

        while output.len() < len {
            self.v = self.hash(&self.v);
            output.extend_from_slice(&self.v);
        }
        output.truncate(len);

        self.update(None);
        self.reseed_counter += 1;

        trace!(len, reseed_counter = self.reseed_counter, "HMAC-DRBG generated bytes");
        ByteBuffer::new(output)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Output calls since instantiation or the last reseed, starting at 1
    pub fn reseed_counter(&self) -> u64 {
        self.reseed_counter
    }
}

impl std::fmt::Debug for HmacDrbg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacDrbg")
            .field("algorithm", &self.algorithm)
            .field("reseed_counter", &self.reseed_counter)
            .finish_non_exhaustive()
    }
}
