//! Counter-mode KDF
//!
//! `K = H(Z ‖ ct₁) ‖ H(Z ‖ ct₂) ‖ …` truncated to the requested length, with
//! `ctᵢ` a 32-bit big-endian counter starting at 1.

use core::marker::PhantomData;
use zeroize::Zeroizing;

use crate::error::{validate, Error, Result};
use crate::hash::{HashFunction, Sm3};
use crate::kdf::{KdfAlgorithm, KdfOperation, KeyDerivationFunction};

/// Type-level constants for the counter KDF
pub enum CounterKdfAlgorithm<H: HashFunction> {
    /// Phantom field for the hash function
    _Hash(PhantomData<H>),
}

impl<H: HashFunction> KdfAlgorithm for CounterKdfAlgorithm<H> {
    const ALGORITHM_ID: &'static str = "KDF";

    fn name() -> String {
        format!("{}-{}", Self::ALGORITHM_ID, H::name())
    }
}

/// Counter-mode KDF over any hash function
#[derive(Clone)]
pub struct CounterKdf<H: HashFunction> {
    _hash_type: PhantomData<H>,
}

/// The KDF used by SM2 encryption
pub type Sm3Kdf = CounterKdf<Sm3>;

impl<H: HashFunction> CounterKdf<H> {
    /// Largest output the 32-bit counter can address
    pub fn max_output_len() -> usize {
        (u32::MAX as usize).saturating_mul(H::output_size())
    }

    /// Expand `input` into `length` bytes
    pub fn expand(input: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
        validate::max_length("KDF output", length, Self::max_output_len())?;

        let mut out = Zeroizing::new(Vec::with_capacity(length));
        let mut counter: u32 = 1;

        while out.len() < length {
            let mut h = H::new();
            h.update(input)?;
            h.update(&counter.to_be_bytes())?;
            let block = h.finalize()?;
            let block = block.as_ref();

            let take = core::cmp::min(block.len(), length - out.len());
            out.extend_from_slice(&block[..take]);
            counter = counter.wrapping_add(1);
        }

        Ok(out)
    }
}

impl<H: HashFunction> KeyDerivationFunction for CounterKdf<H> {
    type Algorithm = CounterKdfAlgorithm<H>;

    fn new() -> Self {
        CounterKdf {
            _hash_type: PhantomData,
        }
    }

    fn derive_key(&self, input: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
        Self::expand(input, length)
    }

    fn builder(&self) -> impl KdfOperation<'_> {
        CounterKdfOperation {
            kdf: self,
            input: None,
            length: 0,
        }
    }
}

/// Operation for counter-KDF derivations
pub struct CounterKdfOperation<'a, H: HashFunction> {
    kdf: &'a CounterKdf<H>,
    input: Option<&'a [u8]>,
    length: usize,
}

impl<'a, H: HashFunction> KdfOperation<'a> for CounterKdfOperation<'a, H> {
    fn with_input(mut self, input: &'a [u8]) -> Self {
        self.input = Some(input);
        self
    }

    fn with_output_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    fn derive(self) -> Result<Zeroizing<Vec<u8>>> {
        let input = self
            .input
            .ok_or_else(|| Error::param("input", "input keying material not set"))?;
        self.kdf.derive_key(input, self.length)
    }
}

/// SM3-based KDF, `KDF(Z, klen)` with `klen` in bytes
pub fn sm3_kdf(z: &[u8], length: usize) -> Result<Zeroizing<Vec<u8>>> {
    Sm3Kdf::expand(z, length)
}

#[cfg(test)]
mod tests;
