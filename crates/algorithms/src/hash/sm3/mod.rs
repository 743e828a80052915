//! SM3 cryptographic hash function
//!
//! 256-bit Merkle–Damgård hash standardised as GB/T 32905-2016. Messages are
//! processed in 64-byte blocks; each block is expanded into a 68-word schedule
//! `W` plus a 64-word schedule `W'` and fed through 64 compression rounds.
//!
//! [`Sm3`] is the streaming implementation used everywhere else in the crate.
//! [`pad_message`], [`expand_message`] and [`compress`] expose the individual
//! steps for callers that work on whole messages.

use byteorder::{BigEndian, ByteOrder};
use zeroize::Zeroize;

use crate::error::{validate, Result};
use crate::hash::{HashAlgorithm, HashFunction};
use crate::types::Digest;

use gmcrypt_params::utils::hash::{
    SM3_BLOCK_SIZE, SM3_EXPANDED_WORDS, SM3_OUTPUT_SIZE, SM3_ROUNDS,
};

/// Initial chaining value
const IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d,
    0xb0fb0e4e,
];

/// Round constant for rounds 0..16
const T_LOW: u32 = 0x79cc4519;
/// Round constant for rounds 16..64
const T_HIGH: u32 = 0x7a879d8a;

#[inline(always)]
fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// Pad a complete message to a multiple of the block size
///
/// Appends `0x80`, zeros up to 56 mod 64, then the 64-bit big-endian bit
/// length of the original message.
pub fn pad_message(message: &[u8]) -> Vec<u8> {
    let bit_len = (message.len() as u64).wrapping_mul(8);
    let mut padded = Vec::with_capacity(message.len() + SM3_BLOCK_SIZE + 8);
    padded.extend_from_slice(message);
    padded.push(0x80);
    while padded.len() % SM3_BLOCK_SIZE != 56 {
        padded.push(0);
    }
    padded.extend_from_slice(&bit_len.to_be_bytes());
    padded
}

/// Expand one block into the `W` (68 words) and `W'` (64 words) schedules
pub fn expand_message(
    block: &[u8; SM3_BLOCK_SIZE],
) -> ([u32; SM3_EXPANDED_WORDS], [u32; SM3_ROUNDS]) {
    let mut w = [0u32; SM3_EXPANDED_WORDS];
    BigEndian::read_u32_into(block, &mut w[..16]);

    for i in 16..SM3_EXPANDED_WORDS {
        w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15))
            ^ w[i - 13].rotate_left(7)
            ^ w[i - 6];
    }

    let mut w1 = [0u32; SM3_ROUNDS];
    for (j, word) in w1.iter_mut().enumerate() {
        *word = w[j] ^ w[j + 4];
    }

    (w, w1)
}

/// Run the compression function on one block, updating `state` in place
pub fn compress(state: &mut [u32; 8], block: &[u8; SM3_BLOCK_SIZE]) {
    let (mut w, mut w1) = expand_message(block);

    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];
    let mut e = state[4];
    let mut f = state[5];
    let mut g = state[6];
    let mut h = state[7];

    for j in 0..SM3_ROUNDS {
        let t = if j < 16 { T_LOW } else { T_HIGH };
        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(t.rotate_left((j % 32) as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff(a, b, c, j)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w1[j]);
        let tt2 = gg(e, f, g, j)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;

    w.zeroize();
    w1.zeroize();
}

/// Marker type for SM3
pub enum Sm3Algorithm {}

impl HashAlgorithm for Sm3Algorithm {
    const OUTPUT_SIZE: usize = SM3_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SM3_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SM3";
}

/// SM3 hash state
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; 8],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Sm3 {
    fn init() -> Self {
        Sm3 {
            state: IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn update_internal(&mut self, mut input: &[u8]) {
        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let block = self.buffer;
                compress(&mut self.state, &block);
                self.total_bytes = self.total_bytes.wrapping_add(SM3_BLOCK_SIZE as u64);
                self.buffer_idx = 0;
            }
        }
    }

    fn finalize_internal(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE]> {
        validate::max_length("SM3 buffer", self.buffer_idx, SM3_BLOCK_SIZE - 1)?;
        self.total_bytes = self.total_bytes.wrapping_add(self.buffer_idx as u64);
        let bit_len = self.total_bytes.wrapping_mul(8);

        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let block = self.buffer;
            compress(&mut self.state, &block);
            self.buffer = [0u8; SM3_BLOCK_SIZE];
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..56] {
                *b = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[56..], bit_len);
        let block = self.buffer;
        compress(&mut self.state, &block);

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);
        self.zeroize();
        Ok(out)
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::init()
    }
}

impl HashFunction for Sm3 {
    type Algorithm = Sm3Algorithm;
    type Output = Digest<SM3_OUTPUT_SIZE>;

    fn new() -> Self {
        Self::init()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data);
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        Ok(Digest::new(self.finalize_internal()?))
    }
}

/// Hash a complete message without the streaming buffer
///
/// Produces the same digest as [`Sm3`]; used to cross-check the streaming
/// path against the textbook pad-then-compress formulation.
pub fn sm3_oneshot(message: &[u8]) -> [u8; SM3_OUTPUT_SIZE] {
    let padded = pad_message(message);
    let mut state = IV;
    for chunk in padded.chunks_exact(SM3_BLOCK_SIZE) {
        let mut block = [0u8; SM3_BLOCK_SIZE];
        block.copy_from_slice(chunk);
        compress(&mut state, &block);
    }
    let mut out = [0u8; SM3_OUTPUT_SIZE];
    BigEndian::write_u32_into(&state, &mut out);
    out
}
