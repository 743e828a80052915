//! Constants for hash functions

/// Output size of SM3 in bytes
pub const SM3_OUTPUT_SIZE: usize = 32;

/// Internal block size of SM3 in bytes
pub const SM3_BLOCK_SIZE: usize = 64;

/// Number of 32-bit words in the expanded SM3 message schedule `W`
pub const SM3_EXPANDED_WORDS: usize = 68;

/// Number of SM3 compression rounds (and words in the derived schedule `W'`)
pub const SM3_ROUNDS: usize = 64;
