//! Constants for the SM2 elliptic-curve public-key system
//!
//! The curve is the 256-bit prime-field curve recommended by GB/T 32918.5,
//! `y² = x³ + ax + b (mod p)` with cofactor 1.

/// Domain parameters of a short Weierstrass curve over a prime field.
///
/// All values are big-endian byte strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sm2CurveParams {
    /// Field prime `p`
    pub p: [u8; 32],
    /// Curve coefficient `a`
    pub a: [u8; 32],
    /// Curve coefficient `b`
    pub b: [u8; 32],
    /// Order `n` of the base point
    pub n: [u8; 32],
    /// Base point x-coordinate
    pub g_x: [u8; 32],
    /// Base point y-coordinate
    pub g_y: [u8; 32],
    /// Cofactor
    pub h: u32,
}

/// The SM2 recommended curve
pub const SM2_CURVE: Sm2CurveParams = Sm2CurveParams {
    // p = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
    p: [
        0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF,
    ],
    // a = p - 3
    a: [
        0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFC,
    ],
    // b = 28E9FA9E 9D9F5E34 4D5A9E4B CF6509A7 F39789F5 15AB8F92 DDBCBD41 4D940E93
    b: [
        0x28, 0xE9, 0xFA, 0x9E, 0x9D, 0x9F, 0x5E, 0x34, 0x4D, 0x5A, 0x9E, 0x4B, 0xCF, 0x65, 0x09,
        0xA7, 0xF3, 0x97, 0x89, 0xF5, 0x15, 0xAB, 0x8F, 0x92, 0xDD, 0xBC, 0xBD, 0x41, 0x4D, 0x94,
        0x0E, 0x93,
    ],
    // n = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123
    n: [
        0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0x72, 0x03, 0xDF, 0x6B, 0x21, 0xC6, 0x05, 0x2B, 0x53, 0xBB, 0xF4, 0x09, 0x39, 0xD5,
        0x41, 0x23,
    ],
    // Gx = 32C4AE2C 1F198119 5F990446 6A39C994 8FE30BBF F2660BE1 715A4589 334C74C7
    g_x: [
        0x32, 0xC4, 0xAE, 0x2C, 0x1F, 0x19, 0x81, 0x19, 0x5F, 0x99, 0x04, 0x46, 0x6A, 0x39, 0xC9,
        0x94, 0x8F, 0xE3, 0x0B, 0xBF, 0xF2, 0x66, 0x0B, 0xE1, 0x71, 0x5A, 0x45, 0x89, 0x33, 0x4C,
        0x74, 0xC7,
    ],
    // Gy = BC3736A2 F4F6779C 59BDCEE3 6B692153 D0A9877C C62A4740 02DF32E5 2139F0A0
    g_y: [
        0xBC, 0x37, 0x36, 0xA2, 0xF4, 0xF6, 0x77, 0x9C, 0x59, 0xBD, 0xCE, 0xE3, 0x6B, 0x69, 0x21,
        0x53, 0xD0, 0xA9, 0x87, 0x7C, 0xC6, 0x2A, 0x47, 0x40, 0x02, 0xDF, 0x32, 0xE5, 0x21, 0x39,
        0xF0, 0xA0,
    ],
    h: 1,
};

/// Size of an SM2 scalar (private key, nonce) in bytes
pub const SM2_SCALAR_SIZE: usize = 32;

/// Size of an SM2 field element in bytes
pub const SM2_FIELD_ELEMENT_SIZE: usize = 32;

/// Uncompressed point: 0x04 || x || y
pub const SM2_POINT_UNCOMPRESSED_SIZE: usize = 1 + 2 * SM2_FIELD_ELEMENT_SIZE;

/// Compressed point: 0x02/0x03 || x
pub const SM2_POINT_COMPRESSED_SIZE: usize = 1 + SM2_FIELD_ELEMENT_SIZE;

/// Raw signature encoding r || s
pub const SM2_SIGNATURE_SIZE: usize = 2 * SM2_SCALAR_SIZE;

/// Size of the C3 integrity tag in a ciphertext
pub const SM2_CIPHERTEXT_TAG_SIZE: usize = 32;

/// Fixed ciphertext overhead: C1 (65 bytes) || C3 (32 bytes)
pub const SM2_CIPHERTEXT_OVERHEAD: usize = SM2_POINT_UNCOMPRESSED_SIZE + SM2_CIPHERTEXT_TAG_SIZE;

/// Signer identity used when the caller does not supply one
pub const SM2_DEFAULT_USER_ID: &[u8] = b"1234567812345678";

/// Longest identity whose bit length still fits the 16-bit ENTL field
pub const SM2_MAX_USER_ID_SIZE: usize = (u16::MAX as usize) / 8;

/// Cap on nonce/ephemeral-key regeneration in signing and encryption
pub const SM2_MAX_RETRIES: usize = 1024;
