//! SM2 signature encodings
//!
//! The raw form is the fixed 64-byte `r ‖ s`. The DER form is
//! `SEQUENCE { INTEGER r, INTEGER s }` as used in X.509 and CMS.

use crate::error::{Error, Result};
use gmcrypt_params::traditional::sm2::{SM2_SCALAR_SIZE, SM2_SIGNATURE_SIZE};

const DER_SEQUENCE: u8 = 0x30;
const DER_INTEGER: u8 = 0x02;

/// An SM2 signature `(r, s)`, each a 32-byte big-endian integer
///
/// Parsing only checks the layout; the range `[1, n-1]` is enforced by
/// verification, which rejects rather than errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sm2Signature {
    r: [u8; SM2_SCALAR_SIZE],
    s: [u8; SM2_SCALAR_SIZE],
}

impl Sm2Signature {
    /// Assemble from the two components
    pub fn new(r: [u8; SM2_SCALAR_SIZE], s: [u8; SM2_SCALAR_SIZE]) -> Self {
        Self { r, s }
    }

    /// The `r` component
    pub fn r(&self) -> &[u8; SM2_SCALAR_SIZE] {
        &self.r
    }

    /// The `s` component
    pub fn s(&self) -> &[u8; SM2_SCALAR_SIZE] {
        &self.s
    }

    /// Raw `r ‖ s`
    pub fn to_bytes(&self) -> [u8; SM2_SIGNATURE_SIZE] {
        let mut out = [0u8; SM2_SIGNATURE_SIZE];
        out[..SM2_SCALAR_SIZE].copy_from_slice(&self.r);
        out[SM2_SCALAR_SIZE..].copy_from_slice(&self.s);
        out
    }

    /// Parse raw `r ‖ s`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SM2_SIGNATURE_SIZE {
            return Err(Error::InvalidSignatureSize {
                expected: SM2_SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; SM2_SCALAR_SIZE];
        let mut s = [0u8; SM2_SCALAR_SIZE];
        r.copy_from_slice(&bytes[..SM2_SCALAR_SIZE]);
        s.copy_from_slice(&bytes[SM2_SCALAR_SIZE..]);
        Ok(Self { r, s })
    }

    /// Serialize to DER
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r);
        let s = encode_integer(&self.s);

        // each INTEGER is at most 2 + 33 bytes, so short-form lengths suffice
        let mut der = Vec::with_capacity(2 + 4 + r.len() + s.len());
        der.push(DER_SEQUENCE);
        der.push((4 + r.len() + s.len()) as u8);

        der.push(DER_INTEGER);
        der.push(r.len() as u8);
        der.extend_from_slice(&r);

        der.push(DER_INTEGER);
        der.push(s.len() as u8);
        der.extend_from_slice(&s);

        der
    }

    /// Parse from DER
    ///
    /// Only the short length form is accepted; anything else cannot hold two
    /// 256-bit integers.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        if der.len() < 8 {
            return Err(Error::Encoding("DER signature too short".to_string()));
        }
        if der[0] != DER_SEQUENCE {
            return Err(Error::Encoding("Invalid DER SEQUENCE tag".to_string()));
        }
        let seq_len = der[1] as usize;
        if seq_len & 0x80 != 0 || seq_len != der.len() - 2 {
            return Err(Error::Encoding("Invalid DER SEQUENCE length".to_string()));
        }

        let mut pos = 2;
        let r = read_integer(der, &mut pos, "r")?;
        let s = read_integer(der, &mut pos, "s")?;
        if pos != der.len() {
            return Err(Error::Encoding("Trailing bytes after DER SEQUENCE".to_string()));
        }

        Ok(Self { r, s })
    }
}

/// Strip leading zeros, then add one back if the high bit is set
fn encode_integer(bytes: &[u8; SM2_SCALAR_SIZE]) -> Vec<u8> {
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(SM2_SCALAR_SIZE - 1);
    let trimmed = &bytes[first..];
    if trimmed[0] & 0x80 == 0 {
        trimmed.to_vec()
    } else {
        let mut result = Vec::with_capacity(trimmed.len() + 1);
        result.push(0x00);
        result.extend_from_slice(trimmed);
        result
    }
}

fn read_integer(der: &[u8], pos: &mut usize, name: &str) -> Result<[u8; SM2_SCALAR_SIZE]> {
    if der.get(*pos) != Some(&DER_INTEGER) {
        return Err(Error::Encoding(format!("Invalid DER INTEGER tag for {}", name)));
    }
    let len = *der
        .get(*pos + 1)
        .ok_or_else(|| Error::Encoding(format!("Missing DER length for {}", name)))?
        as usize;
    let start = *pos + 2;
    let end = start + len;
    if len == 0 || len & 0x80 != 0 || end > der.len() {
        return Err(Error::Encoding(format!("Invalid DER length for {}", name)));
    }

    let mut value = &der[start..end];
    if value[0] & 0x80 != 0 {
        return Err(Error::Encoding(format!("Negative DER INTEGER for {}", name)));
    }
    while value.len() > 1 && value[0] == 0x00 {
        value = &value[1..];
    }
    if value.len() > SM2_SCALAR_SIZE {
        return Err(Error::Encoding(format!("DER INTEGER {} exceeds 256 bits", name)));
    }

    let mut out = [0u8; SM2_SCALAR_SIZE];
    out[SM2_SCALAR_SIZE - value.len()..].copy_from_slice(value);
    *pos = end;
    Ok(out)
}
