//! Constant-time byte operations

use subtle::{Choice, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Slices of different length compare unequal; the length itself is not
/// treated as secret.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality returning a `Choice`
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Returns true when every byte of `data` is zero, without early exit
pub fn ct_is_zero(data: &[u8]) -> bool {
    let acc = data.iter().fold(0u8, |acc, &b| acc | b);
    acc.ct_eq(&0u8).into()
}

/// XOR `mask` into `data` byte by byte
///
/// # Panics
/// Panics if the two slices differ in length.
pub fn xor_in_place(data: &mut [u8], mask: &[u8]) {
    assert_eq!(data.len(), mask.len(), "xor operands must have equal length");
    for (d, m) in data.iter_mut().zip(mask.iter()) {
        *d ^= m;
    }
}

/// XOR two equal-length slices into a fresh vector
pub fn xor_to_vec(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = a.to_vec();
    xor_in_place(&mut out, b);
    out
}
