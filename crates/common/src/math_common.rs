//! Fixed-width 256-bit modular arithmetic
//!
//! `U256` stores four little-endian 64-bit limbs. `Modulus` precomputes the
//! Montgomery constants for an odd modulus and provides the field/ring
//! operations used by the curve code. The free functions at the bottom work
//! for any non-zero modulus and favour simplicity over speed.

use core::cmp::Ordering;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Computes `a + b + carry`, returning the result and the new carry.
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result and the new borrow (0 or 1).
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (ret as u64, (ret >> 127) as u64)
}

/// Computes `a + b * c + carry`, returning the result and the new carry.
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) * (c as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Unsigned 256-bit integer, little-endian 64-bit limbs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroize)]
pub struct U256(pub [u64; 4]);

impl U256 {
    /// Number of bytes in the big-endian encoding
    pub const BYTES: usize = 32;
    /// Number of bits
    pub const BITS: usize = 256;

    /// The value 0
    pub const ZERO: Self = U256([0, 0, 0, 0]);
    /// The value 1
    pub const ONE: Self = U256([1, 0, 0, 0]);
    /// 2^256 - 1
    pub const MAX: Self = U256([u64::MAX; 4]);

    /// Build from a small integer
    pub const fn from_u64(v: u64) -> Self {
        U256([v, 0, 0, 0])
    }

    /// Decode a 32-byte big-endian integer
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let start = 32 - (i + 1) * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[start..start + 8]);
            *limb = u64::from_be_bytes(word);
        }
        U256(limbs)
    }

    /// Decode a big-endian integer of at most 32 bytes
    ///
    /// Shorter inputs are left-padded with zeros. Returns `None` for inputs
    /// longer than 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > Self::BYTES {
            return None;
        }
        let mut buf = [0u8; 32];
        buf[Self::BYTES - bytes.len()..].copy_from_slice(bytes);
        let v = Self::from_be_bytes(&buf);
        buf.zeroize();
        Some(v)
    }

    /// Encode as 32 big-endian bytes
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.0.iter().enumerate() {
            let start = 32 - (i + 1) * 8;
            out[start..start + 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// `self + rhs`, returning the wrapped sum and the carry out
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut carry = 0;
        for i in 0..4 {
            let (v, c) = adc(self.0[i], rhs.0[i], carry);
            r[i] = v;
            carry = c;
        }
        (U256(r), carry)
    }

    /// `self - rhs`, returning the wrapped difference and the borrow out
    pub fn overflowing_sub(&self, rhs: &Self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut borrow = 0;
        for i in 0..4 {
            let (v, b) = sbb(self.0[i], rhs.0[i], borrow);
            r[i] = v;
            borrow = b;
        }
        (U256(r), borrow)
    }

    /// Wrapping subtraction modulo 2^256
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    /// Shift left by one bit, returning the shifted value and the bit shifted out
    pub fn shl1(&self) -> (Self, u64) {
        let mut r = [0u64; 4];
        let mut carry = 0;
        for i in 0..4 {
            r[i] = (self.0[i] << 1) | carry;
            carry = self.0[i] >> 63;
        }
        (U256(r), carry)
    }

    /// Shift right by one bit, shifting `top` (0 or 1) into bit 255
    pub fn shr1_with_top(&self, top: u64) -> Self {
        let mut r = [0u64; 4];
        for i in 0..4 {
            let hi = if i == 3 { top & 1 } else { self.0[i + 1] & 1 };
            r[i] = (self.0[i] >> 1) | (hi << 63);
        }
        U256(r)
    }

    /// Shift right by one bit
    pub fn shr1(&self) -> Self {
        self.shr1_with_top(0)
    }

    /// Value of bit `i` (0 = least significant)
    pub fn bit(&self, i: usize) -> bool {
        if i >= Self::BITS {
            return false;
        }
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    /// Number of significant bits
    pub fn bits(&self) -> usize {
        for i in (0..4).rev() {
            if self.0[i] != 0 {
                return i * 64 + (64 - self.0[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Whether the value is zero
    pub fn is_zero(&self) -> bool {
        self.ct_is_zero().into()
    }

    /// Constant-time zero test
    pub fn ct_is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Whether the value is odd
    pub fn is_odd(&self) -> bool {
        self.0[0] & 1 == 1
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..4).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl ConditionallySelectable for U256 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        U256([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
        ])
    }
}

impl ConstantTimeEq for U256 {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[0].ct_eq(&other.0[0])
            & self.0[1].ct_eq(&other.0[1])
            & self.0[2].ct_eq(&other.0[2])
            & self.0[3].ct_eq(&other.0[3])
    }
}

/// An odd modulus with precomputed Montgomery constants
///
/// All operations expect their inputs to be already reduced (`< m`) and
/// return reduced outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulus {
    m: U256,
    /// R^2 mod m, with R = 2^256
    r2: U256,
    /// -m^-1 mod 2^64
    m_inv: u64,
}

impl Modulus {
    /// Prepare Montgomery constants for `m`
    ///
    /// Returns `None` unless `m` is odd and greater than 1.
    pub fn new(m: U256) -> Option<Self> {
        if !m.is_odd() || m == U256::ONE {
            return None;
        }

        // -m^-1 mod 2^64 by Newton iteration; each step doubles the correct bits
        let mut inv: u64 = 1;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m.0[0].wrapping_mul(inv)));
        }
        let m_inv = inv.wrapping_neg();

        // R mod m = (2^256 - m) mod m
        let mut r = mod_reduce(&U256::ZERO.wrapping_sub(&m), &m)?;
        let mut partial = Modulus { m, r2: U256::ZERO, m_inv };
        // R^2 mod m = R * 2^256 mod m
        for _ in 0..256 {
            r = partial.add(&r, &r);
        }
        partial.r2 = r;
        Some(partial)
    }

    /// The modulus value
    pub fn modulus(&self) -> &U256 {
        &self.m
    }

    /// Canonical representative of `a`
    pub fn reduce(&self, a: &U256) -> U256 {
        if *a < self.m {
            return *a;
        }
        let (d, _) = a.overflowing_sub(&self.m);
        if d < self.m {
            return d;
        }
        // moduli below 2^255 can need more than one subtraction
        mod_reduce(a, &self.m).unwrap_or(U256::ZERO)
    }

    /// `a + b mod m`
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        let (sum, carry) = a.overflowing_add(b);
        let (diff, borrow) = sum.overflowing_sub(&self.m);
        // keep the difference if the sum overflowed or is >= m
        let use_diff = Choice::from((carry | (borrow ^ 1)) as u8 & 1);
        U256::conditional_select(&sum, &diff, use_diff)
    }

    /// `a - b mod m`
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        let (diff, borrow) = a.overflowing_sub(b);
        let (fixed, _) = diff.overflowing_add(&self.m);
        U256::conditional_select(&diff, &fixed, Choice::from(borrow as u8))
    }

    /// `-a mod m`
    pub fn neg(&self, a: &U256) -> U256 {
        self.sub(&U256::ZERO, a)
    }

    /// Montgomery product `a * b * R^-1 mod m`
    fn mont_mul(&self, a: &U256, b: &U256) -> U256 {
        let m = &self.m.0;
        let mut t = [0u64; 6];

        for i in 0..4 {
            let mut carry = 0;
            for j in 0..4 {
                let (v, c) = mac(t[j], a.0[j], b.0[i], carry);
                t[j] = v;
                carry = c;
            }
            let (v, c) = adc(t[4], carry, 0);
            t[4] = v;
            t[5] = c;

            let u = t[0].wrapping_mul(self.m_inv);
            let (_, mut carry) = mac(t[0], u, m[0], 0);
            for j in 1..4 {
                let (v, c) = mac(t[j], u, m[j], carry);
                t[j - 1] = v;
                carry = c;
            }
            let (v, c) = adc(t[4], carry, 0);
            t[3] = v;
            t[4] = t[5] + c;
            t[5] = 0;
        }

        // t < 2m here; one conditional subtraction finishes the reduction
        let res = U256([t[0], t[1], t[2], t[3]]);
        let (diff, borrow) = res.overflowing_sub(&self.m);
        let use_diff = Choice::from(((t[4] & 1) | (borrow ^ 1)) as u8);
        U256::conditional_select(&res, &diff, use_diff)
    }

    /// `a * b mod m`
    pub fn mul(&self, a: &U256, b: &U256) -> U256 {
        self.mont_mul(&self.mont_mul(a, b), &self.r2)
    }

    /// `a^2 mod m`
    pub fn square(&self, a: &U256) -> U256 {
        self.mul(a, a)
    }

    /// `base^exp mod m`, left-to-right square-and-multiply
    ///
    /// Every exponent bit costs one squaring and one multiplication.
    pub fn pow(&self, base: &U256, exp: &U256) -> U256 {
        let mut acc = U256::ONE;
        for i in (0..U256::BITS).rev() {
            acc = self.square(&acc);
            let prod = self.mul(&acc, base);
            acc = U256::conditional_select(&acc, &prod, Choice::from(exp.bit(i) as u8));
        }
        acc
    }

    /// `a^-1 mod m` via Fermat's little theorem
    ///
    /// Only valid when `m` is prime. Returns `None` for zero.
    pub fn invert(&self, a: &U256) -> Option<U256> {
        if a.is_zero() {
            return None;
        }
        let (exp, _) = self.m.overflowing_sub(&U256::from_u64(2));
        Some(self.pow(a, &exp))
    }
}

/// `a mod m` for any non-zero `m` (binary long division)
///
/// Returns `None` when `m` is zero.
pub fn mod_reduce(a: &U256, m: &U256) -> Option<U256> {
    if m.is_zero() {
        return None;
    }
    if a < m {
        return Some(*a);
    }

    let mut r = U256::ZERO;
    for i in (0..a.bits()).rev() {
        let (mut shifted, top) = r.shl1();
        shifted.0[0] |= a.bit(i) as u64;
        // r < m before the shift, so at most one subtraction is needed
        if top == 1 || shifted >= *m {
            shifted = shifted.wrapping_sub(m);
        }
        r = shifted;
    }
    Some(r)
}

fn add_mod_generic(a: &U256, b: &U256, m: &U256) -> U256 {
    let (sum, carry) = a.overflowing_add(b);
    if carry == 1 || sum >= *m {
        sum.wrapping_sub(m)
    } else {
        sum
    }
}

fn sub_mod_generic(a: &U256, b: &U256, m: &U256) -> U256 {
    let (diff, borrow) = a.overflowing_sub(b);
    if borrow == 1 {
        diff.overflowing_add(m).0
    } else {
        diff
    }
}

/// `a * b mod m` for any non-zero `m` (double-and-add)
pub fn mod_mul(a: &U256, b: &U256, m: &U256) -> Option<U256> {
    let a = mod_reduce(a, m)?;
    let b = mod_reduce(b, m)?;
    let mut acc = U256::ZERO;
    for i in (0..b.bits()).rev() {
        acc = add_mod_generic(&acc, &acc, m);
        if b.bit(i) {
            acc = add_mod_generic(&acc, &a, m);
        }
    }
    Some(acc)
}

/// `base^exp mod m` for any non-zero `m` (square-and-multiply)
pub fn mod_pow(base: &U256, exp: &U256, m: &U256) -> Option<U256> {
    let base = mod_reduce(base, m)?;
    let mut acc = mod_reduce(&U256::ONE, m)?;
    for i in (0..exp.bits()).rev() {
        acc = mod_mul(&acc, &acc, m)?;
        if exp.bit(i) {
            acc = mod_mul(&acc, &base, m)?;
        }
    }
    Some(acc)
}

/// `a^-1 mod m` by the binary extended Euclidean algorithm
///
/// `m` must be odd. Returns `None` when `a ≡ 0 (mod m)` or when `a` and `m`
/// share a factor.
pub fn mod_inverse(a: &U256, m: &U256) -> Option<U256> {
    if !m.is_odd() || *m == U256::ONE {
        return None;
    }
    let a = mod_reduce(a, m)?;
    if a.is_zero() {
        return None;
    }

    // (x + m) / 2 without losing the carry bit
    let half = |x: &U256| -> U256 {
        if x.is_odd() {
            let (sum, carry) = x.overflowing_add(m);
            sum.shr1_with_top(carry)
        } else {
            x.shr1()
        }
    };

    let mut u = a;
    let mut v = *m;
    let mut x1 = U256::ONE;
    let mut x2 = U256::ZERO;

    while u != U256::ONE && v != U256::ONE {
        if u.is_zero() || v.is_zero() {
            return None;
        }
        while !u.is_odd() {
            u = u.shr1();
            x1 = half(&x1);
        }
        while !v.is_odd() {
            v = v.shr1();
            x2 = half(&x2);
        }
        if u >= v {
            u = u.wrapping_sub(&v);
            x1 = sub_mod_generic(&x1, &x2, m);
        } else {
            v = v.wrapping_sub(&u);
            x2 = sub_mod_generic(&x2, &x1, m);
        }
    }

    Some(if u == U256::ONE { x1 } else { x2 })
}
