//! SM2 elliptic curve point operations

use crate::ec::sm2::{
    constants::{SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE},
    field::FieldElement,
    scalar::Scalar,
};
use crate::error::{validate, Error, Result};
use gmcrypt_common::U256;
use subtle::{Choice, ConditionallySelectable};

/// Format of a serialized elliptic‐curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// Uncompressed: 0x04 ∥ x ∥ y
    Uncompressed,
    /// Compressed: 0x02/0x03 ∥ x
    Compressed,
}

/// Affine coordinates (x, y) or the point at infinity
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Jacobian coordinates (X:Y:Z), x = X/Z², y = Y/Z³; Z = 0 is the identity
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let a_id = self.is_identity();
        let b_id = other.is_identity();
        if a_id || b_id {
            return a_id == b_id;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Create a new affine point from uncompressed byte coordinates
    pub fn new_uncompressed(
        x_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x = FieldElement::from_bytes(x_bytes)
            .map_err(|_| Error::Point { context: "SM2 Point", reason: "x not in field" })?;
        let y = FieldElement::from_bytes(y_bytes)
            .map_err(|_| Error::Point { context: "SM2 Point", reason: "y not in field" })?;
        validate::point(Self::is_on_curve(&x, &y), "SM2 Point", "point not on curve")?;
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// The identity (point at infinity)
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// Affine x-coordinate
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    /// Affine y-coordinate
    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    /// Extract x‐coordinate as big‐endian bytes
    pub fn x_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// Extract y‐coordinate as big‐endian bytes
    pub fn y_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Detect serialized point format
    pub fn detect_format(bytes: &[u8]) -> Result<PointFormat> {
        match (bytes.first(), bytes.len()) {
            (Some(0x04), SM2_POINT_UNCOMPRESSED_SIZE) => Ok(PointFormat::Uncompressed),
            (Some(0x02 | 0x03), SM2_POINT_COMPRESSED_SIZE) => Ok(PointFormat::Compressed),
            (None, _) => Err(Error::Point {
                context: "SM2 Point",
                reason: "empty encoding",
            }),
            _ => Err(Error::Point {
                context: "SM2 Point",
                reason: "unknown or malformed format",
            }),
        }
    }

    /// Decode either encoding; the identity has no valid encoding here
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match Self::detect_format(bytes)? {
            PointFormat::Uncompressed => Self::deserialize_uncompressed(bytes),
            PointFormat::Compressed => Self::deserialize_compressed(bytes),
        }
    }

    /// Serialize this point as uncompressed: 0x04 ∥ x ∥ y
    ///
    /// The identity serializes to all zeros, which no decoder accepts.
    pub fn serialize_uncompressed(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = 0x04;
        out[1..1 + SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&self.x.to_bytes());
        out[1 + SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Deserialize from uncompressed bytes (0x04 ∥ x ∥ y)
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 Point", bytes.len(), SM2_POINT_UNCOMPRESSED_SIZE)?;
        validate::point(bytes[0] == 0x04, "SM2 Point", "invalid prefix for uncompressed")?;
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        let mut yb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..1 + SM2_FIELD_ELEMENT_SIZE]);
        yb.copy_from_slice(&bytes[1 + SM2_FIELD_ELEMENT_SIZE..]);
        Self::new_uncompressed(&xb, &yb)
    }

    /// Serialize this point in compressed form: 0x02/0x03 ∥ x
    pub fn serialize_compressed(&self) -> [u8; SM2_POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_COMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Deserialize from compressed bytes (0x02/0x03 ∥ x)
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length("SM2 Compressed Point", bytes.len(), SM2_POINT_COMPRESSED_SIZE)?;
        let tag = bytes[0];
        validate::point(tag == 0x02 || tag == 0x03, "SM2 Point", "invalid compressed prefix")?;

        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..]);
        let x = FieldElement::from_bytes(&xb)
            .map_err(|_| Error::Point { context: "SM2 Point", reason: "x not in field" })?;

        let y = Self::curve_rhs(&x).sqrt().ok_or(Error::Point {
            context: "SM2 Point",
            reason: "x is not the abscissa of a curve point",
        })?;
        let want_odd = tag == 0x03;
        let y = if y.is_odd() == want_odd { y } else { y.negate() };

        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// x³ + ax + b
    fn curve_rhs(x: &FieldElement) -> FieldElement {
        let x3 = x.square().mul(x);
        x3.add(&FieldElement::a().mul(x)).add(&FieldElement::b())
    }

    /// Check that (x, y) satisfies y² = x³ + ax + b
    pub fn is_on_curve(x: &FieldElement, y: &FieldElement) -> bool {
        y.square() == Self::curve_rhs(x)
    }

    /// Whether this point is the identity or lies on the curve
    pub fn is_valid(&self) -> bool {
        self.is_identity() || Self::is_on_curve(&self.x, &self.y)
    }

    /// −P
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        Point {
            is_identity: Choice::from(0),
            x: self.x,
            y: self.y.negate(),
        }
    }

    /// Add two points with the affine group law
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }
        if self.x == other.x {
            if self.y == other.y.negate() {
                return Self::identity();
            }
            return self.double();
        }

        // λ = (y₂ − y₁) / (x₂ − x₁)
        let dx = match other.x.sub(&self.x).invert() {
            Ok(v) => v,
            Err(_) => return Self::identity(),
        };
        let lambda = other.y.sub(&self.y).mul(&dx);
        self.chord_result(&lambda, &other.x)
    }

    /// Double this point: 2P
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }

        // λ = (3x² + a) / 2y
        let x2 = self.x.square();
        let num = x2.double().add(&x2).add(&FieldElement::a());
        let inv = match self.y.double().invert() {
            Ok(v) => v,
            Err(_) => return Self::identity(),
        };
        let lambda = num.mul(&inv);
        self.chord_result(&lambda, &self.x)
    }

    /// x₃ = λ² − x₁ − x₂, y₃ = λ(x₁ − x₃) − y₁
    fn chord_result(&self, lambda: &FieldElement, x2: &FieldElement) -> Self {
        let x3 = lambda.square().sub(&self.x).sub(x2);
        let y3 = lambda.mul(&self.x.sub(&x3)).sub(&self.y);
        Point {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
        }
    }

    /// Scalar multiplication: scalar · P
    ///
    /// Montgomery ladder over Jacobian coordinates. Every bit of the scalar
    /// costs one addition and one doubling, and the ladder registers are
    /// exchanged with conditional swaps rather than branches.
    pub fn mul(&self, scalar: &Scalar) -> Self {
        self.mul_u256(scalar.as_u256())
    }

    pub(crate) fn mul_u256(&self, k: &U256) -> Self {
        let mut r0 = ProjectivePoint::identity();
        let mut r1 = self.to_projective();
        let mut swap = Choice::from(0);

        for i in (0..U256::BITS).rev() {
            let bit = Choice::from(k.bit(i) as u8);
            ProjectivePoint::conditional_swap(&mut r0, &mut r1, swap ^ bit);
            swap = bit;
            r1 = r0.add(&r1);
            r0 = r0.double();
        }
        ProjectivePoint::conditional_swap(&mut r0, &mut r1, swap);

        r0.to_affine()
    }

    /// Convert affine to Jacobian for intermediate computations
    pub(crate) fn to_projective(&self) -> ProjectivePoint {
        if self.is_identity() {
            ProjectivePoint::identity()
        } else {
            ProjectivePoint {
                x: self.x,
                y: self.y,
                z: FieldElement::one(),
            }
        }
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ProjectivePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ProjectivePoint {
    /// Identity in Jacobian form: (1 : 1 : 0)
    pub fn identity() -> Self {
        ProjectivePoint {
            x: FieldElement::one(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Jacobian point addition
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }

        let z1_sq = self.z.square();
        let z2_sq = other.z.square();
        let z1_cu = z1_sq.mul(&self.z);
        let z2_cu = z2_sq.mul(&other.z);

        let u1 = self.x.mul(&z2_sq); // X₁·Z₂²
        let u2 = other.x.mul(&z1_sq); // X₂·Z₁²
        let s1 = self.y.mul(&z2_cu); // Y₁·Z₂³
        let s2 = other.y.mul(&z1_cu); // Y₂·Z₁³

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double();
            }
            return ProjectivePoint::identity();
        }

        let h2 = h.square();
        let h3 = h2.mul(&h);
        let v = u1.mul(&h2);

        // X₃ = r² − h³ − 2v
        let x3 = r.square().sub(&h3).sub(&v.double());
        // Y₃ = r·(v − X₃) − S₁·h³
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&h3));
        // Z₃ = Z₁·Z₂·h
        let z3 = self.z.mul(&other.z).mul(&h);

        ProjectivePoint { x: x3, y: y3, z: z3 }
    }

    /// Jacobian doubling, specialised to a = −3
    ///
    /// A point with Y = 0 or Z = 0 maps to Z₃ = 0, the identity.
    pub fn double(&self) -> Self {
        //   δ = Z², γ = Y², β = X·γ, α = 3·(X − δ)·(X + δ)
        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = self.x.mul(&gamma);
        let t = self.x.sub(&delta).mul(&self.x.add(&delta));
        let alpha = t.double().add(&t);

        // X₃ = α² − 8β
        let four_beta = beta.double().double();
        let x3 = alpha.square().sub(&four_beta.double());

        // Z₃ = (Y + Z)² − γ − δ
        let z3 = self.y.add(&self.z).square().sub(&gamma).sub(&delta);

        // Y₃ = α·(4β − X₃) − 8γ²
        let eight_gamma_sq = gamma.square().double().double().double();
        let y3 = alpha.mul(&four_beta.sub(&x3)).sub(&eight_gamma_sq);

        ProjectivePoint { x: x3, y: y3, z: z3 }
    }

    /// Convert Jacobian back to affine coordinates
    pub fn to_affine(&self) -> Point {
        let z_inv = match self.z.invert() {
            Ok(v) => v,
            Err(_) => return Point::identity(),
        };
        let z_inv_sq = z_inv.square();
        let z_inv_cu = z_inv_sq.mul(&z_inv);
        Point {
            is_identity: Choice::from(0),
            x: self.x.mul(&z_inv_sq),
            y: self.y.mul(&z_inv_cu),
        }
    }
}
