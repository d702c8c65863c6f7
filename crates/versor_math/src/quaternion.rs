//! Quaternion value type
//!
//! A quaternion is stored as four doubles `(w, x, y, z)` where `w` is the
//! scalar part and `(x, y, z)` the vector part. Unit length is not enforced:
//! sums and scalings of rotations are valid values too.
//!
//! Equality is approximate and componentwise:
//! `|a - b| <= EQUALITY_ATOL + EQUALITY_RTOL * |b|` for every component.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::matrix::Mat4;
use crate::{QuaternionError, Vec3};

/// Relative tolerance of quaternion equality
pub const EQUALITY_RTOL: f64 = 1e-13;
/// Absolute tolerance of quaternion equality
pub const EQUALITY_ATOL: f64 = 1e-14;
/// Default tolerance on `|1 - (w² + x² + y² + z²)|` for a unit quaternion
pub const UNIT_TOLERANCE: f64 = 1e-14;

/// Below this distance of the squared magnitude from 1, `(1 + m²) / 2` is
/// used as the magnitude instead of a square root
const PADE_THRESHOLD: f64 = 2.107342e-08;

/// Quaternion `w + xi + yj + zk`
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quaternion {
    q: [f64; 4],
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Validate a sequence that must hold exactly `N` reals.
///
/// An empty slice yields all zeros, a slice of length `N` is copied, and any
/// other length is a value error.
pub(crate) fn fixed_length<const N: usize>(values: &[f64]) -> Result<[f64; N], QuaternionError> {
    match values.len() {
        0 => Ok([0.0; N]),
        len if len == N => {
            let mut out = [0.0; N];
            out.copy_from_slice(values);
            Ok(out)
        }
        len => Err(QuaternionError::Value(format!(
            "Unexpected number of elements in sequence: expected {}, got {}",
            N, len
        ))),
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { q: [1.0, 0.0, 0.0, 0.0] };

    /// Zero quaternion
    pub const ZERO: Self = Self { q: [0.0; 4] };

    /// Create a quaternion from its four components
    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { q: [w, x, y, z] }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Real-valued quaternion `(r, 0, 0, 0)`
    #[inline]
    pub const fn from_scalar(r: f64) -> Self {
        Self::new(r, 0.0, 0.0, 0.0)
    }

    /// Quaternion from its scalar and vector parts
    #[inline]
    pub fn from_scalar_vector(scalar: f64, vector: impl Into<Vec3>) -> Self {
        let v = vector.into();
        Self::new(scalar, v.x, v.y, v.z)
    }

    /// Quaternion from a `(w, x, y, z)` array
    #[inline]
    pub const fn from_array(q: [f64; 4]) -> Self {
        Self { q }
    }

    /// Quaternion from a slice of exactly 4 reals (or an empty slice, giving zero)
    pub fn from_slice(values: &[f64]) -> Result<Self, QuaternionError> {
        fixed_length::<4>(values).map(Self::from_array)
    }

    /// Scalar (real) part
    #[inline]
    pub fn scalar(&self) -> f64 {
        self.q[0]
    }

    /// Same as [`Quaternion::scalar`]
    #[inline]
    pub fn real(&self) -> f64 {
        self.scalar()
    }

    /// Vector (imaginary) part, not necessarily of unit length
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.q[1], self.q[2], self.q[3])
    }

    /// Same as [`Quaternion::vector`]
    #[inline]
    pub fn imaginary(&self) -> Vec3 {
        self.vector()
    }

    /// All four components `(w, x, y, z)`
    #[inline]
    pub fn elements(&self) -> [f64; 4] {
        self.q
    }

    /// Sum of squares of the components (squared norm)
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.q.iter().map(|c| c * c).sum()
    }

    /// Euclidean length of the 4-vector
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Same as [`Quaternion::norm`]
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.norm()
    }

    /// Whether the quaternion has unit length to within `tolerance`.
    ///
    /// Compares the squared norm against 1, so no square root is taken.
    #[inline]
    pub fn is_unit(&self, tolerance: f64) -> bool {
        (1.0 - self.norm_squared()).abs() < tolerance
    }

    /// Whether every component is zero under the equality tolerances
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[inline]
    fn scaled(&self, factor: f64) -> Self {
        Self::from_array(self.q.map(|c| c * factor))
    }

    /// Normalize in place to unit length.
    ///
    /// Quaternions already within [`UNIT_TOLERANCE`] are left untouched.
    pub fn normalize(&mut self) {
        if !self.is_unit(UNIT_TOLERANCE) {
            *self = self.scaled(1.0 / self.norm());
        }
    }

    /// Normalize in place, approximating the magnitude when it is already close to 1
    pub fn fast_normalize(&mut self) {
        if !self.is_unit(UNIT_TOLERANCE) {
            let mag_squared = self.norm_squared();
            let mag = if (1.0 - mag_squared).abs() < PADE_THRESHOLD {
                // Padé approximant of sqrt around 1
                (1.0 + mag_squared) / 2.0
            } else {
                mag_squared.sqrt()
            };
            *self = self.scaled(1.0 / mag);
        }
    }

    /// Unit quaternion (versor) representing the same rotation
    pub fn normalized(&self) -> Self {
        let mut q = *self;
        q.normalize();
        q
    }

    /// Same as [`Quaternion::normalized`]
    pub fn unit(&self) -> Self {
        self.normalized()
    }

    /// Same as [`Quaternion::normalized`]
    pub fn versor(&self) -> Self {
        self.normalized()
    }

    /// Negate the vector part
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.q[0], -self.q[1], -self.q[2], -self.q[3])
    }

    /// Multiplicative inverse `conjugate / |q|²`.
    ///
    /// The zero quaternion has no inverse; its components come out non-finite.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.conjugate().scaled(1.0 / self.norm_squared())
    }

    /// Left multiplication matrix `L(q)`, such that `q * p = L(q) · p`
    pub fn q_matrix(&self) -> Mat4 {
        let [w, x, y, z] = self.q;
        [
            [w, -x, -y, -z],
            [x,  w, -z,  y],
            [y,  z,  w, -x],
            [z, -y,  x,  w],
        ]
    }

    /// Right multiplication matrix `R̄(q)`, such that `p * q = R̄(q) · p`
    pub fn q_bar_matrix(&self) -> Mat4 {
        let [w, x, y, z] = self.q;
        [
            [w, -x, -y, -z],
            [x,  w,  z, -y],
            [y, -z,  w,  x],
            [z,  y, -x,  w],
        ]
    }

    /// Raise to a real power.
    ///
    /// With `q = |q|·(cos θ + n·sin θ)`, `q^t = |q|^t·(cos tθ + n·sin tθ)`.
    /// A real quaternion has no defined `n`. The x axis stands in for it, so a
    /// negative real base (θ = π) keeps `|q^t| = |q|^t`; for a positive real
    /// base `sin tθ` is zero and the choice has no effect.
    pub fn powf(&self, exponent: f64) -> Self {
        let norm = self.norm();
        let vector = self.vector();
        let vector_norm = vector.length();
        let theta = vector_norm.atan2(self.scalar());
        let n = if vector_norm > 0.0 { vector / vector_norm } else { Vec3::X };

        let (sin, cos) = (exponent * theta).sin_cos();
        Self::from_scalar_vector(cos, n * sin).scaled(norm.powf(exponent))
    }

    /// Checked [`Quaternion::powf`], rejecting exponents that are not finite reals
    pub fn power(&self, exponent: f64) -> Result<Self, QuaternionError> {
        if !exponent.is_finite() {
            return Err(QuaternionError::Type(format!(
                "exponent must be a finite real number, got {}",
                exponent
            )));
        }
        Ok(self.powf(exponent))
    }

    /// Componentwise closeness: `|a - b| <= atol + rtol * |b|`
    pub fn is_close(&self, other: &Self, rtol: f64, atol: f64) -> bool {
        self.q
            .iter()
            .zip(other.q.iter())
            .all(|(a, b)| (a - b).abs() <= atol + rtol * b.abs())
    }

    fn resolve_index(index: isize) -> Result<usize, QuaternionError> {
        let resolved = if index < 0 { index + 4 } else { index };
        if (0..4).contains(&resolved) {
            Ok(resolved as usize)
        } else {
            Err(QuaternionError::IndexOutOfRange(index))
        }
    }

    /// Read a component; negative indices count from the end
    pub fn get(&self, index: isize) -> Result<f64, QuaternionError> {
        Ok(self.q[Self::resolve_index(index)?])
    }

    /// Assign a component; negative indices count from the end
    pub fn set(&mut self, index: isize, value: f64) -> Result<(), QuaternionError> {
        self.q[Self::resolve_index(index)?] = value;
        Ok(())
    }

    /// Real part and first imaginary component, as a `(re, im)` complex pair
    pub fn to_complex(&self) -> (f64, f64) {
        (self.q[0], self.q[1])
    }

    /// Real part truncated toward zero
    pub fn to_int(&self) -> i64 {
        self.q[0].trunc() as i64
    }

    /// Raw bytes of the four components
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl From<f64> for Quaternion {
    fn from(r: f64) -> Self {
        Self::from_scalar(r)
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(q: [f64; 4]) -> Self {
        Self::from_array(q)
    }
}

/// The real part, discarding the vector part
impl From<Quaternion> for f64 {
    fn from(q: Quaternion) -> Self {
        q.scalar()
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.q
    }
}

impl TryFrom<&[f64]> for Quaternion {
    type Error = QuaternionError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.is_close(other, EQUALITY_RTOL, EQUALITY_ATOL)
    }
}

impl PartialEq<f64> for Quaternion {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::from_scalar(*other)
    }
}

impl PartialEq<[f64; 4]> for Quaternion {
    fn eq(&self, other: &[f64; 4]) -> bool {
        *self == Self::from_array(*other)
    }
}

impl std::ops::Index<usize> for Quaternion {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.q[index]
    }
}

impl std::ops::IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.q[index]
    }
}

impl fmt::Debug for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, x, y, z] = self.q;
        write!(f, "Quaternion({:?}, {:?}, {:?}, {:?})", w, x, y, z)
    }
}

/// `{}` renders `w.www +x.xxxi +y.yyyj +z.zzzk`. Any explicit precision,
/// sign or width (`{:+.6}`, `{:8.2}`) is applied uniformly to all four
/// components instead.
impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, x, y, z] = self.q;
        if f.precision().is_none() && f.width().is_none() && !f.sign_plus() {
            return write!(f, "{:.3} {:+.3}i {:+.3}j {:+.3}k", w, x, y, z);
        }

        fmt::Display::fmt(&w, f)?;
        f.write_str(" ")?;
        fmt::Display::fmt(&x, f)?;
        f.write_str("i ")?;
        fmt::Display::fmt(&y, f)?;
        f.write_str("j ")?;
        fmt::Display::fmt(&z, f)?;
        f.write_str("k")
    }
}

impl fmt::LowerExp for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w, x, y, z] = self.q;
        fmt::LowerExp::fmt(&w, f)?;
        f.write_str(" ")?;
        fmt::LowerExp::fmt(&x, f)?;
        f.write_str("i ")?;
        fmt::LowerExp::fmt(&y, f)?;
        f.write_str("j ")?;
        fmt::LowerExp::fmt(&z, f)?;
        f.write_str("k")
    }
}
