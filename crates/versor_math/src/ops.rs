//! Arithmetic operators for [`Quaternion`]
//!
//! Bare reals on either side of an operator are promoted to `(r, 0, 0, 0)`.
//! Multiplication is the Hamilton product and does not commute.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::matrix::transform4;
use crate::{Quaternion, QuaternionError};

impl Quaternion {
    /// Hamilton product `self * other`, computed as `L(self) · other`
    #[inline]
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from_array(transform4(&self.q_matrix(), other.elements()))
    }

    /// `self * divisor⁻¹`, failing when the divisor is zero
    pub fn divide(&self, divisor: &Self) -> Result<Self, QuaternionError> {
        if divisor.is_zero() {
            return Err(QuaternionError::DivisionByZero(
                "Quaternion divisor must be non-zero".to_string(),
            ));
        }
        Ok(self.multiply(&divisor.inverse()))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let a = self.elements();
        let b = other.elements();
        Self::new(f(a[0], b[0]), f(a[1], b[1]), f(a[2], b[2]), f(a[3], b[3]))
    }
}

impl Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::from_array(self.elements().map(|c| -c))
    }
}

impl Add for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a + b)
    }
}

impl Add<f64> for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, r: f64) -> Self {
        self + Quaternion::from_scalar(r)
    }
}

impl Add<Quaternion> for f64 {
    type Output = Quaternion;
    #[inline]
    fn add(self, q: Quaternion) -> Quaternion {
        q + self
    }
}

impl Sub for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        self.zip_with(&other, |a, b| a - b)
    }
}

impl Sub<f64> for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, r: f64) -> Self {
        self - Quaternion::from_scalar(r)
    }
}

impl Sub<Quaternion> for f64 {
    type Output = Quaternion;
    #[inline]
    fn sub(self, q: Quaternion) -> Quaternion {
        Quaternion::from_scalar(self) - q
    }
}

impl Mul for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, other: Self) -> Self {
        self.multiply(&other)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, r: f64) -> Self {
        self.multiply(&Quaternion::from_scalar(r))
    }
}

impl Mul<Quaternion> for f64 {
    type Output = Quaternion;
    #[inline]
    fn mul(self, q: Quaternion) -> Quaternion {
        Quaternion::from_scalar(self).multiply(&q)
    }
}

/// # Panics
///
/// Panics if the divisor is zero, like integer division. Use
/// [`Quaternion::divide`] to get an error instead.
impl Div for Quaternion {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        match self.divide(&other) {
            Ok(q) => q,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Div<f64> for Quaternion {
    type Output = Self;
    fn div(self, r: f64) -> Self {
        self / Quaternion::from_scalar(r)
    }
}

/// `r / q` is `r · q⁻¹`
impl Div<Quaternion> for f64 {
    type Output = Quaternion;
    fn div(self, q: Quaternion) -> Quaternion {
        Quaternion::from_scalar(self) / q
    }
}

impl AddAssign for Quaternion {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl AddAssign<f64> for Quaternion {
    #[inline]
    fn add_assign(&mut self, r: f64) {
        *self = *self + r;
    }
}

impl SubAssign for Quaternion {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl SubAssign<f64> for Quaternion {
    #[inline]
    fn sub_assign(&mut self, r: f64) {
        *self = *self - r;
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl MulAssign<f64> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, r: f64) {
        *self = *self * r;
    }
}

impl DivAssign for Quaternion {
    fn div_assign(&mut self, other: Self) {
        *self = *self / other;
    }
}

impl DivAssign<f64> for Quaternion {
    fn div_assign(&mut self, r: f64) {
        *self = *self / r;
    }
}
