//! Spherical linear interpolation and random rotations

use std::f64::consts::TAU;
use std::iter::FusedIterator;
use std::ops::Range;

use rand::Rng;

use crate::Quaternion;

impl Quaternion {
    /// Spherical linear interpolation between two rotations.
    ///
    /// `amount` is clamped to `[0, 1]`. Both endpoints are (fast-)normalized
    /// copies; the result is `((q1 · q0⁻¹)^amount) · q0`.
    pub fn slerp(mut q0: Quaternion, mut q1: Quaternion, amount: f64) -> Quaternion {
        q0.fast_normalize();
        q1.fast_normalize();
        let amount = amount.clamp(0.0, 1.0);

        (q1 * q0.inverse()).powf(amount) * q0
    }

    /// `n` rotations evenly spaced strictly between `q0` and `q1`, at
    /// fractions `k / (n + 1)`.
    ///
    /// With `include_endpoints`, `q0` comes first and `q1` last, for `n + 2`
    /// values in total. That count saturates at `usize::MAX`.
    pub fn intermediates(
        q0: Quaternion,
        q1: Quaternion,
        n: usize,
        include_endpoints: bool,
    ) -> Intermediates {
        let (count, offset) = if include_endpoints {
            (n.saturating_add(2), 0.0)
        } else {
            (n, 1.0)
        };
        Intermediates {
            q0,
            q1,
            offset,
            step_size: 1.0 / (n as f64 + 1.0),
            steps: 0..count,
        }
    }

    /// Random unit quaternion, uniformly distributed over all rotations
    pub fn random() -> Self {
        Self::random_with(&mut rand::rng())
    }

    /// [`Quaternion::random`] drawing from the given generator
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        let (sin2, cos2) = (TAU * r2).sin_cos();
        let (sin3, cos3) = (TAU * r3).sin_cos();
        let a = (1.0 - r1).sqrt();
        let b = r1.sqrt();

        Self::new(a * sin2, a * cos2, b * sin3, b * cos3)
    }
}

/// Iterator returned by [`Quaternion::intermediates`].
///
/// Each rotation is computed on demand; once exhausted it stays exhausted.
#[derive(Clone, Debug)]
pub struct Intermediates {
    q0: Quaternion,
    q1: Quaternion,
    /// Added to each step index before scaling; 1 skips `q0`
    offset: f64,
    step_size: f64,
    steps: Range<usize>,
}

impl Iterator for Intermediates {
    type Item = Quaternion;

    fn next(&mut self) -> Option<Quaternion> {
        self.steps
            .next()
            .map(|step| Quaternion::slerp(self.q0, self.q1, (step as f64 + self.offset) * self.step_size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.steps.size_hint()
    }
}

impl ExactSizeIterator for Intermediates {}

impl FusedIterator for Intermediates {}
