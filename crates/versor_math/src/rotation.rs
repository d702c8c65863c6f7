//! Rotation-domain operations on unit quaternions
//!
//! A unit quaternion `(cos θ/2, n·sin θ/2)` rotates by θ about the unit axis
//! `n`. `q` and `-q` describe the same rotation.
//!
//! Every accessor here reads a normalized copy of the receiver and leaves the
//! receiver itself unchanged.

use std::f64::consts::{PI, TAU};

use crate::matrix::{self, Mat3, Mat4};
use crate::quaternion::fixed_length;
use crate::{Quaternion, QuaternionError, Vec3};

/// Below this squared-length error an axis is used as given
const AXIS_UNIT_TOLERANCE: f64 = 1e-12;

/// Vector parts shorter than this have no meaningful axis
const UNDEFINED_AXIS_TOLERANCE: f64 = 1e-17;

/// Wrap an angle into `(-π, π]`.
///
/// Odd multiples of π map to `+π`.
pub fn wrap_angle(theta: f64) -> f64 {
    let result = (theta + PI).rem_euclid(TAU) - PI;
    if result == -PI {
        PI
    } else {
        result
    }
}

/// Values a quaternion can rotate, returned in the shape they came in
pub trait Rotatable: Sized {
    fn rotated_by(self, rotation: &Quaternion) -> Self;
}

impl Rotatable for Quaternion {
    /// The full similarity transform `q p q*`, vector part not extracted
    fn rotated_by(self, rotation: &Quaternion) -> Self {
        let unit = rotation.normalized();
        unit * self * unit.conjugate()
    }
}

impl Rotatable for Vec3 {
    fn rotated_by(self, rotation: &Quaternion) -> Self {
        Quaternion::from_scalar_vector(0.0, self).rotated_by(rotation).vector()
    }
}

impl Rotatable for [f64; 3] {
    fn rotated_by(self, rotation: &Quaternion) -> Self {
        Vec3::from(self).rotated_by(rotation).to_array()
    }
}

impl Rotatable for (f64, f64, f64) {
    fn rotated_by(self, rotation: &Quaternion) -> Self {
        let v = Vec3::new(self.0, self.1, self.2).rotated_by(rotation);
        (v.x, v.y, v.z)
    }
}

impl Quaternion {
    /// Rotation by `angle` radians about `axis`.
    ///
    /// The axis is rescaled to unit length unless it already is (to within
    /// 1e-12 on the squared length). A zero axis describes no rotation and is
    /// rejected.
    pub fn from_axis_angle(axis: impl Into<Vec3>, angle: f64) -> Result<Self, QuaternionError> {
        let mut axis = axis.into();
        let mag_sq = axis.length_squared();
        if mag_sq == 0.0 {
            return Err(QuaternionError::DivisionByZero(
                "Provided rotation axis has no length".to_string(),
            ));
        }
        if (1.0 - mag_sq).abs() > AXIS_UNIT_TOLERANCE {
            axis = axis / mag_sq.sqrt();
        }

        let (sin, cos) = (angle / 2.0).sin_cos();
        Ok(Self::from_scalar_vector(cos, axis * sin))
    }

    /// Quaternion of a 3x3 rotation matrix.
    ///
    /// The matrix must be orthogonal with determinant +1; anything else is a
    /// value error. No projection onto the nearest rotation is attempted.
    pub fn from_rotation_matrix(m: &Mat3) -> Result<Self, QuaternionError> {
        if !matrix::is_orthogonal(m) {
            log::debug!("Rejected non-orthogonal matrix {:?}", m);
            return Err(QuaternionError::Value(
                "Matrix must be orthogonal, i.e. its transpose should be its inverse".to_string(),
            ));
        }
        if !matrix::is_proper(m) {
            log::debug!("Rejected improper matrix {:?} (det = {})", m, matrix::determinant3(m));
            return Err(QuaternionError::Value(
                "Matrix must be special orthogonal, i.e. its determinant must be +1.0".to_string(),
            ));
        }

        Ok(Self::from_array(trace_method(&matrix::transpose3(m))))
    }

    /// Quaternion of the rotation block of a 4x4 homogeneous transform
    pub fn from_transformation_matrix(m: &Mat4) -> Result<Self, QuaternionError> {
        Self::from_rotation_matrix(&matrix::upper_left(m))
    }

    /// Unit rotation axis, or the zero vector when the axis is undefined
    /// (identity rotation)
    pub fn axis(&self) -> Vec3 {
        self.axis_or(Vec3::ZERO)
    }

    /// Unit rotation axis, or `undefined` when the vector part is too short
    /// to define one
    pub fn axis_or(&self, undefined: Vec3) -> Vec3 {
        let vector = self.normalized().vector();
        let norm = vector.length();
        if norm < UNDEFINED_AXIS_TOLERANCE {
            log::trace!("Rotation axis of {:?} is undefined, using {:?}", self, undefined);
            undefined
        } else {
            vector / norm
        }
    }

    /// Rotation angle in radians, wrapped into `(-π, π]`
    pub fn angle(&self) -> f64 {
        let unit = self.normalized();
        wrap_angle(2.0 * unit.vector().length().atan2(unit.scalar()))
    }

    /// Rotate a vector (or a pure quaternion) by this rotation.
    ///
    /// The result has the same type as the input.
    pub fn rotate<V: Rotatable>(&self, v: V) -> V {
        v.rotated_by(self)
    }

    /// Rotate a vector given as a plain list of three reals.
    ///
    /// An empty list is the zero vector; any other length than three is a
    /// value error.
    pub fn rotate_slice(&self, v: &[f64]) -> Result<Vec<f64>, QuaternionError> {
        let v: [f64; 3] = fixed_length::<3>(v)?;
        Ok(self.rotate(v).to_vec())
    }

    /// 3x3 rotation matrix, for column vectors (`v' = R v`)
    pub fn rotation_matrix(&self) -> Mat3 {
        let unit = self.normalized();
        let product = matrix::mul4(&unit.q_matrix(), &matrix::transpose4(&unit.q_bar_matrix()));
        matrix::lower_right(&product)
    }

    /// 4x4 homogeneous transform with this rotation and zero translation
    pub fn transformation_matrix(&self) -> Mat4 {
        matrix::homogeneous(&self.rotation_matrix())
    }
}

/// Matrix-to-quaternion conversion for a row-vector convention matrix `m`.
///
/// The branch is chosen on the diagonal so that `t` stays well away from
/// zero, avoiding cancellation.
fn trace_method(m: &Mat3) -> [f64; 4] {
    let (t, q) = if m[2][2] < 0.0 {
        if m[0][0] > m[1][1] {
            let t = 1.0 + m[0][0] - m[1][1] - m[2][2];
            (t, [m[1][2] - m[2][1], t, m[0][1] + m[1][0], m[2][0] + m[0][2]])
        } else {
            let t = 1.0 - m[0][0] + m[1][1] - m[2][2];
            (t, [m[2][0] - m[0][2], m[0][1] + m[1][0], t, m[1][2] + m[2][1]])
        }
    } else if m[0][0] < -m[1][1] {
        let t = 1.0 - m[0][0] - m[1][1] + m[2][2];
        (t, [m[0][1] - m[1][0], m[2][0] + m[0][2], m[1][2] + m[2][1], t])
    } else {
        let t = 1.0 + m[0][0] + m[1][1] + m[2][2];
        (t, [t, m[1][2] - m[2][1], m[2][0] - m[0][2], m[0][1] - m[1][0]])
    };

    let scale = 0.5 / t.sqrt();
    q.map(|c| c * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f64 = 1e-14;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn same_rotation(a: Quaternion, b: Quaternion) -> bool {
        a == b || a == -b
    }

    #[test]
    fn test_wrap_angle() {
        assert!(approx_eq(wrap_angle(0.5), 0.5));
        assert!(approx_eq(wrap_angle(-0.5), -0.5));
        assert!(approx_eq(wrap_angle(3.0 * FRAC_PI_2), -FRAC_PI_2));
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
    }

    #[test]
    fn test_from_axis_angle() {
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let s = FRAC_PI_4.sin();
        assert_eq!(q, Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, s));
        assert!(approx_eq(q.norm(), 1.0));
    }

    #[test]
    fn test_from_axis_angle_normalizes_axis() {
        let a = Quaternion::from_axis_angle([0.0, 0.0, 7.5], 1.2).unwrap();
        let b = Quaternion::from_axis_angle([0.0, 0.0, 1.0], 1.2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_axis_angle_zero_axis() {
        let result = Quaternion::from_axis_angle(Vec3::ZERO, 1.0);
        assert!(matches!(result, Err(QuaternionError::DivisionByZero(_))));
    }

    #[test]
    fn test_rotate_basis() {
        let x = Vec3::X;
        let y = Vec3::Y;
        let z = Vec3::Z;

        let q1 = Quaternion::from_axis_angle(x, PI).unwrap();
        let q2 = Quaternion::from_axis_angle(z, FRAC_PI_2).unwrap();
        let q3 = Quaternion::from_axis_angle(y, -FRAC_PI_2).unwrap();

        assert!(vec_approx_eq(q1.rotate(z), -z));
        assert!(vec_approx_eq(q1.rotate(y), -y));
        assert!(vec_approx_eq(q1.rotate(x), x));
        assert!(vec_approx_eq(q2.rotate(-x), -y));
        assert!(vec_approx_eq(q2.rotate(y), -x));
        assert!(vec_approx_eq(q2.rotate(z), z));
        assert!(vec_approx_eq(q3.rotate(-z), x));
        assert!(vec_approx_eq(q3.rotate(x), z));
        assert!(vec_approx_eq(q3.rotate(y), y));

        assert!(vec_approx_eq(q1.rotate(z * 2.3), z * -2.3));
    }

    #[test]
    fn test_rotate_keeps_container_shape() {
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();

        let array: [f64; 3] = q.rotate([1.0, 0.0, 0.0]);
        assert!(approx_eq(array[0], 0.0) && approx_eq(array[1], 1.0) && approx_eq(array[2], 0.0));

        let tuple: (f64, f64, f64) = q.rotate((0.0, 1.0, 0.0));
        assert!(approx_eq(tuple.0, -1.0) && approx_eq(tuple.1, 0.0) && approx_eq(tuple.2, 0.0));

        let list = q.rotate_slice(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(list.len(), 3);
        assert!(approx_eq(list[0], 0.0) && approx_eq(list[1], 1.0) && approx_eq(list[2], 0.0));
        assert_eq!(q.rotate_slice(&[]).unwrap(), vec![0.0, 0.0, 0.0]);
        assert!(matches!(q.rotate_slice(&[1.0, 2.0]), Err(QuaternionError::Value(_))));
        assert!(matches!(q.rotate_slice(&[1.0, 2.0, 3.0, 4.0]), Err(QuaternionError::Value(_))));

        // A quaternion input gets the whole similarity transform back
        let pure = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        assert_eq!(q.rotate(pure), Quaternion::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rotate_ignores_receiver_scale() {
        let q = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        let scaled = q * 3.0;
        assert!(vec_approx_eq(scaled.rotate(Vec3::X), q.rotate(Vec3::X)));
        // Receiver is not normalized in place
        assert!(approx_eq(scaled.norm(), 3.0));
    }

    #[test]
    fn test_rotation_matrix_formula() {
        let q = Quaternion::new(0.5, -0.5, 0.5, 0.5);
        let [a, b, c, d] = q.elements();
        let expected = [
            [a * a + b * b - c * c - d * d, 2.0 * (b * c - a * d), 2.0 * (a * c + b * d)],
            [2.0 * (b * c + a * d), a * a - b * b + c * c - d * d, 2.0 * (c * d - a * b)],
            [2.0 * (b * d - a * c), 2.0 * (a * b + c * d), a * a - b * b - c * c + d * d],
        ];

        let r = q.rotation_matrix();
        for i in 0..3 {
            for j in 0..3 {
                assert!(approx_eq(r[i][j], expected[i][j]), "R[{}][{}] = {}", i, j, r[i][j]);
            }
        }

        let t = q.transformation_matrix();
        assert_eq!(t[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!([t[0][3], t[1][3], t[2][3]], [0.0, 0.0, 0.0]);
        assert_eq!(matrix::upper_left(&t), r);
    }

    #[test]
    fn test_rotation_matrix_matches_rotate() {
        let q = Quaternion::from_axis_angle([0.3, -1.0, 0.4], 2.1).unwrap();
        let v = Vec3::new(1.5, -0.25, 4.0);
        let by_matrix = matrix::transform3(&q.rotation_matrix(), v);
        let by_quaternion = q.rotate(v);
        assert!((by_matrix - by_quaternion).length() < 1e-13);
    }

    #[test]
    fn test_from_rotation_matrix_quarter_turn() {
        let m = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let q = Quaternion::from_rotation_matrix(&m).unwrap();
        let expected = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2).unwrap();
        assert!(same_rotation(q, expected), "got {:?}", q);
    }

    #[test]
    fn test_from_rotation_matrix_round_trip_all_branches() {
        // Cover each diagonal branch of the trace method
        let rotations = [
            Quaternion::from_axis_angle([1.0, 0.0, 0.0], 3.0).unwrap(),
            Quaternion::from_axis_angle([0.0, 1.0, 0.0], 3.0).unwrap(),
            Quaternion::from_axis_angle([0.0, 0.0, 1.0], 3.0).unwrap(),
            Quaternion::from_axis_angle([0.2, -0.4, 0.9], 0.7).unwrap(),
        ];
        for q in rotations {
            let back = Quaternion::from_rotation_matrix(&q.rotation_matrix()).unwrap();
            assert!(same_rotation(back, q), "{:?} came back as {:?}", q, back);

            let from_transform = Quaternion::from_transformation_matrix(&q.transformation_matrix()).unwrap();
            assert!(same_rotation(from_transform, q));
        }
    }

    #[test]
    fn test_from_rotation_matrix_rejects_non_rotations() {
        let shear = [[1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(matches!(Quaternion::from_rotation_matrix(&shear), Err(QuaternionError::Value(_))));

        let reflection = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, -1.0]];
        assert!(matches!(
            Quaternion::from_rotation_matrix(&reflection),
            Err(QuaternionError::Value(_))
        ));
    }

    #[test]
    fn test_axis_and_angle() {
        let q = Quaternion::from_axis_angle([1.0, 0.0, 0.0], FRAC_PI_2).unwrap();
        assert!(vec_approx_eq(q.axis(), Vec3::X));
        assert!(approx_eq(q.angle(), FRAC_PI_2));

        let negative = Quaternion::from_axis_angle([1.0, 0.0, 0.0], -1.0).unwrap();
        assert!(vec_approx_eq(negative.axis(), -Vec3::X));
        assert!(approx_eq(negative.angle(), 1.0));
    }

    #[test]
    fn test_angle_wraps_past_pi() {
        let q = Quaternion::from_axis_angle(Vec3::Z, 1.5 * PI).unwrap();
        assert!((q.angle() + FRAC_PI_2).abs() < 1e-12, "angle = {}", q.angle());
    }

    #[test]
    fn test_axis_undefined_for_identity() {
        assert_eq!(Quaternion::IDENTITY.axis(), Vec3::ZERO);
        assert_eq!(Quaternion::IDENTITY.axis_or(Vec3::Y), Vec3::Y);
        assert_eq!(Quaternion::IDENTITY.angle(), 0.0);
    }

    #[test]
    fn test_accessors_leave_receiver_unchanged() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 2.0);
        let _ = q.axis();
        let _ = q.angle();
        let _ = q.rotation_matrix();
        assert_eq!(q, Quaternion::new(2.0, 0.0, 0.0, 2.0));
        assert!(vec_approx_eq(q.axis(), Vec3::Z));
        assert!(approx_eq(q.angle(), FRAC_PI_2));
    }
}
