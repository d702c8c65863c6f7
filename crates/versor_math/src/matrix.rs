//! Fixed-size 3x3 and 4x4 matrix utilities
//!
//! Matrices are stored row-major: `m[row][col]`. Only the handful of
//! operations needed for rotation conversion are provided.

use crate::{QuaternionError, Vec3};

/// 3x3 matrix type (row-major)
pub type Mat3 = [[f64; 3]; 3];

/// 4x4 matrix type (row-major)
pub type Mat4 = [[f64; 4]; 4];

/// 3x3 identity matrix
pub const IDENTITY3: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// 4x4 identity matrix
pub const IDENTITY4: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Relative tolerance used when validating rotation matrices
pub const MATRIX_RTOL: f64 = 1e-5;
/// Absolute tolerance used when validating rotation matrices
pub const MATRIX_ATOL: f64 = 1e-8;

/// `|a - b| <= atol + rtol * |b|`
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= MATRIX_ATOL + MATRIX_RTOL * b.abs()
}

/// Multiply two 3x3 matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul3(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut result = [[0.0f64; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    result
}

/// Multiply two 4x4 matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul4(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut result = [[0.0f64; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    result
}

/// Multiply a 4x4 matrix by a 4-vector: result = m * v
pub fn transform4(m: &Mat4, v: [f64; 4]) -> [f64; 4] {
    let mut result = [0.0f64; 4];
    for (out, row) in result.iter_mut().zip(m.iter()) {
        *out = row[0] * v[0] + row[1] * v[1] + row[2] * v[2] + row[3] * v[3];
    }
    result
}

/// Transform a Vec3 by a 3x3 matrix: result = m * v
pub fn transform3(m: &Mat3, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

/// Transpose a 3x3 matrix
pub fn transpose3(m: &Mat3) -> Mat3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Transpose a 4x4 matrix
pub fn transpose4(m: &Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Determinant of a 3x3 matrix
pub fn determinant3(m: &Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Check that `m * mᵀ` is the identity within the matrix tolerances
pub fn is_orthogonal(m: &Mat3) -> bool {
    let product = mul3(m, &transpose3(m));
    product
        .iter()
        .zip(IDENTITY3.iter())
        .all(|(row, id_row)| row.iter().zip(id_row.iter()).all(|(&a, &b)| is_close(a, b)))
}

/// Check that the determinant is +1 within the matrix tolerances
pub fn is_proper(m: &Mat3) -> bool {
    is_close(determinant3(m), 1.0)
}

/// Upper-left 3x3 block of a 4x4 matrix
pub fn upper_left(m: &Mat4) -> Mat3 {
    [
        [m[0][0], m[0][1], m[0][2]],
        [m[1][0], m[1][1], m[1][2]],
        [m[2][0], m[2][1], m[2][2]],
    ]
}

/// Bottom-right 3x3 block of a 4x4 matrix
pub fn lower_right(m: &Mat4) -> Mat3 {
    [
        [m[1][1], m[1][2], m[1][3]],
        [m[2][1], m[2][2], m[2][3]],
        [m[3][1], m[3][2], m[3][3]],
    ]
}

/// Embed a 3x3 matrix as the upper-left block of a homogeneous 4x4 transform
/// with zero translation
pub fn homogeneous(m: &Mat3) -> Mat4 {
    let mut result = IDENTITY4;
    for i in 0..3 {
        for j in 0..3 {
            result[i][j] = m[i][j];
        }
    }
    result
}

/// Build a 3x3 matrix from dynamically sized rows.
///
/// Accepts a 3x3 matrix or a 4x4 homogeneous transform (whose upper-left
/// block is used). Any other shape is a value error.
pub fn from_rows(rows: &[Vec<f64>]) -> Result<Mat3, QuaternionError> {
    let n = rows.len();
    if (n != 3 && n != 4) || rows.iter().any(|row| row.len() != n) {
        return Err(QuaternionError::Value(
            "Invalid matrix shape: input must be a 3x3 or 4x4 matrix".to_string(),
        ));
    }

    let mut m = [[0.0f64; 3]; 3];
    for (i, row) in m.iter_mut().enumerate() {
        row.copy_from_slice(&rows[i][..3]);
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn mat_approx_eq(a: &Mat3, b: &Mat3) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    fn z_rotation(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
    }

    #[test]
    fn test_mul_identity() {
        let a = z_rotation(0.7);
        assert!(mat_approx_eq(&mul3(&IDENTITY3, &a), &a));
        assert!(mat_approx_eq(&mul3(&a, &IDENTITY3), &a));
    }

    #[test]
    fn test_mul_composition() {
        use std::f64::consts::FRAC_PI_4;

        // Two 45° rotations should equal one 90° rotation
        let composed = mul3(&z_rotation(FRAC_PI_4), &z_rotation(FRAC_PI_4));
        assert!(mat_approx_eq(&composed, &z_rotation(2.0 * FRAC_PI_4)));
    }

    #[test]
    fn test_transform3() {
        use std::f64::consts::FRAC_PI_2;

        let m = z_rotation(FRAC_PI_2);
        let result = transform3(&m, Vec3::X);
        assert!(approx_eq(result.x, 0.0) && approx_eq(result.y, 1.0) && approx_eq(result.z, 0.0),
            "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_mul4_matches_transpose_rule() {
        let a = homogeneous(&z_rotation(0.3));
        let b = homogeneous(&z_rotation(-1.1));
        // (ab)ᵀ = bᵀaᵀ
        let lhs = transpose4(&mul4(&a, &b));
        let rhs = mul4(&transpose4(&b), &transpose4(&a));
        assert!(mat_approx_eq(&upper_left(&lhs), &upper_left(&rhs)));
    }

    #[test]
    fn test_determinant() {
        assert!(approx_eq(determinant3(&IDENTITY3), 1.0));
        assert!(approx_eq(determinant3(&z_rotation(1.234)), 1.0));

        let reflection = [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(approx_eq(determinant3(&reflection), -1.0));
    }

    #[test]
    fn test_orthogonal_and_proper() {
        let r = z_rotation(2.0);
        assert!(is_orthogonal(&r));
        assert!(is_proper(&r));

        let reflection = [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(is_orthogonal(&reflection));
        assert!(!is_proper(&reflection));

        let shear = [[1.0, 0.5, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(!is_orthogonal(&shear));
    }

    #[test]
    fn test_blocks() {
        let r = z_rotation(0.5);
        let h = homogeneous(&r);
        assert!(mat_approx_eq(&upper_left(&h), &r));
        assert_eq!(h[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(h[0][3], 0.0);

        let shifted: Mat4 = [
            [9.0, 9.0, 9.0, 9.0],
            [9.0, 1.0, 2.0, 3.0],
            [9.0, 4.0, 5.0, 6.0],
            [9.0, 7.0, 8.0, 0.5],
        ];
        assert_eq!(lower_right(&shifted), [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 0.5]]);
    }

    #[test]
    fn test_transform4() {
        let h = homogeneous(&IDENTITY3);
        assert_eq!(transform4(&h, [1.0, 2.0, 3.0, 4.0]), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec![1.0, 0.0, 0.0, 5.0],
            vec![0.0, 1.0, 0.0, 6.0],
            vec![0.0, 0.0, 1.0, 7.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ];
        assert_eq!(from_rows(&rows).unwrap(), IDENTITY3);

        let bad = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(from_rows(&bad), Err(QuaternionError::Value(_))));

        let ragged = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0, 1.0]];
        assert!(matches!(from_rows(&ragged), Err(QuaternionError::Value(_))));
    }
}
