//! 4×4 matrix value type and the arithmetic the matrix stacks are built on.
//!
//! Matrices are column-major: `m[col][row]` in GL terms is `mat[(row, col)]`
//! in nalgebra terms, and both store the same 16 floats in the same order.

use nalgebra::{Matrix4, Vector3, Vector4};

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// The 4×4 identity matrix.
pub fn identity() -> Mat4 {
    Mat4::identity()
}

/// Multiply a matrix by a column vector: `d[row] = Σ m[col][row] * v[col]`.
pub fn multiply(m: &Mat4, v: &Vec4) -> Vec4 {
    let mut d = Vec4::zeros();
    for row in 0..4 {
        d[row] = m[(row, 0)] * v[0] + m[(row, 1)] * v[1] + m[(row, 2)] * v[2] + m[(row, 3)] * v[3];
    }
    d
}

/// Multiply a direction by the upper-left 3×3 block, ignoring translation
/// and the homogeneous row.
pub fn multiply3x3(m: &Mat4, v: &Vec3) -> Vec3 {
    let mut d = Vec3::zeros();
    for row in 0..3 {
        d[row] = m[(row, 0)] * v[0] + m[(row, 1)] * v[1] + m[(row, 2)] * v[2];
    }
    d
}

/// Compose `l × r` one column of `r` at a time.
///
/// Both operands are borrowed and the result is a fresh value, so the
/// destination can never alias an input. Callers that want to update a
/// matrix in place assign the returned value.
pub fn compose(l: &Mat4, r: &Mat4) -> Mat4 {
    let mut d = Mat4::zeros();
    for col in 0..4 {
        let column = multiply(l, &r.column(col).into_owned());
        d.set_column(col, &column);
    }
    d
}

/// Build a matrix from the GL `m[col][row]` array layout.
pub fn from_columns(columns: [[f32; 4]; 4]) -> Mat4 {
    let mut m = Mat4::zeros();
    for (col, values) in columns.iter().enumerate() {
        m.set_column(col, &Vec4::from_column_slice(values));
    }
    m
}

/// Convert a matrix back into the GL `m[col][row]` array layout.
pub fn to_columns(m: &Mat4) -> [[f32; 4]; 4] {
    let mut columns = [[0.0; 4]; 4];
    for (col, values) in columns.iter_mut().enumerate() {
        for (row, value) in values.iter_mut().enumerate() {
            *value = m[(row, col)];
        }
    }
    columns
}

/// Build a matrix from 16 floats in column-major order, as passed to
/// `glLoadMatrixf` / `glMultMatrixf`.
pub fn from_gl_slice(values: &[f32; 16]) -> Mat4 {
    Mat4::from_column_slice(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Mat4 {
        from_columns([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn test_column_layout() {
        let m = sample();
        // m[1][2] in GL terms: column 1, row 2
        assert_eq!(m[(2, 1)], 7.0);
        assert_eq!(to_columns(&m)[3][0], 13.0);
        assert_eq!(m.as_slice()[4], 5.0);
    }

    #[test]
    fn test_multiply_vector() {
        let m = sample();
        let d = multiply(&m, &Vec4::new(1.0, 0.0, 0.0, 1.0));
        // first column plus translation column
        assert_eq!(d, Vec4::new(14.0, 16.0, 18.0, 20.0));
        assert_relative_eq!(d, m * Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_multiply3x3_ignores_translation() {
        let mut m = identity();
        m[(0, 3)] = 10.0;
        m[(1, 3)] = -4.0;
        m[(3, 0)] = 7.0;
        let d = multiply3x3(&m, &Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(d, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_compose_matches_nalgebra_product() {
        let l = sample();
        let r = from_columns([
            [0.0, 1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 2.0, 0.0],
            [3.0, 4.0, 5.0, 1.0],
        ]);
        assert_relative_eq!(compose(&l, &r), l * r, epsilon = 1e-5);
        assert_relative_eq!(compose(&r, &l), r * l, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_identity() {
        let m = sample();
        assert_eq!(compose(&identity(), &m), m);
        assert_eq!(compose(&m, &identity()), m);
    }

    #[test]
    fn test_gl_slice_round_trip() {
        let values: [f32; 16] = std::array::from_fn(|i| i as f32);
        let m = from_gl_slice(&values);
        assert_eq!(m.as_slice(), &values[..]);
        assert_eq!(to_columns(&m)[2], [8.0, 9.0, 10.0, 11.0]);
    }
}
