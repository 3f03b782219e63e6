//! Affine transform builders: translate, scale and axis-angle rotate.
//!
//! The `Transform` constructors are pure. The matching `MatrixContext`
//! methods compose them onto the current matrix with `mult_matrix`.

use crate::context::MatrixContext;
use crate::error::{ErrorSink, GlError};
use crate::matrix::{from_columns, Mat4};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        from_columns([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ])
    }

    /// Create a scale matrix. Zero and negative factors are taken as given.
    pub fn scale(x: f32, y: f32, z: f32) -> Mat4 {
        from_columns([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Create a rotation of `angle` radians around `(x, y, z)` using the
    /// Rodrigues formula. The axis is normalized here.
    ///
    /// The axis is first divided by its largest component, so squaring
    /// cannot overflow or flush to zero for very large or very small axes.
    ///
    /// Returns `None` for an all-zero or non-finite axis.
    pub fn rotation(angle: f32, x: f32, y: f32, z: f32) -> Option<Mat4> {
        let max = x.abs().max(y.abs()).max(z.abs());
        if max == 0.0 || !max.is_finite() {
            return None;
        }
        let (x, y, z) = (x / max, y / max, z / max);
        // f32::max skips NaN, so a NaN component shows up here
        let mag = (x * x + y * y + z * z).sqrt();
        if !mag.is_finite() {
            return None;
        }
        let (x, y, z) = (x / mag, y / mag, z / mag);

        let (s, c) = angle.sin_cos();
        let ic = 1.0 - c;

        Some(from_columns([
            [x * x * ic + c, y * x * ic + z * s, z * x * ic - y * s, 0.0],
            [x * y * ic - z * s, y * y * ic + c, z * y * ic + x * s, 0.0],
            [x * z * ic + y * s, y * z * ic - x * s, z * z * ic + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]))
    }
}

impl<S: ErrorSink> MatrixContext<S> {
    /// `glTranslatef`
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.mult_matrix(&Transform::translation(x, y, z));
    }

    /// `glScalef`
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.mult_matrix(&Transform::scale(x, y, z));
    }

    /// `glRotatef`, with `angle` in radians. An all-zero or non-finite axis
    /// reports `InvalidValue` and leaves the current matrix as it was.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        match Transform::rotation(angle, x, y, z) {
            Some(rotation) => self.mult_matrix(&rotation),
            None => self.report(GlError::InvalidValue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{identity, multiply, Vec4};
    use approx::assert_relative_eq;
    use nalgebra::{Rotation3, Unit, Vector3};
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_translation_column() {
        let m = Transform::translation(1.0, 2.0, 3.0);
        assert_eq!(m.column(3).into_owned(), Vec4::new(1.0, 2.0, 3.0, 1.0));
        let p = multiply(&m, &Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(p, Vec4::new(2.0, 3.0, 4.0, 1.0));
    }

    #[test]
    fn test_scale_mirror() {
        let m = Transform::scale(-1.0, 2.0, 0.0);
        let p = multiply(&m, &Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(p, Vec4::new(-1.0, 2.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotation_quarter_turn_about_z() {
        let m = Transform::rotation(FRAC_PI_2, 0.0, 0.0, 1.0).unwrap();
        let p = multiply(&m, &Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(p, Vec4::new(0.0, 1.0, 0.0, 1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_normalizes_axis() {
        let a = Transform::rotation(0.7, 0.0, 5.0, 0.0).unwrap();
        let b = Transform::rotation(0.7, 0.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_matches_nalgebra() {
        let axis = Unit::new_normalize(Vector3::new(1.0, 2.0, -0.5));
        let expected = Rotation3::from_axis_angle(&axis, 1.1).to_homogeneous();
        let m = Transform::rotation(1.1, 1.0, 2.0, -0.5).unwrap();
        assert_relative_eq!(m, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_rotation_zero_axis() {
        assert!(Transform::rotation(1.0, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_rotation_huge_axis() {
        let a = Transform::rotation(0.7, 1e20, 0.0, 0.0).unwrap();
        let b = Transform::rotation(0.7, 1.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(a, b, epsilon = EPSILON);

        let a = Transform::rotation(0.7, 3e38, 3e38, 0.0).unwrap();
        let b = Transform::rotation(0.7, 1.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_tiny_axis() {
        let a = Transform::rotation(0.7, 0.0, 1e-25, 0.0).unwrap();
        let b = Transform::rotation(0.7, 0.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(a, b, epsilon = EPSILON);

        // subnormal
        let a = Transform::rotation(0.7, 0.0, 0.0, 1e-40).unwrap();
        let b = Transform::rotation(0.7, 0.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_non_finite_axis() {
        assert!(Transform::rotation(1.0, f32::INFINITY, 0.0, 0.0).is_none());
        assert!(Transform::rotation(1.0, 1.0, f32::NAN, 0.0).is_none());
        assert!(Transform::rotation(1.0, f32::NAN, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_context_rotate_extreme_axes() {
        let mut context = MatrixContext::with_defaults();
        context.rotate(FRAC_PI_2, 0.0, 0.0, 1e20);
        assert_eq!(context.get_error(), None);
        context.rotate(-FRAC_PI_2, 0.0, 0.0, 1e-25);
        assert_eq!(context.get_error(), None);
        assert_relative_eq!(*context.current_matrix(), identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_context_rotate_zero_axis_reports() {
        let mut context = MatrixContext::with_defaults();
        context.translate(1.0, 0.0, 0.0);
        let before = *context.current_matrix();
        context.rotate(1.0, 0.0, 0.0, 0.0);
        assert_eq!(context.get_error(), Some(GlError::InvalidValue));
        assert_eq!(*context.current_matrix(), before);
    }

    #[test]
    fn test_context_translate() {
        let mut context = MatrixContext::with_defaults();
        context.translate(1.0, 0.0, 0.0);
        let mut expected = identity();
        expected[(0, 3)] = 1.0;
        assert_eq!(*context.current_matrix(), expected);
    }

    #[test]
    fn test_context_scale_then_translate() {
        let mut context = MatrixContext::with_defaults();
        context.scale(2.0, 2.0, 2.0);
        context.translate(1.0, 0.0, 0.0);
        // translation is applied first, then scaled
        let p = multiply(context.current_matrix(), &Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(p, Vec4::new(2.0, 0.0, 0.0, 1.0));
    }
}
