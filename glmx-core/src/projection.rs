//! Projection builders: perspective frustum and orthographic.
//!
//! Bounds are `f64`, like the `GLdouble` parameters of `glFrustum` and
//! `glOrtho`. All arithmetic happens in `f64` and each entry is narrowed to
//! `f32` only when it is stored.
//!
//! Bounds are not validated. Coincident planes (`r == l`, `t == b`,
//! `f == n`) divide by zero and the resulting infinities or NaNs are
//! written into the matrix as-is; callers that care must check first.

use log::debug;

use crate::context::MatrixContext;
use crate::error::ErrorSink;
use crate::matrix::{from_columns, Mat4};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Clipping-plane bounds shared by both projection forms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ClipBounds {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Symmetric bounds for a vertical field of view in radians, as
    /// `gluPerspective` derives them.
    pub fn from_fov(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let top = near * (fovy / 2.0).tan();
        let right = top * aspect;
        Self::new(-right, right, -top, top, near, far)
    }
}

fn narrow(columns: [[f64; 4]; 4]) -> Mat4 {
    from_columns(columns.map(|col| col.map(|v| v as f32)))
}

/// Projection matrix builders
pub struct Projection;

impl Projection {
    /// Standard OpenGL perspective projection.
    pub fn frustum(bounds: &ClipBounds) -> Mat4 {
        let ClipBounds {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *bounds;

        narrow([
            [(2.0 * n) / (r - l), 0.0, 0.0, 0.0],
            [0.0, (2.0 * n) / (t - b), 0.0, 0.0],
            [(r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0],
            [0.0, 0.0, -(2.0 * f * n) / (f - n), 0.0],
        ])
    }

    /// Standard OpenGL orthographic projection.
    pub fn ortho(bounds: &ClipBounds) -> Mat4 {
        let ClipBounds {
            left: l,
            right: r,
            bottom: b,
            top: t,
            near: n,
            far: f,
        } = *bounds;

        narrow([
            [2.0 / (r - l), 0.0, 0.0, 0.0],
            [0.0, 2.0 / (t - b), 0.0, 0.0],
            [0.0, 0.0, 2.0 / (f - n), 0.0],
            [-(r + l) / (r - l), -(t + b) / (t - b), -(f + n) / (f - n), 1.0],
        ])
    }

    /// Symmetric perspective projection from a vertical field of view in
    /// radians; the `frustum` of [`ClipBounds::from_fov`].
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
        Self::frustum(&ClipBounds::from_fov(fovy, aspect, near, far))
    }

    /// Perspective normalization factor left behind by each projection form.
    pub fn norm_factor(mode: ProjectionMode, bounds: &ClipBounds) -> f32 {
        match mode {
            ProjectionMode::Perspective => (2.0 / (bounds.near + bounds.far)) as f32,
            ProjectionMode::Orthographic => 1.0,
        }
    }
}

impl<S: ErrorSink> MatrixContext<S> {
    /// `glFrustum`
    pub fn frustum(&mut self, l: f64, r: f64, b: f64, t: f64, n: f64, f: f64) {
        let bounds = ClipBounds::new(l, r, b, t, n, f);
        self.apply_projection(ProjectionMode::Perspective, &bounds);
    }

    /// `glOrtho`
    pub fn ortho(&mut self, l: f64, r: f64, b: f64, t: f64, n: f64, f: f64) {
        let bounds = ClipBounds::new(l, r, b, t, n, f);
        self.apply_projection(ProjectionMode::Orthographic, &bounds);
    }

    /// `gluPerspective`, with `fovy` in radians. Goes through `frustum`.
    pub fn perspective(&mut self, fovy: f64, aspect: f64, near: f64, far: f64) {
        let bounds = ClipBounds::from_fov(fovy, aspect, near, far);
        self.apply_projection(ProjectionMode::Perspective, &bounds);
    }

    fn apply_projection(&mut self, mode: ProjectionMode, bounds: &ClipBounds) {
        debug!("{:?} projection on {}: {:?}", mode, self.mode(), bounds);
        let matrix = match mode {
            ProjectionMode::Perspective => Projection::frustum(bounds),
            ProjectionMode::Orthographic => Projection::ortho(bounds),
        };
        self.mult_matrix(&matrix);
        self.set_persp_norm_factor(Projection::norm_factor(mode, bounds));
    }
}
