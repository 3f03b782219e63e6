//! Per-context matrix state: the three stacks, the active mode and the
//! cached final transform.
//!
//! Every GL matrix entry point is a method here. Errors go to the context's
//! [`ErrorSink`] and the failing call returns with no state change.

use log::debug;

use crate::config::StackConfig;
use crate::error::{ErrorFlag, ErrorSink, GlError};
use crate::matrix::{compose, from_gl_slice, identity, Mat4};
use crate::mode::MatrixMode;
use crate::stack::MatrixStack;

/// Matrix state of one graphics context.
///
/// The context is single-threaded; hosts sharing one across threads wrap
/// the whole thing in a single lock.
#[derive(Debug, Clone)]
pub struct MatrixContext<S: ErrorSink = ErrorFlag> {
    modelview: MatrixStack,
    projection: MatrixStack,
    texture: MatrixStack,
    mode: MatrixMode,
    final_matrix: Mat4,
    persp_norm_factor: f32,
    sink: S,
}

impl MatrixContext<ErrorFlag> {
    /// Default stack depths with a `glGetError`-style error flag.
    pub fn with_defaults() -> Self {
        Self::new(StackConfig::default(), ErrorFlag::new())
    }

    /// Pending error, cleared on read.
    pub fn get_error(&mut self) -> Option<GlError> {
        self.sink.take()
    }
}

impl Default for MatrixContext<ErrorFlag> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl<S: ErrorSink> MatrixContext<S> {
    pub fn new(config: StackConfig, sink: S) -> Self {
        let mut context = Self {
            modelview: MatrixStack::new(config.modelview_depth),
            projection: MatrixStack::new(config.projection_depth),
            texture: MatrixStack::new(config.texture_depth),
            mode: MatrixMode::ModelView,
            final_matrix: identity(),
            persp_norm_factor: 1.0,
            sink,
        };
        context.reset();
        context
    }

    /// Load identity into every stack top in texture, projection,
    /// model-view order and leave model-view selected.
    pub fn reset(&mut self) {
        for mode in [MatrixMode::Texture, MatrixMode::Projection, MatrixMode::ModelView] {
            self.mode = mode;
            self.active_stack_mut().reset();
            self.load_identity();
        }
        self.persp_norm_factor = 1.0;
    }

    pub fn mode(&self) -> MatrixMode {
        self.mode
    }

    /// Select the stack later operations apply to.
    pub fn matrix_mode(&mut self, mode: MatrixMode) {
        debug!("matrix mode -> {}", mode);
        self.mode = mode;
    }

    /// Select a stack by raw GL enum, reporting `InvalidEnum` for anything
    /// that is not a matrix mode.
    pub fn matrix_mode_raw(&mut self, mode: u32) {
        match MatrixMode::try_from(mode) {
            Ok(mode) => self.matrix_mode(mode),
            Err(error) => self.sink.report(error),
        }
    }

    pub fn stack(&self, mode: MatrixMode) -> &MatrixStack {
        match mode {
            MatrixMode::ModelView => &self.modelview,
            MatrixMode::Projection => &self.projection,
            MatrixMode::Texture => &self.texture,
        }
    }

    fn stack_mut(&mut self, mode: MatrixMode) -> &mut MatrixStack {
        match mode {
            MatrixMode::ModelView => &mut self.modelview,
            MatrixMode::Projection => &mut self.projection,
            MatrixMode::Texture => &mut self.texture,
        }
    }

    fn active_stack_mut(&mut self) -> &mut MatrixStack {
        self.stack_mut(self.mode)
    }

    /// Top of the currently selected stack, resolved on every call.
    pub fn current_matrix(&self) -> &Mat4 {
        self.stack(self.mode).top()
    }

    pub fn current_depth(&self) -> usize {
        self.stack(self.mode).depth()
    }

    /// Cached `projection × model-view`, read by the vertex transform stage.
    pub fn final_matrix(&self) -> &Mat4 {
        &self.final_matrix
    }

    /// `2 / (near + far)` after a frustum, `1` after an ortho projection.
    pub fn persp_norm_factor(&self) -> f32 {
        self.persp_norm_factor
    }

    pub(crate) fn set_persp_norm_factor(&mut self, factor: f32) {
        self.persp_norm_factor = factor;
    }

    pub(crate) fn report(&mut self, error: GlError) {
        self.sink.report(error);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Texture matrices never take part in the vertex transform, so the
    /// cache is left alone while texture mode is selected.
    fn update_final_matrix(&mut self) {
        if self.mode.feeds_final_matrix() {
            self.final_matrix = compose(self.projection.top(), self.modelview.top());
        }
    }

    pub fn load_matrix(&mut self, m: &Mat4) {
        *self.active_stack_mut().top_mut() = *m;
        self.update_final_matrix();
    }

    /// `glLoadMatrixf`: 16 floats, column-major.
    pub fn load_matrix_slice(&mut self, values: &[f32; 16]) {
        self.load_matrix(&from_gl_slice(values));
    }

    pub fn load_identity(&mut self) {
        self.load_matrix(&identity());
    }

    /// Replace the current matrix with `current × m`.
    pub fn mult_matrix(&mut self, m: &Mat4) {
        let current = *self.current_matrix();
        *self.active_stack_mut().top_mut() = compose(&current, m);
        self.update_final_matrix();
    }

    /// `glMultMatrixf`: 16 floats, column-major.
    pub fn mult_matrix_slice(&mut self, values: &[f32; 16]) {
        self.mult_matrix(&from_gl_slice(values));
    }

    pub fn push_matrix(&mut self) {
        if let Err(error) = self.active_stack_mut().push() {
            self.sink.report(error);
        }
    }

    /// Popping exposes a previously saved matrix, so the final matrix is
    /// refreshed whenever a model-view or projection pop succeeds.
    pub fn pop_matrix(&mut self) {
        match self.active_stack_mut().pop() {
            Ok(()) => self.update_final_matrix(),
            Err(error) => self.sink.report(error),
        }
    }
}
