//! glmx core: the transformation-matrix state of a fixed-function GL
//! pipeline.
//!
//! Model-view, projection and texture stacks, the matrix mode selector,
//! the cached `projection × model-view` final matrix, and the standard
//! transform builders (translate, scale, rotate, frustum, ortho).

pub mod config;
pub mod context;
pub mod error;
pub mod matrix;
pub mod mode;
pub mod projection;
pub mod stack;
pub mod transform;

// Re-export commonly used types
pub use config::StackConfig;
pub use context::MatrixContext;
pub use error::{ConfigError, ErrorFlag, ErrorSink, GlError, LogSink};
pub use matrix::{Mat4, Vec3, Vec4};
pub use mode::MatrixMode;
pub use projection::{ClipBounds, Projection, ProjectionMode};
pub use stack::MatrixStack;
pub use transform::Transform;
