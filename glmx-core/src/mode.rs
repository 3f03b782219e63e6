//! Matrix mode selector.

use std::fmt;

use crate::error::GlError;

pub const GL_MODELVIEW: u32 = 0x1700;
pub const GL_PROJECTION: u32 = 0x1701;
pub const GL_TEXTURE: u32 = 0x1702;

/// Which matrix stack operations apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatrixMode {
    #[default]
    ModelView,
    Projection,
    Texture,
}

impl MatrixMode {
    pub const ALL: [MatrixMode; 3] = [
        MatrixMode::ModelView,
        MatrixMode::Projection,
        MatrixMode::Texture,
    ];

    /// The GL enum value for this mode.
    pub fn gl_enum(self) -> u32 {
        match self {
            MatrixMode::ModelView => GL_MODELVIEW,
            MatrixMode::Projection => GL_PROJECTION,
            MatrixMode::Texture => GL_TEXTURE,
        }
    }

    /// Whether this stack's top feeds the final vertex transform.
    pub fn feeds_final_matrix(self) -> bool {
        self != MatrixMode::Texture
    }
}

impl TryFrom<u32> for MatrixMode {
    type Error = GlError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            GL_MODELVIEW => Ok(MatrixMode::ModelView),
            GL_PROJECTION => Ok(MatrixMode::Projection),
            GL_TEXTURE => Ok(MatrixMode::Texture),
            _ => Err(GlError::InvalidEnum),
        }
    }
}

impl fmt::Display for MatrixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatrixMode::ModelView => "GL_MODELVIEW",
            MatrixMode::Projection => "GL_PROJECTION",
            MatrixMode::Texture => "GL_TEXTURE",
        };
        f.write_str(name)
    }
}
