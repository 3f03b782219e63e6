//! Fixed-capacity matrix stack.

use log::trace;

use crate::error::GlError;
use crate::matrix::{identity, Mat4};

/// A bounded stack of matrices with a cursor at the active element.
///
/// `cur_depth < capacity` always holds, so [`MatrixStack::top`] never fails.
/// Slots above the cursor keep whatever was last stored there but are not
/// reachable until a push overwrites them.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    storage: Vec<Mat4>,
    cur_depth: usize,
}

impl MatrixStack {
    /// Create a stack holding up to `capacity` matrices, every slot identity.
    ///
    /// A capacity of zero is bumped to one so the root matrix always exists;
    /// [`crate::StackConfig::validate`] rejects zero before it gets here.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![identity(); capacity.max(1)],
            cur_depth: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Zero-based index of the active matrix.
    pub fn depth(&self) -> usize {
        self.cur_depth
    }

    pub fn top(&self) -> &Mat4 {
        &self.storage[self.cur_depth]
    }

    pub fn top_mut(&mut self) -> &mut Mat4 {
        &mut self.storage[self.cur_depth]
    }

    /// Duplicate the top matrix one level deeper.
    pub fn push(&mut self) -> Result<(), GlError> {
        let new_depth = self.cur_depth + 1;
        if new_depth >= self.storage.len() {
            return Err(GlError::StackOverflow);
        }

        self.storage[new_depth] = self.storage[self.cur_depth];
        self.cur_depth = new_depth;
        trace!("matrix stack push -> depth {}", new_depth);
        Ok(())
    }

    /// Expose the matrix saved by the matching push.
    pub fn pop(&mut self) -> Result<(), GlError> {
        let new_depth = self.cur_depth.checked_sub(1).ok_or(GlError::StackUnderflow)?;
        self.cur_depth = new_depth;
        trace!("matrix stack pop -> depth {}", new_depth);
        Ok(())
    }

    /// Back to depth zero with an identity top.
    pub fn reset(&mut self) {
        self.cur_depth = 0;
        self.storage[0] = identity();
    }
}
