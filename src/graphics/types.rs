use std::ops::BitOr;

use serde::{Deserialize, Serialize};

impl_handle!(ProgramHandle);
impl_handle!(ShaderHandle);
impl_handle!(BufferHandle);

/// Bitmask of the buffers to clear.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ClearMask(u8);

impl ClearMask {
    pub const COLOR: ClearMask = ClearMask(0x1);
    pub const DEPTH: ClearMask = ClearMask(0x2);

    #[inline]
    pub fn contains(self, other: ClearMask) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ClearMask {
    type Output = ClearMask;

    fn bitor(self, rhs: ClearMask) -> ClearMask {
        ClearMask(self.0 | rhs.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
}

/// Hint abouts how the contents of a buffer are going to be accessed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferUsage {
    /// Uploaded once and drawn many times.
    Static,
    /// Updated repeatedly and drawn many times.
    Dynamic,
    /// Uploaded once and drawn at most a few times.
    Stream,
}

/// How vertex buffers are allocated for draw calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BufferPolicy {
    /// Every draw call allocates and uploads a fresh buffer, which is deleted
    /// right after the draw is issued.
    PerDraw,
    /// Buffers are kept per vertex count and re-uploaded on every draw.
    Pooled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    Float,
}

impl VertexFormat {
    /// Size in bytes of one component.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            VertexFormat::Float => std::mem::size_of::<f32>(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Lines,
    LineLoop,
    Triangles,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clear_mask() {
        let mask = ClearMask::COLOR | ClearMask::DEPTH;
        assert!(mask.contains(ClearMask::COLOR));
        assert!(mask.contains(ClearMask::DEPTH));
        assert!(!ClearMask::COLOR.contains(ClearMask::DEPTH));
    }
}
