//! Drawing lines and triangles through a rendering context.
//!
//! `GraphicService` turns calls like "draw a triangle outline with three colors"
//! into buffer uploads, attribute bindings and draw calls, which are forwarded to
//! a backend `Visitor`. The backend is WebGL in the browser, and a headless
//! context that records commands everywhere else.

pub mod backends;
pub mod palette;
pub mod service;
pub mod shaders;
pub mod types;
pub mod vertex;

pub mod prelude {
    pub use super::palette::{Palette, PaletteKind};
    pub use super::service::{GraphicService, GraphicsInfo};
    pub use super::shaders::{FRAGMENT_SHADER, VERTEX_SHADER};
    pub use super::types::*;
    pub use super::vertex::{Vertex, VertexColors};
}
