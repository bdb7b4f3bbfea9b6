use smallvec::SmallVec;

use crate::math::prelude::Vector2;
use crate::utils::prelude::{Color, Rgba};

use super::types::VertexFormat;

/// Flattened vertex data as it is uploaded to the backend.
pub type VertexRecord = SmallVec<[f32; 16]>;

/// A vertex in normalized device coordinates, colored without alpha.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    /// Number of floats per vertex.
    pub const COMPONENTS: usize = 5;

    #[inline]
    pub fn new<C: Into<Color>>(position: Vector2<f32>, color: C) -> Self {
        Vertex {
            position: [position.x, position.y],
            color: color.into().rgb(),
        }
    }

    /// Flattens `vertices` into position followed by color, vertex by vertex.
    pub fn flatten(vertices: &[Vertex]) -> VertexRecord {
        let mut record = VertexRecord::with_capacity(vertices.len() * Self::COMPONENTS);
        for v in vertices {
            record.extend_from_slice(&v.position);
            record.extend_from_slice(&v.color);
        }
        record
    }
}

/// A named input of the vertex shader, measured in floats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub format: VertexFormat,
    pub size: i32,
    pub offset: i32,
}

/// The layout of `Vertex`, whose attribute names must match the shader sources.
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        name: "vertPosition",
        format: VertexFormat::Float,
        size: 2,
        offset: 0,
    },
    VertexAttribute {
        name: "vertColor",
        format: VertexFormat::Float,
        size: 3,
        offset: 2,
    },
];

/// Per-vertex colors of a triangle. A single color paints a solid shape, while
/// two or three give a gradient. Missing colors repeat the previous one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexColors(pub [Rgba; 3]);

impl From<Rgba> for VertexColors {
    fn from(c1: Rgba) -> Self {
        VertexColors([c1, c1, c1])
    }
}

impl From<(Rgba, Rgba)> for VertexColors {
    fn from((c1, c2): (Rgba, Rgba)) -> Self {
        VertexColors([c1, c2, c2])
    }
}

impl From<(Rgba, Rgba, Rgba)> for VertexColors {
    fn from((c1, c2, c3): (Rgba, Rgba, Rgba)) -> Self {
        VertexColors([c1, c2, c3])
    }
}

impl From<[Rgba; 3]> for VertexColors {
    fn from(colors: [Rgba; 3]) -> Self {
        VertexColors(colors)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flatten() {
        let vertices = [
            Vertex::new(Vector2::new(0.0, 0.5), Rgba::rgb(255, 255, 0)),
            Vertex::new(Vector2::new(-0.5, -0.5), Rgba::rgb(255, 0, 255)),
        ];

        let record = Vertex::flatten(&vertices);
        assert_eq!(
            &record[..],
            &[0.0, 0.5, 1.0, 1.0, 0.0, -0.5, -0.5, 1.0, 0.0, 1.0]
        );
    }

    #[test]
    fn default_colors() {
        let (r, g) = (Rgba::rgb(255, 0, 0), Rgba::rgb(0, 255, 0));
        assert_eq!(VertexColors::from(r).0, [r, r, r]);
        assert_eq!(VertexColors::from((r, g)).0, [r, g, g]);
    }

    #[test]
    fn layout_fits_vertex() {
        let last = VERTEX_ATTRIBUTES[VERTEX_ATTRIBUTES.len() - 1];
        assert_eq!((last.offset + last.size) as usize, Vertex::COMPONENTS);
    }
}
