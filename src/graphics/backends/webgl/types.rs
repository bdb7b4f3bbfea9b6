use web_sys::WebGlRenderingContext as WebGL;

use super::super::super::types::*;

impl From<ClearMask> for u32 {
    fn from(mask: ClearMask) -> Self {
        let mut bits = 0;
        if mask.contains(ClearMask::COLOR) {
            bits |= WebGL::COLOR_BUFFER_BIT;
        }

        if mask.contains(ClearMask::DEPTH) {
            bits |= WebGL::DEPTH_BUFFER_BIT;
        }

        bits
    }
}

impl From<ShaderKind> for u32 {
    fn from(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Vertex => WebGL::VERTEX_SHADER,
            ShaderKind::Fragment => WebGL::FRAGMENT_SHADER,
        }
    }
}

impl From<BufferTarget> for u32 {
    fn from(target: BufferTarget) -> Self {
        match target {
            BufferTarget::Array => WebGL::ARRAY_BUFFER,
        }
    }
}

impl From<BufferUsage> for u32 {
    fn from(usage: BufferUsage) -> Self {
        match usage {
            BufferUsage::Static => WebGL::STATIC_DRAW,
            BufferUsage::Dynamic => WebGL::DYNAMIC_DRAW,
            BufferUsage::Stream => WebGL::STREAM_DRAW,
        }
    }
}

impl From<VertexFormat> for u32 {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Float => WebGL::FLOAT,
        }
    }
}

impl From<Primitive> for u32 {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Lines => WebGL::LINES,
            Primitive::LineLoop => WebGL::LINE_LOOP,
            Primitive::Triangles => WebGL::TRIANGLES,
        }
    }
}
