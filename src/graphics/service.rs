//! The thin layer between application-level drawing calls and the rendering
//! context.

use std::collections::HashMap;

use crate::application::settings::GraphicsParams;
use crate::errors::*;
use crate::math::prelude::{pixel_to_ndc, Vector2};
use crate::utils::prelude::{Color, Rgba};

use super::backends::Visitor;
use super::types::*;
use super::vertex::{Vertex, VertexAttribute, VertexColors, VERTEX_ATTRIBUTES};

/// Statistics of the draw calls issued so far.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GraphicsInfo {
    pub drawcalls: u64,
    pub vertices: u64,
    pub buffers_created: u64,
    pub alive_buffers: u32,
}

/// Owns the rendering context and the one program everything is drawn with.
///
/// Points are given in pixels relative to `dimensions`; colors are given as
/// `Rgba` and adapted before they reach the context.
pub struct GraphicService {
    visitor: Box<dyn Visitor>,
    program: Option<ProgramHandle>,
    linked: bool,
    dimensions: Vector2<u32>,
    params: GraphicsParams,
    buffers: HashMap<usize, BufferHandle>,
    info: GraphicsInfo,
}

impl GraphicService {
    pub fn new(visitor: Box<dyn Visitor>, dimensions: Vector2<u32>, params: GraphicsParams) -> Self {
        GraphicService {
            visitor,
            program: None,
            linked: false,
            dimensions,
            params,
            buffers: HashMap::new(),
            info: GraphicsInfo::default(),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    #[inline]
    pub fn info(&self) -> GraphicsInfo {
        self.info
    }

    /// Returns the current program, if `init_program` has been called.
    #[inline]
    pub fn program(&self) -> Option<ProgramHandle> {
        self.program
    }

    /// Maps a pixel-space point into normalized device coordinates.
    #[inline]
    pub fn point(&self, point: Vector2<f32>) -> Vector2<f32> {
        pixel_to_ndc(point, self.dimensions)
    }

    pub fn clear_color(&mut self, color: Rgba) -> Result<()> {
        self.visitor.clear_color(Color::from(color))
    }

    pub fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.visitor.clear(mask)
    }

    /// Creates a new program and makes it current. A previous program is
    /// deleted along with everything attached to it.
    pub fn init_program(&mut self) -> Result<ProgramHandle> {
        if let Some(previous) = self.program.take() {
            warn!("Replacing {}, which gets deleted.", previous);
            self.linked = false;
            self.visitor.delete_program(previous)?;
        }

        let handle = self.visitor.create_program()?;
        self.program = Some(handle);
        self.linked = false;
        Ok(handle)
    }

    /// Compiles `source` and attaches it to the current program. A shader that
    /// fails to compile is deleted instead of attached.
    pub fn create_shader(&mut self, kind: ShaderKind, source: &str) -> Result<ShaderHandle> {
        let program = self.program.ok_or(Error::ProgramNotInitialized)?;

        let shader = self.visitor.create_shader(kind)?;
        self.visitor.shader_source(shader, source)?;
        self.visitor.compile_shader(shader)?;

        if !self.visitor.shader_compile_status(shader)? {
            let log = self
                .visitor
                .shader_info_log(shader)
                .unwrap_or_else(|| "Unknown error creating shader".into());

            error!("Failed to compile {:?} shader: {}", kind, log);
            self.visitor.delete_shader(shader)?;
            return Err(Error::ShaderCompileFailure(log));
        }

        self.visitor.attach_shader(program, shader)?;
        Ok(shader)
    }

    /// Links the current program and makes it the one subsequent draws use.
    pub fn start_program(&mut self) -> Result<()> {
        let program = self.program.ok_or(Error::ProgramNotInitialized)?;

        self.visitor.link_program(program)?;
        if !self.visitor.program_link_status(program)? {
            let log = self
                .visitor
                .program_info_log(program)
                .unwrap_or_else(|| "Unknown error creating program object".into());

            error!("Failed to link {}: {}", program, log);
            return Err(Error::ProgramLinkFailure(log));
        }

        self.visitor.use_program(program)?;
        self.linked = true;
        info!("Linked and activated {}.", program);
        Ok(())
    }

    pub fn draw_line(&mut self, from: Vector2<f32>, to: Vector2<f32>, color: Rgba) -> Result<()> {
        let vertices = [
            Vertex::new(self.point(from), color),
            Vertex::new(self.point(to), color),
        ];

        self.draw_vertices(Primitive::Lines, &vertices)
    }

    /// Draws the closed outline of a triangle, `colors` being interpolated along
    /// the edges.
    pub fn draw_triangle_outline<T>(
        &mut self,
        p1: Vector2<f32>,
        p2: Vector2<f32>,
        p3: Vector2<f32>,
        colors: T,
    ) -> Result<()>
    where
        T: Into<VertexColors>,
    {
        let vertices = self.triangle(p1, p2, p3, colors.into());
        self.draw_vertices(Primitive::LineLoop, &vertices)
    }

    /// Draws a filled triangle, `colors` being interpolated across it.
    pub fn draw_triangle<T>(
        &mut self,
        p1: Vector2<f32>,
        p2: Vector2<f32>,
        p3: Vector2<f32>,
        colors: T,
    ) -> Result<()>
    where
        T: Into<VertexColors>,
    {
        let vertices = self.triangle(p1, p2, p3, colors.into());
        self.draw_vertices(Primitive::Triangles, &vertices)
    }

    /// Uploads vertices already in normalized device coordinates and draws them
    /// as `primitive`.
    pub fn draw_vertices(&mut self, primitive: Primitive, vertices: &[Vertex]) -> Result<()> {
        let program = match self.program {
            Some(v) if self.linked => v,
            _ => return Err(Error::ProgramNotLinked),
        };

        let record = Vertex::flatten(vertices);
        let buffer = self.upload(vertices.len(), &record)?;
        let result = self.draw_bound(program, primitive, vertices.len());

        // The per-draw buffer goes away even if the draw itself failed.
        if self.params.policy == BufferPolicy::PerDraw {
            self.visitor.delete_buffer(buffer)?;
            self.info.alive_buffers -= 1;
        }

        result
    }

    fn draw_bound(&mut self, program: ProgramHandle, primitive: Primitive, len: usize) -> Result<()> {
        let stride = Vertex::COMPONENTS as i32;
        for attribute in VERTEX_ATTRIBUTES.iter() {
            self.attrib_pointer(program, attribute, stride)?;
        }

        self.visitor.draw_arrays(primitive, 0, len as i32)?;
        self.info.drawcalls += 1;
        self.info.vertices += len as u64;
        Ok(())
    }

    fn triangle(
        &self,
        p1: Vector2<f32>,
        p2: Vector2<f32>,
        p3: Vector2<f32>,
        colors: VertexColors,
    ) -> [Vertex; 3] {
        let VertexColors([c1, c2, c3]) = colors;
        [
            Vertex::new(self.point(p1), c1),
            Vertex::new(self.point(p2), c2),
            Vertex::new(self.point(p3), c3),
        ]
    }

    /// Binds a buffer holding `record` as the array buffer.
    fn upload(&mut self, count: usize, record: &[f32]) -> Result<BufferHandle> {
        let buffer = match self.params.policy {
            BufferPolicy::PerDraw => self.create_buffer()?,
            BufferPolicy::Pooled => match self.buffers.get(&count).cloned() {
                Some(v) => v,
                None => {
                    let v = self.create_buffer()?;
                    self.buffers.insert(count, v);
                    v
                }
            },
        };

        let result = self
            .visitor
            .bind_buffer(BufferTarget::Array, Some(buffer))
            .and_then(|_| {
                self.visitor
                    .buffer_data(BufferTarget::Array, record, self.params.usage)
            });

        if let Err(err) = result {
            if self.params.policy == BufferPolicy::PerDraw {
                self.visitor.delete_buffer(buffer)?;
                self.info.alive_buffers -= 1;
            }

            return Err(err);
        }

        Ok(buffer)
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        let buffer = self.visitor.create_buffer()?;
        self.info.buffers_created += 1;
        self.info.alive_buffers += 1;
        debug!("Created {}.", buffer);
        Ok(buffer)
    }

    /// Points `attribute` at the bound array buffer. `stride` is counted in
    /// components of the attribute's format.
    fn attrib_pointer(
        &mut self,
        program: ProgramHandle,
        attribute: &VertexAttribute,
        stride: i32,
    ) -> Result<()> {
        let location = self.visitor.attrib_location(program, attribute.name)?;
        if location < 0 {
            return Err(Error::AttributeNotFound(attribute.name.to_owned()));
        }

        let bytes = attribute.format.size() as i32;
        let index = location as u32;

        self.visitor.vertex_attrib_pointer(
            index,
            attribute.size,
            attribute.format,
            false,
            stride * bytes,
            attribute.offset * bytes,
        )?;
        self.visitor.enable_vertex_attrib_array(index)
    }
}

impl Drop for GraphicService {
    fn drop(&mut self) {
        for (_, buffer) in self.buffers.drain() {
            if let Err(err) = self.visitor.delete_buffer(buffer) {
                warn!("Failed to delete {}: {}", buffer, err);
            }
        }

        if let Some(program) = self.program.take() {
            if let Err(err) = self.visitor.delete_program(program) {
                warn!("Failed to delete {}: {}", program, err);
            }
        }
    }
}
