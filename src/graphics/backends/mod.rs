//! The backend of renderer, which should be responsible for only one thing:
//! forwarding commands to a concrete rendering context.

pub mod headless;

use crate::application::settings::CanvasParams;
use crate::errors::*;
use crate::utils::prelude::Color;

use super::types::*;

/// The raw rendering-context calls `GraphicService` is built upon. Context objects
/// are owned by the visitor and referred to by opaque handles.
pub trait Visitor {
    fn clear_color(&mut self, color: Color) -> Result<()>;

    fn clear(&mut self, mask: ClearMask) -> Result<()>;

    fn create_program(&mut self) -> Result<ProgramHandle>;

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()>;

    fn create_shader(&mut self, kind: ShaderKind) -> Result<ShaderHandle>;

    fn shader_source(&mut self, handle: ShaderHandle, source: &str) -> Result<()>;

    fn compile_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    fn shader_compile_status(&self, handle: ShaderHandle) -> Result<bool>;

    /// Returns the diagnostics of the last compilation, if the context has any.
    fn shader_info_log(&self, handle: ShaderHandle) -> Option<String>;

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) -> Result<()>;

    fn link_program(&mut self, handle: ProgramHandle) -> Result<()>;

    fn program_link_status(&self, handle: ProgramHandle) -> Result<bool>;

    /// Returns the diagnostics of the last link, if the context has any.
    fn program_info_log(&self, handle: ProgramHandle) -> Option<String>;

    fn use_program(&mut self, handle: ProgramHandle) -> Result<()>;

    fn create_buffer(&mut self) -> Result<BufferHandle>;

    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>) -> Result<()>;

    /// Uploads `data` into the buffer bound to `target`.
    fn buffer_data(&mut self, target: BufferTarget, data: &[f32], usage: BufferUsage)
        -> Result<()>;

    fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    /// Returns the location of a named attribute of a linked program, or a
    /// negative value if the program has no such attribute.
    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Result<i32>;

    /// Describes the layout of attribute `index` in the bound array buffer. `stride`
    /// and `offset` are in bytes.
    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        format: VertexFormat,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) -> Result<()>;

    fn enable_vertex_attrib_array(&mut self, index: u32) -> Result<()>;

    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32) -> Result<()>;
}

#[cfg(target_arch = "wasm32")]
pub mod webgl;

/// Acquires the rendering context of the canvas described by `params`.
#[cfg(target_arch = "wasm32")]
pub fn new(params: &CanvasParams) -> Result<Box<dyn Visitor>> {
    let visitor = webgl::visitor::WebGLVisitor::new(params)?;
    Ok(Box::new(visitor))
}

/// Acquires the rendering context of the canvas described by `params`.
#[cfg(not(target_arch = "wasm32"))]
pub fn new(params: &CanvasParams) -> Result<Box<dyn Visitor>> {
    Err(Error::ContextUnavailable(format!(
        "canvas `{}` only exists inside a browser",
        params.id
    )))
}

pub fn new_headless() -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new())
}
