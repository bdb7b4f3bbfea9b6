use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{self, HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlShader};

use web_sys::WebGlRenderingContext as WebGL;

use crate::application::settings::CanvasParams;
use crate::errors::*;
use crate::utils::prelude::{Color, DataVec, HandlePool};

use super::super::super::types::*;
use super::super::Visitor;

pub struct WebGLVisitor {
    ctx: WebGL,
    program_handles: HandlePool,
    shader_handles: HandlePool,
    buffer_handles: HandlePool,
    programs: DataVec<WebGlProgram>,
    shaders: DataVec<WebGlShader>,
    buffers: DataVec<WebGlBuffer>,
}

impl WebGLVisitor {
    /// Looks up the canvas element by id, sizes it and acquires its `webgl`
    /// context.
    pub fn new(params: &CanvasParams) -> Result<Self> {
        let unavailable = |reason: &str| Error::ContextUnavailable(reason.to_owned());

        let window = web_sys::window().ok_or_else(|| unavailable("no global `window` exists"))?;
        let document = window
            .document()
            .ok_or_else(|| unavailable("should have a document on window"))?;

        let canvas = document
            .get_element_by_id(&params.id)
            .ok_or_else(|| unavailable(&format!("element `{}` does not exist", params.id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| unavailable(&format!("element `{}` is not a canvas", params.id)))?;

        canvas.set_width(params.size.x);
        canvas.set_height(params.size.y);

        let ctx = canvas
            .get_context("webgl")
            .map_err(|_| unavailable("failed to query the `webgl` context"))?
            .ok_or_else(|| unavailable("`webgl` is not supported"))?
            .dyn_into::<WebGL>()
            .map_err(|_| unavailable("context is not a `WebGLRenderingContext`"))?;

        info!(
            "Acquired WebGL context of canvas `{}` ({}x{}).",
            params.id, params.size.x, params.size.y
        );

        Ok(WebGLVisitor {
            ctx,
            program_handles: HandlePool::new(),
            shader_handles: HandlePool::new(),
            buffer_handles: HandlePool::new(),
            programs: DataVec::new(),
            shaders: DataVec::new(),
            buffers: DataVec::new(),
        })
    }

    fn program(&self, handle: ProgramHandle) -> Result<&WebGlProgram> {
        self.programs
            .get(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))
    }

    fn shader(&self, handle: ShaderHandle) -> Result<&WebGlShader> {
        self.shaders
            .get(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))
    }

    fn buffer(&self, handle: BufferHandle) -> Result<&WebGlBuffer> {
        self.buffers
            .get(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))
    }
}

impl Visitor for WebGLVisitor {
    fn clear_color(&mut self, color: Color) -> Result<()> {
        self.ctx.clear_color(color.0, color.1, color.2, color.3);
        check(&self.ctx)
    }

    fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.ctx.clear(mask.into());
        check(&self.ctx)
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let id = self
            .ctx
            .create_program()
            .ok_or_else(|| backend_err!("Unable to create program object"))?;

        let handle: ProgramHandle = self.program_handles.create();
        self.programs.create(handle, id);
        Ok(handle)
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        let id = self
            .programs
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        self.program_handles.free(handle);
        self.ctx.delete_program(Some(&id));
        check(&self.ctx)
    }

    fn create_shader(&mut self, kind: ShaderKind) -> Result<ShaderHandle> {
        let id = self
            .ctx
            .create_shader(kind.into())
            .ok_or_else(|| backend_err!("Unable to create shader object"))?;

        let handle: ShaderHandle = self.shader_handles.create();
        self.shaders.create(handle, id);
        Ok(handle)
    }

    fn shader_source(&mut self, handle: ShaderHandle, source: &str) -> Result<()> {
        self.ctx.shader_source(self.shader(handle)?, source);
        check(&self.ctx)
    }

    fn compile_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.ctx.compile_shader(self.shader(handle)?);
        check(&self.ctx)
    }

    fn shader_compile_status(&self, handle: ShaderHandle) -> Result<bool> {
        Ok(self
            .ctx
            .get_shader_parameter(self.shader(handle)?, WebGL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false))
    }

    fn shader_info_log(&self, handle: ShaderHandle) -> Option<String> {
        self.shaders
            .get(handle)
            .and_then(|v| self.ctx.get_shader_info_log(v))
    }

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let id = self
            .shaders
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        self.shader_handles.free(handle);
        self.ctx.delete_shader(Some(&id));
        check(&self.ctx)
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        self.ctx
            .attach_shader(self.program(program)?, self.shader(shader)?);
        check(&self.ctx)
    }

    fn link_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.ctx.link_program(self.program(handle)?);
        check(&self.ctx)
    }

    fn program_link_status(&self, handle: ProgramHandle) -> Result<bool> {
        Ok(self
            .ctx
            .get_program_parameter(self.program(handle)?, WebGL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false))
    }

    fn program_info_log(&self, handle: ProgramHandle) -> Option<String> {
        self.programs
            .get(handle)
            .and_then(|v| self.ctx.get_program_info_log(v))
    }

    fn use_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.ctx.use_program(Some(self.program(handle)?));
        check(&self.ctx)
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        let id = self
            .ctx
            .create_buffer()
            .ok_or_else(|| backend_err!("Unable to create buffer object"))?;

        let handle: BufferHandle = self.buffer_handles.create();
        self.buffers.create(handle, id);
        Ok(handle)
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>) -> Result<()> {
        match handle {
            Some(v) => self.ctx.bind_buffer(target.into(), Some(self.buffer(v)?)),
            None => self.ctx.bind_buffer(target.into(), None),
        }

        check(&self.ctx)
    }

    fn buffer_data(
        &mut self,
        target: BufferTarget,
        data: &[f32],
        usage: BufferUsage,
    ) -> Result<()> {
        let array = Float32Array::from(data);
        self.ctx
            .buffer_data_with_array_buffer_view(target.into(), &array, usage.into());
        check(&self.ctx)
    }

    fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        let id = self
            .buffers
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        self.buffer_handles.free(handle);
        self.ctx.delete_buffer(Some(&id));
        check(&self.ctx)
    }

    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        let location = self.ctx.get_attrib_location(self.program(program)?, name);
        check(&self.ctx)?;
        Ok(location)
    }

    fn vertex_attrib_pointer(
        &mut self,
        index: u32,
        size: i32,
        format: VertexFormat,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) -> Result<()> {
        self.ctx
            .vertex_attrib_pointer_with_i32(index, size, format.into(), normalized, stride, offset);
        check(&self.ctx)
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) -> Result<()> {
        self.ctx.enable_vertex_attrib_array(index);
        check(&self.ctx)
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32) -> Result<()> {
        self.ctx.draw_arrays(primitive.into(), first, count);
        check(&self.ctx)
    }
}

fn check(ctx: &WebGL) -> Result<()> {
    match ctx.get_error() {
        WebGL::NO_ERROR => Ok(()),

        WebGL::INVALID_ENUM => Err(backend_err!(
            "[WebGL] An unacceptable value is specified for an enumerated argument."
        )),

        WebGL::INVALID_VALUE => Err(backend_err!("[WebGL] A numeric argument is out of range.")),

        WebGL::INVALID_OPERATION => Err(backend_err!(
            "[WebGL] The specified operation is not allowed in the current state."
        )),

        WebGL::INVALID_FRAMEBUFFER_OPERATION => Err(backend_err!(
            "[WebGL] The command is trying to render to or read from the framebuffer \
             while the currently bound framebuffer is not framebuffer complete."
        )),

        WebGL::OUT_OF_MEMORY => Err(backend_err!(
            "[WebGL] There is not enough memory left to execute the command."
        )),

        WebGL::CONTEXT_LOST_WEBGL => Err(Error::ContextUnavailable(
            "the WebGL context has been lost".into()
        )),

        _ => Err(backend_err!("[WebGL] Oops, Unknown WebGL error.")),
    }
}
