//! A rendering context that draws nothing. It keeps track of the objects it was
//! asked to create, performs the same status bookkeeping a real context does and
//! records every command it receives into a `CommandLog`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::*;
use crate::utils::prelude::{Color, DataVec, HandlePool, Timestamp};

use super::super::types::*;
use super::Visitor;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ClearColor(Color),
    Clear(ClearMask),
    CreateProgram(ProgramHandle),
    DeleteProgram(ProgramHandle),
    CreateShader(ShaderHandle, ShaderKind),
    ShaderSource(ShaderHandle),
    CompileShader(ShaderHandle),
    DeleteShader(ShaderHandle),
    AttachShader(ProgramHandle, ShaderHandle),
    LinkProgram(ProgramHandle),
    UseProgram(ProgramHandle),
    CreateBuffer(BufferHandle),
    BindBuffer(BufferTarget, Option<BufferHandle>),
    BufferData(BufferTarget, Vec<f32>, BufferUsage),
    DeleteBuffer(BufferHandle),
    VertexAttribPointer {
        index: u32,
        size: i32,
        format: VertexFormat,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    DrawArrays(Primitive, i32, i32),
}

#[derive(Debug, Clone)]
pub struct Record {
    pub at: Timestamp,
    pub command: Command,
}

/// Shared, append-only list of the commands a `HeadlessVisitor` received.
#[derive(Debug, Clone, Default)]
pub struct CommandLog(Rc<RefCell<Vec<Record>>>);

impl CommandLog {
    pub fn new() -> Self {
        CommandLog::default()
    }

    fn push(&self, command: Command) {
        self.0.borrow_mut().push(Record {
            at: Timestamp::now(),
            command,
        });
    }

    pub fn records(&self) -> Vec<Record> {
        self.0.borrow().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.0.borrow().iter().map(|v| v.command.clone()).collect()
    }

    /// Returns the commands matching `filter`, in the order they were issued.
    pub fn filter<F>(&self, filter: F) -> Vec<Command>
    where
        F: Fn(&Command) -> bool,
    {
        self.0
            .borrow()
            .iter()
            .map(|v| &v.command)
            .filter(|v| filter(*v))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Debug)]
struct HeadlessShader {
    kind: ShaderKind,
    source: String,
    compiled: bool,
    log: Option<String>,
}

#[derive(Debug, Default)]
struct HeadlessProgram {
    shaders: Vec<ShaderHandle>,
    linked: bool,
    log: Option<String>,
    attributes: Vec<String>,
}

pub struct HeadlessVisitor {
    log: CommandLog,
    program_handles: HandlePool,
    shader_handles: HandlePool,
    buffer_handles: HandlePool,
    programs: DataVec<HeadlessProgram>,
    shaders: DataVec<HeadlessShader>,
    buffers: DataVec<Vec<f32>>,
    binded_buffer: Option<BufferHandle>,
    binded_program: Option<ProgramHandle>,
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::with_log(CommandLog::new())
    }
}

impl HeadlessVisitor {
    pub fn new() -> Self {
        HeadlessVisitor::default()
    }

    /// Creates a visitor that records into `log`.
    pub fn with_log(log: CommandLog) -> Self {
        HeadlessVisitor {
            log,
            program_handles: HandlePool::new(),
            shader_handles: HandlePool::new(),
            buffer_handles: HandlePool::new(),
            programs: DataVec::new(),
            shaders: DataVec::new(),
            buffers: DataVec::new(),
            binded_buffer: None,
            binded_program: None,
        }
    }

    pub fn log(&self) -> CommandLog {
        self.log.clone()
    }

    fn program(&self, handle: ProgramHandle) -> Result<&HeadlessProgram> {
        self.programs
            .get(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))
    }

    fn shader(&self, handle: ShaderHandle) -> Result<&HeadlessShader> {
        self.shaders
            .get(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))
    }

    fn link(&self, handle: ProgramHandle) -> Result<::std::result::Result<Vec<String>, String>> {
        let program = self.program(handle)?;

        let mut vs = None;
        let mut fs = None;
        for &v in &program.shaders {
            let shader = self.shader(v)?;
            if !shader.compiled {
                return Ok(Err("ERROR: Attached shader is not compiled.".into()));
            }

            match shader.kind {
                ShaderKind::Vertex => vs = Some(shader),
                ShaderKind::Fragment => fs = Some(shader),
            }
        }

        let (vs, fs) = match (vs, fs) {
            (Some(vs), Some(fs)) => (vs, fs),
            (None, _) => return Ok(Err("ERROR: Missing vertex shader.".into())),
            (_, None) => return Ok(Err("ERROR: Missing fragment shader.".into())),
        };

        let outputs = declarations(&vs.source, "varying");
        for name in declarations(&fs.source, "varying") {
            if !outputs.contains(&name) {
                return Ok(Err(format!(
                    "ERROR: Varying `{}` is not written by the vertex shader.",
                    name
                )));
            }
        }

        Ok(Ok(declarations(&vs.source, "attribute")
            .into_iter()
            .map(String::from)
            .collect()))
    }
}

impl Visitor for HeadlessVisitor {
    fn clear_color(&mut self, color: Color) -> Result<()> {
        self.log.push(Command::ClearColor(color));
        Ok(())
    }

    fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.log.push(Command::Clear(mask));
        Ok(())
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let handle: ProgramHandle = self.program_handles.create();
        self.programs.create(handle, HeadlessProgram::default());
        self.log.push(Command::CreateProgram(handle));
        Ok(handle)
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.programs
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;
        self.program_handles.free(handle);

        if self.binded_program == Some(handle) {
            self.binded_program = None;
        }

        self.log.push(Command::DeleteProgram(handle));
        Ok(())
    }

    fn create_shader(&mut self, kind: ShaderKind) -> Result<ShaderHandle> {
        let handle: ShaderHandle = self.shader_handles.create();
        let shader = HeadlessShader {
            kind,
            source: String::new(),
            compiled: false,
            log: None,
        };

        self.shaders.create(handle, shader);
        self.log.push(Command::CreateShader(handle, kind));
        Ok(handle)
    }

    fn shader_source(&mut self, handle: ShaderHandle, source: &str) -> Result<()> {
        let shader = self
            .shaders
            .get_mut(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        shader.source = source.to_owned();
        self.log.push(Command::ShaderSource(handle));
        Ok(())
    }

    fn compile_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        let shader = self
            .shaders
            .get_mut(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        match compile(&shader.source) {
            Ok(()) => {
                shader.compiled = true;
                shader.log = None;
            }
            Err(err) => {
                shader.compiled = false;
                shader.log = Some(err);
            }
        }

        self.log.push(Command::CompileShader(handle));
        Ok(())
    }

    fn shader_compile_status(&self, handle: ShaderHandle) -> Result<bool> {
        Ok(self.shader(handle)?.compiled)
    }

    fn shader_info_log(&self, handle: ShaderHandle) -> Option<String> {
        self.shaders.get(handle).and_then(|v| v.log.clone())
    }

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.shaders
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;
        self.shader_handles.free(handle);
        self.log.push(Command::DeleteShader(handle));
        Ok(())
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        let kind = self.shader(shader)?.kind;
        let shaders = &self.shaders;
        let data = self
            .programs
            .get_mut(program)
            .ok_or_else(|| backend_err!("{} is invalid.", program))?;

        let occupied = data
            .shaders
            .iter()
            .any(|&v| shaders.get(v).map(|s| s.kind) == Some(kind));

        if occupied {
            return Err(backend_err!(
                "[Headless] A {:?} shader is already attached to {}.",
                kind,
                program
            ));
        }

        data.shaders.push(shader);
        self.log.push(Command::AttachShader(program, shader));
        Ok(())
    }

    fn link_program(&mut self, handle: ProgramHandle) -> Result<()> {
        let result = self.link(handle)?;
        let program = self
            .programs
            .get_mut(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        match result {
            Ok(attributes) => {
                program.linked = true;
                program.log = None;
                program.attributes = attributes;
            }
            Err(err) => {
                program.linked = false;
                program.log = Some(err);
                program.attributes.clear();
            }
        }

        self.log.push(Command::LinkProgram(handle));
        Ok(())
    }

    fn program_link_status(&self, handle: ProgramHandle) -> Result<bool> {
        Ok(self.program(handle)?.linked)
    }

    fn program_info_log(&self, handle: ProgramHandle) -> Option<String> {
        self.programs.get(handle).and_then(|v| v.log.clone())
    }

    fn use_program(&mut self, handle: ProgramHandle) -> Result<()> {
        if !self.program(handle)?.linked {
            return Err(backend_err!(
                "[Headless] The specified operation is not allowed in the current state."
            ));
        }

        self.binded_program = Some(handle);
        self.log.push(Command::UseProgram(handle));
        Ok(())
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        let handle: BufferHandle = self.buffer_handles.create();
        self.buffers.create(handle, Vec::new());
        self.log.push(Command::CreateBuffer(handle));
        Ok(handle)
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>) -> Result<()> {
        if let Some(v) = handle {
            if self.buffers.get(v).is_none() {
                return Err(backend_err!("{} is invalid.", v));
            }
        }

        self.binded_buffer = handle;
        self.log.push(Command::BindBuffer(target, handle));
        Ok(())
    }

    fn buffer_data(
        &mut self,
        target: BufferTarget,
        data: &[f32],
        usage: BufferUsage,
    ) -> Result<()> {
        let handle = self.binded_buffer.ok_or_else(|| {
            backend_err!("[Headless] There is no buffer bound to {:?}.", target)
        })?;

        let buffer = self
            .buffers
            .get_mut(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;

        buffer.clear();
        buffer.extend_from_slice(data);
        self.log.push(Command::BufferData(target, data.to_vec(), usage));
        Ok(())
    }

    fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        self.buffers
            .free(handle)
            .ok_or_else(|| backend_err!("{} is invalid.", handle))?;
        self.buffer_handles.free(handle);

        if self.binded_buffer == Some(handle) {
            self.binded_buffer = None;
        }

        self.log.push(Command::DeleteBuffer(handle));
        Ok(())
    }

    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        let program = self.program(program)?;
        if !program.linked {
            return Err(backend_err!(
                "[Headless] The specified operation is not allowed in the current state."
            ));
        }

        Ok(program
            .attributes
            .iter()
            .position(|v| v == name)
            .map(|v| v as i32)
            .unwrap_or(-1))
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
        if self.binded_buffer.is_none() {
            return Err(backend_err!(
                "[Headless] There is no buffer bound to {:?}.",
                BufferTarget::Array
            ));
        }

        if size < 1 || size > 4 || stride < 0 || offset < 0 {
            return Err(backend_err!("[Headless] A numeric argument is out of range."));
        }

        self.log.push(Command::VertexAttribPointer {
            index,
            size,
            format,
            normalized,
            stride,
            offset,
        });
        Ok(())
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) -> Result<()> {
        self.log.push(Command::EnableVertexAttribArray(index));
        Ok(())
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32) -> Result<()> {
        if self.binded_program.is_none() {
            return Err(backend_err!(
                "[Headless] The specified operation is not allowed in the current state."
            ));
        }

        if first < 0 || count < 0 {
            return Err(backend_err!("[Headless] A numeric argument is out of range."));
        }

        self.log.push(Command::DrawArrays(primitive, first, count));
        Ok(())
    }
}

/// Performs the handful of checks a headless context can do on its own: the
/// source must define `main` and keep its brackets balanced.
fn compile(source: &str) -> ::std::result::Result<(), String> {
    if source.trim().is_empty() {
        return Err("ERROR: 0:1: '' : syntax error, empty source".into());
    }

    let mut depth = (0i32, 0i32);
    for (line, text) in source.lines().enumerate() {
        for c in text.chars() {
            match c {
                '{' => depth.0 += 1,
                '}' => depth.0 -= 1,
                '(' => depth.1 += 1,
                ')' => depth.1 -= 1,
                _ => {}
            }

            if depth.0 < 0 || depth.1 < 0 {
                return Err(format!("ERROR: 0:{}: '{}' : syntax error", line + 1, c));
            }
        }
    }

    if depth != (0, 0) {
        return Err("ERROR: 0:0: '' : syntax error, unexpected end of source".into());
    }

    if !source.contains("void main") {
        return Err("ERROR: 0:0: 'main' : function not defined".into());
    }

    Ok(())
}

/// Returns the names of the global variables declared with `qualifier`.
fn declarations<'a>(source: &'a str, qualifier: &str) -> Vec<&'a str> {
    source
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            if tokens.next() != Some(qualifier) {
                return None;
            }

            tokens
                .last()
                .map(|v| v.trim_end_matches(';'))
                .filter(|v| !v.is_empty())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graphics::shaders::{FRAGMENT_SHADER, VERTEX_SHADER};

    #[test]
    fn compile_diagnostics() {
        assert!(compile(VERTEX_SHADER).is_ok());
        assert!(compile(FRAGMENT_SHADER).is_ok());
        assert!(compile("").is_err());
        assert!(compile("void main() {").is_err());
        assert!(compile("void main() }{").is_err());
        assert!(compile("void entry() {}").is_err());
    }

    #[test]
    fn declared_names() {
        assert_eq!(
            declarations(VERTEX_SHADER, "attribute"),
            vec!["vertPosition", "vertColor"]
        );
        assert_eq!(declarations(FRAGMENT_SHADER, "varying"), vec!["fragColor"]);
        assert!(declarations(FRAGMENT_SHADER, "attribute").is_empty());
    }

    #[test]
    fn attach_twice() {
        let mut visitor = HeadlessVisitor::new();
        let program = visitor.create_program().unwrap();
        let vs = visitor.create_shader(ShaderKind::Vertex).unwrap();
        let vs2 = visitor.create_shader(ShaderKind::Vertex).unwrap();
        visitor.attach_shader(program, vs).unwrap();
        assert!(visitor.attach_shader(program, vs2).is_err());
    }

    #[test]
    fn buffer_requires_binding() {
        let mut visitor = HeadlessVisitor::new();
        let log = visitor.log();
        assert!(visitor
            .buffer_data(BufferTarget::Array, &[0.0], BufferUsage::Static)
            .is_err());

        let buffer = visitor.create_buffer().unwrap();
        visitor.bind_buffer(BufferTarget::Array, Some(buffer)).unwrap();
        visitor
            .buffer_data(BufferTarget::Array, &[0.0], BufferUsage::Static)
            .unwrap();
        visitor.delete_buffer(buffer).unwrap();
        assert!(visitor.bind_buffer(BufferTarget::Array, Some(buffer)).is_err());
        assert_eq!(log.len(), 4);
    }
}
