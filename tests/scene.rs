extern crate env_logger;
extern crate vecdraw;

use vecdraw::application::oneshot::{self, TRIANGLE};
use vecdraw::graphics::backends::headless::{Command, CommandLog, HeadlessVisitor};
use vecdraw::graphics::backends::Visitor;
use vecdraw::prelude::*;

fn settings(fps: u32, max_frames: Option<u64>) -> Settings {
    let _ = env_logger::try_init();

    let mut settings = Settings::default();
    settings.headless = true;
    settings.scene.fps = fps;
    settings.scene.max_frames = max_frames;
    settings
}

fn scene(settings: &Settings) -> (SceneManager, CommandLog) {
    let log = CommandLog::new();
    let visitor = HeadlessVisitor::with_log(log.clone());
    let scene = SceneManager::with_visitor(settings, Box::new(visitor)).unwrap();
    (scene, log)
}

fn count<F: Fn(&Command) -> bool>(log: &CommandLog, filter: F) -> usize {
    log.filter(filter).len()
}

fn is_draw(v: &Command) -> bool {
    match v {
        Command::DrawArrays(..) => true,
        _ => false,
    }
}

fn is_clear(v: &Command) -> bool {
    match v {
        Command::Clear(..) => true,
        _ => false,
    }
}

#[test]
fn context_is_unavailable_natively() {
    let mut settings = settings(10, None);
    settings.headless = false;

    match SceneManager::init(&settings) {
        Err(Error::ContextUnavailable(msg)) => assert!(msg.contains("canvas")),
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a context was acquired outside a browser"),
    }

    match oneshot::run(&settings) {
        Err(Error::ContextUnavailable(_)) => {}
        Err(err) => panic!("unexpected {:?}", err),
        Ok(_) => panic!("a context was acquired outside a browser"),
    }
}

#[test]
fn setup() {
    let (scene, log) = scene(&settings(10, None));
    assert_eq!(scene.state(), SceneState::Uninitialized);
    assert_eq!(scene.frames(), 0);

    let commands = log.commands();
    let background = Palette::light().background;
    assert_eq!(commands[0], Command::ClearColor(Color::from(background)));
    assert_eq!(commands[1], Command::Clear(ClearMask::COLOR | ClearMask::DEPTH));

    let program = scene.graphic().program().unwrap();
    assert_eq!(commands[2], Command::CreateProgram(program));
    assert_eq!(commands.last(), Some(&Command::UseProgram(program)));
    assert_eq!(count(&log, is_draw), 0);
}

#[test]
fn dark_palette() {
    let mut settings = settings(10, None);
    settings.scene.palette = PaletteKind::Dark;

    let (_, log) = scene(&settings);
    let background = Palette::dark().background;
    assert_eq!(log.commands()[0], Command::ClearColor(Color::from(background)));
}

#[test]
fn frame() {
    let (mut scene, log) = scene(&settings(10, None));
    log.clear();

    scene.frame().unwrap();
    assert_eq!(scene.frames(), 1);

    let commands = log.commands();
    assert_eq!(commands[0], Command::Clear(ClearMask::COLOR));
    assert_eq!(
        log.filter(is_draw),
        vec![Command::DrawArrays(Primitive::LineLoop, 0, 3)]
    );

    let palette = Palette::light();
    let record = commands
        .iter()
        .filter_map(|v| match v {
            Command::BufferData(_, data, _) => Some(data.clone()),
            _ => None,
        })
        .next()
        .unwrap();

    let expected = Vertex::flatten(&[
        Vertex::new(pixel_to_ndc(Vector2::new(300.0, 110.0), Vector2::new(600, 600)), palette.red),
        Vertex::new(pixel_to_ndc(Vector2::new(80.0, 490.0), Vector2::new(600, 600)), palette.green),
        Vertex::new(pixel_to_ndc(Vector2::new(520.0, 490.0), Vector2::new(600, 600)), palette.blue),
    ]);
    assert_eq!(&record[..], &expected[..]);
}

#[test]
fn frame_interval() {
    let (scene, _) = scene(&settings(10, None));
    assert_eq!(scene.frame_interval().as_millis(), 100);

    let (scene, _) = self::scene(&settings(0, None));
    assert_eq!(scene.frame_interval().as_millis(), 1000);

    let (scene, _) = self::scene(&settings(30, None));
    assert_eq!(scene.frame_interval().as_millis(), 33);
}

#[test]
fn render_at_fixed_rate() {
    let (scene, log) = scene(&settings(10, Some(3)));
    log.clear();

    let handle = scene.render().unwrap();
    assert!(handle.is_stopped());

    assert_eq!(count(&log, is_draw), 3);

    let ticks: Vec<_> = log
        .records()
        .into_iter()
        .filter(|v| v.command == Command::Clear(ClearMask::COLOR))
        .map(|v| v.at)
        .collect();

    assert_eq!(ticks.len(), 3);
    for pair in ticks.windows(2) {
        assert!((pair[1] - pair[0]).as_millis() >= 100);
    }
}

#[test]
fn render_releases_scene() {
    let (scene, log) = scene(&settings(100, Some(1)));
    let program = scene.graphic().program().unwrap();
    log.clear();

    scene.render().unwrap();

    let commands = log.commands();
    assert_eq!(count(&log, is_draw), 1);
    assert_eq!(commands.last(), Some(&Command::DeleteProgram(program)));
}

/// Forwards to a headless context and stops `handle` after `remaining` draws.
struct StopAfter {
    inner: HeadlessVisitor,
    handle: RenderHandle,
    remaining: u32,
}

impl Visitor for StopAfter {
    fn clear_color(&mut self, color: Color) -> Result<()> {
        self.inner.clear_color(color)
    }

    fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.inner.clear(mask)
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        self.inner.create_program()
    }

    fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.inner.delete_program(handle)
    }

    fn create_shader(&mut self, kind: ShaderKind) -> Result<ShaderHandle> {
        self.inner.create_shader(kind)
    }

    fn shader_source(&mut self, handle: ShaderHandle, source: &str) -> Result<()> {
        self.inner.shader_source(handle, source)
    }

    fn compile_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.inner.compile_shader(handle)
    }

    fn shader_compile_status(&self, handle: ShaderHandle) -> Result<bool> {
        self.inner.shader_compile_status(handle)
    }

    fn shader_info_log(&self, handle: ShaderHandle) -> Option<String> {
        self.inner.shader_info_log(handle)
    }

    fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        self.inner.delete_shader(handle)
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) -> Result<()> {
        self.inner.attach_shader(program, shader)
    }

    fn link_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.inner.link_program(handle)
    }

    fn program_link_status(&self, handle: ProgramHandle) -> Result<bool> {
        self.inner.program_link_status(handle)
    }

    fn program_info_log(&self, handle: ProgramHandle) -> Option<String> {
        self.inner.program_info_log(handle)
    }

    fn use_program(&mut self, handle: ProgramHandle) -> Result<()> {
        self.inner.use_program(handle)
    }

    fn create_buffer(&mut self) -> Result<BufferHandle> {
        self.inner.create_buffer()
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: Option<BufferHandle>) -> Result<()> {
        self.inner.bind_buffer(target, handle)
    }

    fn buffer_data(&mut self, target: BufferTarget, data: &[f32], usage: BufferUsage) -> Result<()> {
        self.inner.buffer_data(target, data, usage)
    }

    fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        self.inner.delete_buffer(handle)
    }

    fn attrib_location(&self, program: ProgramHandle, name: &str) -> Result<i32> {
        self.inner.attrib_location(program, name)
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
        self.inner
            .vertex_attrib_pointer(index, size, format, normalized, stride, offset)
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) -> Result<()> {
        self.inner.enable_vertex_attrib_array(index)
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: i32, count: i32) -> Result<()> {
        self.inner.draw_arrays(primitive, first, count)?;
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.handle.stop();
        }

        Ok(())
    }
}

#[test]
fn stop_between_ticks() {
    let settings = settings(100, None);
    let handle = RenderHandle::new();
    let visitor = StopAfter {
        inner: HeadlessVisitor::new(),
        handle: handle.clone(),
        remaining: 2,
    };

    let log = visitor.inner.log();
    let scene = SceneManager::with_visitor(&settings, Box::new(visitor)).unwrap();

    let handle = scene.render_with(handle).unwrap();
    assert!(handle.is_stopped());
    assert_eq!(count(&log, is_draw), 2);
}

#[test]
fn stop_before_render() {
    let (scene, log) = scene(&settings(100, None));
    log.clear();

    let handle = RenderHandle::new();
    handle.stop();

    scene.render_with(handle).unwrap();
    assert_eq!(count(&log, is_draw), 0);
    assert_eq!(count(&log, is_clear), 0);
}

#[test]
fn render_without_frames() {
    let (scene, log) = scene(&settings(10, Some(0)));
    log.clear();

    let handle = scene.render().unwrap();
    assert!(handle.is_stopped());
    assert_eq!(count(&log, is_draw), 0);
    assert_eq!(count(&log, is_clear), 0);
}

#[test]
fn draw_once() {
    let _ = env_logger::try_init();

    let visitor = HeadlessVisitor::new();
    let log = visitor.log();
    let mut graphic = GraphicService::new(
        Box::new(visitor),
        Vector2::new(600, 600),
        GraphicsParams::default(),
    );

    oneshot::draw_once(&mut graphic).unwrap();

    let commands = log.commands();
    assert_eq!(commands[0], Command::ClearColor(Color(1.0, 1.0, 1.0, 1.0)));
    assert_eq!(
        log.filter(is_draw),
        vec![Command::DrawArrays(Primitive::Triangles, 0, 3)]
    );

    let uploaded: Vec<_> = commands
        .into_iter()
        .filter_map(|v| match v {
            Command::BufferData(_, data, _) => Some(data),
            _ => None,
        })
        .collect();
    assert_eq!(uploaded.len(), 1);
    assert_eq!(&uploaded[0][..], &Vertex::flatten(&TRIANGLE)[..]);
}

#[test]
fn run_headless() {
    let graphic = oneshot::run(&settings(10, None)).unwrap();
    let info = graphic.info();
    assert_eq!(info.drawcalls, 1);
    assert_eq!(info.vertices, 3);
    assert_eq!(info.alive_buffers, 0);
}
