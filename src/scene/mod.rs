//! The animated scene: one triangle outline redrawn at a fixed rate.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::application::settings::{SceneParams, Settings};
use crate::application::sys;
use crate::errors::*;
use crate::graphics::backends::{self, Visitor};
use crate::graphics::palette::Palette;
use crate::graphics::prelude::*;
use crate::math::prelude::Vector2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SceneState {
    Uninitialized,
    Running,
}

/// Stops a running render loop. The loop checks it at the top of each tick.
#[derive(Debug, Clone, Default)]
pub struct RenderHandle(Rc<Cell<bool>>);

impl RenderHandle {
    pub fn new() -> Self {
        RenderHandle::default()
    }

    #[inline]
    pub fn stop(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.get()
    }
}

pub struct SceneManager {
    graphic: GraphicService,
    palette: Palette,
    params: SceneParams,
    state: SceneState,
    frames: u64,
}

impl SceneManager {
    /// Acquires the rendering context described by `settings` and prepares the
    /// program.
    pub fn init(settings: &Settings) -> Result<Self> {
        let visitor = if settings.headless {
            backends::new_headless()
        } else {
            backends::new(&settings.canvas)?
        };

        SceneManager::with_visitor(settings, visitor)
    }

    /// Sets the background, clears the surface and compiles, links and
    /// activates the shader pair on `visitor`.
    pub fn with_visitor(settings: &Settings, visitor: Box<dyn Visitor>) -> Result<Self> {
        let mut graphic = GraphicService::new(visitor, settings.canvas.size, settings.graphics);
        let palette = Palette::from(settings.scene.palette);

        graphic.clear_color(palette.background)?;
        graphic.clear(ClearMask::COLOR | ClearMask::DEPTH)?;

        graphic.init_program()?;
        graphic.create_shader(ShaderKind::Vertex, VERTEX_SHADER)?;
        graphic.create_shader(ShaderKind::Fragment, FRAGMENT_SHADER)?;
        graphic.start_program()?;

        Ok(SceneManager {
            graphic,
            palette,
            params: settings.scene,
            state: SceneState::Uninitialized,
            frames: 0,
        })
    }

    #[inline]
    pub fn state(&self) -> SceneState {
        self.state
    }

    /// Returns the number of frames drawn so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn graphic(&self) -> &GraphicService {
        &self.graphic
    }

    /// Delay between two ticks of the render loop. A zero fps is treated as one.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.params.fps.max(1)))
    }

    /// Clears the color buffer and redraws the scene once.
    pub fn frame(&mut self) -> Result<()> {
        self.graphic.clear(ClearMask::COLOR)?;
        self.draw()?;
        self.frames += 1;
        debug!("Drew frame {}.", self.frames);
        Ok(())
    }

    /// Starts the render loop. On the web this returns right away and the loop
    /// runs on timer and animation-frame callbacks; natively it blocks until the
    /// loop stops.
    pub fn render(self) -> Result<RenderHandle> {
        self.render_with(RenderHandle::new())
    }

    /// Starts the render loop, which stops at the next tick once `handle` is
    /// stopped. Returns `handle`.
    pub fn render_with(mut self, handle: RenderHandle) -> Result<RenderHandle> {
        self.state = SceneState::Running;

        let stop = handle.clone();
        let interval = self.frame_interval();

        info!(
            "Start rendering every {}ms (max frames: {:?}).",
            interval.as_millis(),
            self.params.max_frames
        );

        sys::run_forever(interval, move || {
            if stop.is_stopped() || self.exhausted() {
                stop.stop();
                return Ok(false);
            }

            self.frame()?;

            if self.exhausted() {
                stop.stop();
                return Ok(false);
            }

            Ok(true)
        })?;

        Ok(handle)
    }

    fn exhausted(&self) -> bool {
        self.params
            .max_frames
            .map(|v| self.frames >= v)
            .unwrap_or(false)
    }

    fn draw(&mut self) -> Result<()> {
        let colors = (self.palette.red, self.palette.green, self.palette.blue);
        self.graphic.draw_triangle_outline(
            Vector2::new(300.0, 110.0),
            Vector2::new(80.0, 490.0),
            Vector2::new(520.0, 490.0),
            colors,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn handle_is_shared() {
        let handle = RenderHandle::new();
        let other = handle.clone();
        assert!(!other.is_stopped());

        handle.stop();
        assert!(other.is_stopped());
    }
}
