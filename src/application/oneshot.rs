//! Draws one hard-coded triangle and returns, without a render loop.

use crate::errors::*;
use crate::graphics::backends;
use crate::graphics::prelude::*;
use crate::utils::prelude::Rgba;

use super::settings::Settings;

/// A triangle in normalized device coordinates with yellow, magenta and cyan
/// corners.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [0.0, 0.5],
        color: [1.0, 1.0, 0.0],
    },
    Vertex {
        position: [-0.5, -0.5],
        color: [1.0, 0.0, 1.0],
    },
    Vertex {
        position: [0.5, -0.5],
        color: [0.0, 1.0, 1.0],
    },
];

/// Clears the surface to white, prepares the shader pair and draws `TRIANGLE`.
pub fn draw_once(graphic: &mut GraphicService) -> Result<()> {
    graphic.clear_color(Rgba::rgb(255, 255, 255))?;
    graphic.clear(ClearMask::COLOR | ClearMask::DEPTH)?;

    graphic.init_program()?;
    graphic.create_shader(ShaderKind::Vertex, VERTEX_SHADER)?;
    graphic.create_shader(ShaderKind::Fragment, FRAGMENT_SHADER)?;
    graphic.start_program()?;

    graphic.draw_vertices(Primitive::Triangles, &TRIANGLE)
}

/// Acquires the context described by `settings` and draws `TRIANGLE` into it.
pub fn run(settings: &Settings) -> Result<GraphicService> {
    let visitor = if settings.headless {
        backends::new_headless()
    } else {
        backends::new(&settings.canvas)?
    };

    let mut graphic = GraphicService::new(visitor, settings.canvas.size, settings.graphics);
    draw_once(&mut graphic)?;
    info!("Drew one triangle.");
    Ok(graphic)
}
