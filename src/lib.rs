//! # What is This?
//!
//! A tiny vector drawing demo for the browser. It opens a WebGL context on a
//! canvas, compiles one vertex/fragment shader pair and draws colored lines and
//! triangles, either once or on a fixed-rate redraw loop.
//!
//! Points are given in canvas pixels (origin top-left, Y down) and mapped into
//! normalized device coordinates before they are uploaded. Colors are given as
//! 8-bit RGB with a fractional alpha.
//!
//! ```rust
//! use vecdraw::prelude::*;
//!
//! let mut settings = Settings::default();
//! settings.headless = true;
//!
//! let mut scene = SceneManager::init(&settings).unwrap();
//! scene.frame().unwrap();
//! assert_eq!(scene.frames(), 1);
//! ```
//!
//! Targeting `wasm32`, the crate exports `runScene` and `drawOnce` to JavaScript.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[macro_use]
pub mod errors;
#[macro_use]
pub mod utils;
pub mod application;
pub mod graphics;
pub mod math;
pub mod scene;

pub mod prelude {
    pub use crate::application::oneshot::draw_once;
    pub use crate::application::settings::{CanvasParams, GraphicsParams, SceneParams, Settings};
    pub use crate::errors::{Error, Result};
    pub use crate::graphics::prelude::*;
    pub use crate::math::prelude::*;
    pub use crate::scene::{RenderHandle, SceneManager, SceneState};
    pub use crate::utils::prelude::{Color, Rgba};
}
