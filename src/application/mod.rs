//! Platform glue and the two ways of putting something on the canvas.
//!
//! `SceneManager` (in `crate::scene`) keeps redrawing an animated scene, while
//! `oneshot::draw_once` draws a single frame and returns.

pub mod oneshot;
pub mod settings;
pub mod sys;

#[cfg(target_arch = "wasm32")]
pub mod launcher;

pub use self::settings::Settings;

/// Installs the platform logger and panic hook.
pub fn init() {
    sys::init();
}
