//! The entry points exported to JavaScript.

use wasm_bindgen::prelude::*;

use crate::errors::Error;
use crate::scene::{RenderHandle, SceneManager};

use super::settings::Settings;

fn into_js(err: Error) -> JsValue {
    JsValue::from_str(&format!("{}", err))
}

/// A running render loop.
#[wasm_bindgen]
pub struct RenderLoop(RenderHandle);

#[wasm_bindgen]
impl RenderLoop {
    /// Stops redrawing at the next tick.
    pub fn stop(&self) {
        self.0.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.0.is_stopped()
    }
}

/// Starts redrawing the scene. `config` is an optional JSON encoded `Settings`.
#[wasm_bindgen(js_name = runScene)]
pub fn run_scene(config: Option<String>) -> Result<RenderLoop, JsValue> {
    super::init();

    let settings = match config {
        Some(v) => Settings::from_json(&v).map_err(into_js)?,
        None => Settings::default(),
    };

    let scene = SceneManager::init(&settings).map_err(into_js)?;
    scene.render().map(RenderLoop).map_err(into_js)
}

/// Draws a single triangle into the canvas with id `canvas_id`.
#[wasm_bindgen(js_name = drawOnce)]
pub fn draw_once(canvas_id: Option<String>) -> Result<(), JsValue> {
    super::init();

    let mut settings = Settings::default();
    if let Some(id) = canvas_id {
        settings.canvas.id = id;
    }

    super::oneshot::run(&settings).map(|_| ()).map_err(into_js)
}
