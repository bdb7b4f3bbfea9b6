//! Functions for loading settings.

use serde::{Deserialize, Serialize};

use crate::errors::*;
use crate::graphics::palette::PaletteKind;
use crate::graphics::types::{BufferPolicy, BufferUsage};
use crate::math::prelude::Vector2;

/// A structure containing configuration data for the demo, which are used to
/// locate the drawing surface and tune the renderer and the redraw loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas: CanvasParams,
    pub scene: SceneParams,
    pub graphics: GraphicsParams,
    /// Draws into a headless context instead of acquiring a real one.
    pub headless: bool,
}

impl Settings {
    /// Parses settings from JSON. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Settings> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasParams {
    /// Sets the id of the canvas element to draw into.
    pub id: String,
    /// Sets the size in pixels of the canvas. Pixel coordinates are
    /// relative to this size.
    pub size: Vector2<u32>,
}

impl Default for CanvasParams {
    fn default() -> Self {
        CanvasParams {
            id: "canvas".to_owned(),
            size: Vector2::new(600, 600),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Redraws per second. The interval between two frames is `1000 / fps`
    /// milliseconds.
    pub fps: u32,
    /// Stops the redraw loop after this many frames. The loop runs until
    /// stopped explicitly if `None`.
    pub max_frames: Option<u64>,
    pub palette: PaletteKind,
}

impl Default for SceneParams {
    fn default() -> Self {
        SceneParams {
            fps: 10,
            max_frames: None,
            palette: PaletteKind::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsParams {
    /// Usage hint of uploaded vertex buffers.
    pub usage: BufferUsage,
    pub policy: BufferPolicy,
}

impl Default for GraphicsParams {
    fn default() -> Self {
        GraphicsParams {
            usage: BufferUsage::Dynamic,
            policy: BufferPolicy::PerDraw,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_json() {
        let settings = Settings::from_json(
            r#"{ "scene": { "fps": 30, "palette": "Dark" }, "graphics": { "policy": "Pooled" } }"#,
        )
        .unwrap();

        assert_eq!(settings.scene.fps, 30);
        assert_eq!(settings.scene.palette, PaletteKind::Dark);
        assert_eq!(settings.scene.max_frames, None);
        assert_eq!(settings.graphics.policy, BufferPolicy::Pooled);
        assert_eq!(settings.graphics.usage, BufferUsage::Dynamic);
        assert_eq!(settings.canvas, CanvasParams::default());
        assert!(!settings.headless);
    }

    #[test]
    fn canvas_size() {
        let settings = Settings::from_json(r#"{ "canvas": { "size": [800, 400] } }"#).unwrap();
        assert_eq!(settings.canvas.size, Vector2::new(800, 400));
        assert_eq!(settings.canvas.id, "canvas");
    }

    #[test]
    fn malformed() {
        match Settings::from_json("{ \"scene\": 10 }") {
            Err(Error::Config(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
