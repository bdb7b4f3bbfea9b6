//! This module contains the math utils that mainly comes from `cgmath`, plus the
//! mapping from canvas pixels to normalized device coordinates.

pub use cgmath::*;

pub mod transform;

pub mod prelude {
    pub use super::transform::{pixel_to_ndc, to_normalized};
    pub use cgmath::Vector2;
}
