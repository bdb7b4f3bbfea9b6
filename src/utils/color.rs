use serde::{Deserialize, Serialize};

/// Alpha used when a `Rgba` carries none.
pub const DEFAULT_COLOR_ALPHA: f32 = 1.0;

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

/// A color as it is written down in palettes: 8-bit RGB channels with a
/// fractional alpha in [0, 1].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    DEFAULT_COLOR_ALPHA
}

impl Rgba {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba {
            r,
            g,
            b,
            a: DEFAULT_COLOR_ALPHA,
        }
    }

    /// Returns the alpha, falling back to `DEFAULT_COLOR_ALPHA` when it is
    /// zero or not a number.
    #[inline]
    pub fn alpha(&self) -> f32 {
        if self.a == 0.0 || self.a.is_nan() {
            DEFAULT_COLOR_ALPHA
        } else {
            self.a
        }
    }
}

impl From<Rgba> for Color {
    fn from(v: Rgba) -> Self {
        Color(
            f32::from(v.r) / 255.0,
            f32::from(v.g) / 255.0,
            f32::from(v.b) / 255.0,
            v.alpha(),
        )
    }
}

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

impl Color {
    /// Truncate alpha channel.
    #[inline]
    pub fn rgb(&self) -> [f32; 3] {
        [self.0, self.1, self.2]
    }

    pub fn white() -> Self {
        Color(1.0, 1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Color(0.0, 0.0, 0.0, 1.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scale_channels() {
        let c: Color = Rgba::new(255, 0, 51, 0.5).into();
        assert_eq!(c, Color(1.0, 0.0, 0.2, 0.5));
        assert_eq!(c.rgb(), [1.0, 0.0, 0.2]);
    }

    #[test]
    fn falsy_alpha() {
        assert_eq!(Color::from(Rgba::new(0, 0, 0, 0.0)).3, 1.0);
        assert_eq!(Color::from(Rgba::new(0, 0, 0, std::f32::NAN)).3, 1.0);
        assert_eq!(Color::from(Rgba::new(0, 0, 0, 0.25)).3, 0.25);
    }

    #[test]
    fn deserialize_without_alpha() {
        let c: Rgba = serde_json::from_str(r#"{ "r": 208, "g": 16, "b": 76 }"#).unwrap();
        assert_eq!(c, Rgba::rgb(208, 16, 76));
    }
}
