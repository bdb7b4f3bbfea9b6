use serde::{Deserialize, Serialize};

use crate::utils::prelude::Rgba;

/// Selects one of the built-in palettes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteKind {
    Light,
    Dark,
}

impl Default for PaletteKind {
    fn default() -> Self {
        PaletteKind::Light
    }
}

/// Named colors the scene is painted with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub red: Rgba,
    pub green: Rgba,
    pub blue: Rgba,
    pub yellow: Rgba,
    pub cyan: Rgba,
    pub magenta: Rgba,
}

impl Palette {
    pub const fn light() -> Self {
        Palette {
            background: Rgba::rgb(252, 250, 242),
            red: Rgba::rgb(208, 16, 76),
            green: Rgba::rgb(34, 125, 81),
            blue: Rgba::rgb(46, 169, 223),
            yellow: Rgba::rgb(247, 194, 66),
            cyan: Rgba::rgb(168, 216, 185),
            magenta: Rgba::rgb(102, 50, 124),
        }
    }

    pub const fn dark() -> Self {
        Palette {
            background: Rgba::rgb(28, 28, 28),
            red: Rgba::rgb(232, 48, 108),
            green: Rgba::rgb(66, 184, 131),
            blue: Rgba::rgb(88, 178, 220),
            yellow: Rgba::rgb(255, 196, 8),
            cyan: Rgba::rgb(129, 199, 212),
            magenta: Rgba::rgb(180, 129, 187),
        }
    }
}

impl From<PaletteKind> for Palette {
    fn from(kind: PaletteKind) -> Self {
        match kind {
            PaletteKind::Light => Palette::light(),
            PaletteKind::Dark => Palette::dark(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Palette::from(PaletteKind::default()), Palette::light());
        assert_eq!(Palette::from(PaletteKind::Dark), Palette::dark());

        let kind: PaletteKind = serde_json::from_str("\"Dark\"").unwrap();
        assert_eq!(kind, PaletteKind::Dark);
    }
}
