//! Color types and palettes.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor`, clamped to [0, 1].
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * factor) as u8,
            g: (self.g as f32 * factor) as u8,
            b: (self.b as f32 * factor) as u8,
        }
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Named star color palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    /// White, soft gray, cream, and pale blue.
    #[default]
    Classic,
    /// Whites shading into cream and gold.
    Warm,
    /// Whites shading into ice blue and lavender.
    Cool,
    /// Grayscale only.
    Mono,
}

const CLASSIC: [Rgb; 4] = [
    Rgb::new(255, 255, 255),
    Rgb::new(175, 175, 175),
    Rgb::new(255, 255, 204),
    Rgb::new(204, 216, 255),
];

const WARM: [Rgb; 4] = [
    Rgb::new(255, 255, 255),
    Rgb::new(255, 255, 204),
    Rgb::new(255, 224, 178),
    Rgb::new(255, 213, 128),
];

const COOL: [Rgb; 4] = [
    Rgb::new(255, 255, 255),
    Rgb::new(204, 216, 255),
    Rgb::new(179, 229, 252),
    Rgb::new(216, 204, 255),
];

const MONO: [Rgb; 3] = [
    Rgb::new(255, 255, 255),
    Rgb::new(175, 175, 175),
    Rgb::new(110, 110, 110),
];

impl Palette {
    /// The colors stars are drawn from.
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            Palette::Classic => &CLASSIC,
            Palette::Warm => &WARM,
            Palette::Cool => &COOL,
            Palette::Mono => &MONO,
        }
    }

    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            Palette::Classic => Palette::Warm,
            Palette::Warm => Palette::Cool,
            Palette::Cool => Palette::Mono,
            Palette::Mono => Palette::Classic,
        }
    }
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Rgb::new((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
