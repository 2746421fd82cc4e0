//! Engine option surfaces.

use serde::{Deserialize, Serialize};

use crate::color::Palette;

/// Intensity weights for the trail sparkle tiers. Each pointer-move event
/// spawns one sparkle per tier; the weight controls jitter, lifespan, and
/// visual emphasis.
pub const TRAIL_TIERS: [f32; 9] = [1.0, 0.9, 0.8, 0.5, 0.25, 0.6, 0.4, 0.3, 0.2];

/// Options for the ambient field engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOptions {
    /// Number of stars in the field.
    pub count: usize,
    /// Fraction of the viewport added on every side when placing anchors,
    /// so stars can drift in from just off screen.
    pub spawn_margin: f32,
    /// Multiplier on the scroll contribution to the parallax offset.
    pub parallax_damping: f32,
    /// Time after engine start before parallax engages, in milliseconds.
    pub parallax_warmup_ms: u64,
    /// Star color palette.
    pub palette: Palette,
    /// Probability that a star relocates on a fade-out-to-zero transition.
    pub respawn_probability: f64,
    /// Per-frame opacity delta range, `[min, max)`.
    pub fade_speed: (f32, f32),
    /// Star radius range, `[min, max)`.
    pub size: (f32, f32),
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            count: 200,
            spawn_margin: 0.2,
            parallax_damping: 0.3,
            parallax_warmup_ms: 2000,
            palette: Palette::Classic,
            respawn_probability: 0.7,
            fade_speed: (0.005, 0.025),
            size: (1.0, 3.0),
        }
    }
}

/// How trail sparkle colors are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Pick from the configured palette at full alpha.
    #[default]
    Palette,
    /// Procedural hue with the tier weight as alpha.
    Hue,
}

/// Options for the trail sparkle engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailOptions {
    /// Scale applied to `1 - weight` to get a tier's jitter radius.
    pub jitter_scale: f32,
    /// Upper bound for a full-weight tier's life, in milliseconds.
    pub base_life_ms: u64,
    /// Sparkle size range, `[min, max)`.
    pub size: (f32, f32),
    /// How sparkle colors are chosen.
    pub color_mode: ColorMode,
    /// Palette used by [`ColorMode::Palette`].
    pub palette: Palette,
    /// Tiers at or above this weight receive a vertical drift target.
    pub drift_threshold: f32,
    /// Maximum magnitude of a drift target.
    pub drift_range: f32,
    /// Optional cap on live sparkles; the oldest is evicted on overflow.
    /// `None` accepts unbounded growth under sustained pointer movement.
    pub max_live: Option<usize>,
}

impl Default for TrailOptions {
    fn default() -> Self {
        Self {
            jitter_scale: 50.0,
            base_life_ms: 1000,
            size: (1.0, 5.0),
            color_mode: ColorMode::Palette,
            palette: Palette::Classic,
            drift_threshold: 0.5,
            drift_range: 20.0,
            max_live: None,
        }
    }
}
