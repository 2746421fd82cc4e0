//! Ambient star field engine.
//!
//! Owns a fixed pool of stars, each with autonomous fade and drift
//! behavior, and repaints the whole background every frame. Pointer and
//! scroll input only ever land in the engine's [`InputState`]; stars read
//! it indirectly during the tick pass.

use byeol_core::{FieldOptions, Rgb};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::{OptionsError, check_factor, check_range};
use crate::input::InputState;
use crate::sched::Tickable;
use crate::surface::Surface;

/// Span above zero that a star's opacity ceiling is drawn from.
const MAX_OPACITY_SPAN: f32 = 0.8;

/// Range a star's parallax depth is drawn from.
const PARALLAX_DEPTH: (f32, f32) = (0.02, 0.17);

/// A single background star.
#[derive(Debug, Clone)]
pub struct Star {
    /// Anchor position, stable across parallax offsets.
    pub base_x: f32,
    pub base_y: f32,
    /// Rendered position for the current frame.
    pub x: f32,
    pub y: f32,
    /// Disc radius.
    pub size: f32,
    pub opacity: f32,
    /// +1 fading in, -1 fading out.
    pub fade_direction: f32,
    /// Per-frame opacity delta.
    pub fade_speed: f32,
    /// Opacity ceiling for the current lifecycle.
    pub max_opacity: f32,
    pub color: Rgb,
    /// Sensitivity to pointer and scroll offsets.
    pub parallax_depth: f32,
}

impl Star {
    fn random(opts: &FieldOptions, input: &InputState, rng: &mut SmallRng) -> Self {
        let (base_x, base_y) = random_anchor(opts, input, rng);
        Self {
            base_x,
            base_y,
            x: base_x,
            y: base_y,
            size: rng.gen_range(opts.size.0..opts.size.1),
            opacity: 0.0,
            fade_direction: 1.0,
            fade_speed: rng.gen_range(opts.fade_speed.0..opts.fade_speed.1),
            max_opacity: rng.gen_range(0.0..MAX_OPACITY_SPAN),
            color: random_color(opts, rng),
            parallax_depth: rng.gen_range(PARALLAX_DEPTH.0..PARALLAX_DEPTH.1),
        }
    }
}

/// The ambient field engine.
pub struct FieldEngine {
    opts: FieldOptions,
    stars: Vec<Star>,
    input: InputState,
    rng: SmallRng,
    started_at_ms: Option<u64>,
    parallax_override: Option<bool>,
    parallax_active: bool,
}

impl FieldEngine {
    /// Build an engine over a `width` x `height` viewport.
    pub fn new(opts: FieldOptions, width: f32, height: f32) -> Result<Self, OptionsError> {
        Self::with_rng(opts, width, height, SmallRng::from_entropy())
    }

    /// Same as [`FieldEngine::new`] with a caller-provided RNG, so tests
    /// run deterministically.
    pub fn with_rng(
        opts: FieldOptions,
        width: f32,
        height: f32,
        mut rng: SmallRng,
    ) -> Result<Self, OptionsError> {
        validate(&opts)?;

        let input = InputState::new(width, height);
        let stars = (0..opts.count)
            .map(|_| Star::random(&opts, &input, &mut rng))
            .collect();

        Ok(Self {
            opts,
            stars,
            input,
            rng,
            started_at_ms: None,
            parallax_override: None,
            parallax_active: false,
        })
    }

    /// Latest pointer position, a whole-field overwrite.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.input.set_pointer(x, y);
    }

    /// Latest scroll offsets, a whole-field overwrite.
    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.input.set_scroll(x, y);
    }

    /// Resync to a new viewport. In-flight anchors are not rescaled; a
    /// star may sit off surface until its next relocation.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.input.set_viewport(width, height);
    }

    /// Force parallax on or off, overriding the warm-up window.
    pub fn set_parallax(&mut self, enabled: bool) {
        self.parallax_override = Some(enabled);
    }

    /// Whether the last tick applied parallax offsets.
    pub fn parallax_active(&self) -> bool {
        self.parallax_active
    }

    /// Swap the palette. Existing stars keep their color until they
    /// relocate.
    pub fn set_palette(&mut self, palette: byeol_core::Palette) {
        self.opts.palette = palette;
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Repaint the whole field: opaque black, then every visible star as
    /// a full disc plus a half-radius glow disc.
    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Rgb::BLACK);
        for star in &self.stars {
            if star.opacity > 0.0 {
                surface.fill_circle(star.x, star.y, star.size, star.color, star.opacity, 0.0);
                surface.fill_circle(
                    star.x,
                    star.y,
                    star.size * 0.5,
                    star.color,
                    star.opacity,
                    star.size * 2.0,
                );
            }
        }
    }
}

impl Tickable for FieldEngine {
    fn tick(&mut self, now_ms: u64) {
        let started = *self.started_at_ms.get_or_insert(now_ms);
        let warmed_up = now_ms.saturating_sub(started) >= self.opts.parallax_warmup_ms;
        let parallax = self.parallax_override.unwrap_or(warmed_up);
        self.parallax_active = parallax;

        let Self {
            opts,
            stars,
            input,
            rng,
            ..
        } = self;
        let (center_x, center_y) = input.center();

        for star in stars.iter_mut() {
            advance_fade(star, opts, input, rng);

            if parallax {
                let pointer_dx = -(input.pointer_x - center_x) * star.parallax_depth;
                let pointer_dy = -(input.pointer_y - center_y) * star.parallax_depth;
                let scroll_dx = -input.scroll_x * star.parallax_depth * opts.parallax_damping;
                let scroll_dy = -input.scroll_y * star.parallax_depth * opts.parallax_damping;

                star.x = star.base_x + pointer_dx + scroll_dx;
                star.y = star.base_y + pointer_dy + scroll_dy;
            } else {
                star.x = star.base_x;
                star.y = star.base_y;
            }
        }
    }
}

/// Advance one star's fade state. Returns true if the star relocated on a
/// fade-out-to-zero transition.
fn advance_fade(
    star: &mut Star,
    opts: &FieldOptions,
    input: &InputState,
    rng: &mut SmallRng,
) -> bool {
    star.opacity += star.fade_direction * star.fade_speed;

    let mut relocated = false;
    if star.opacity >= star.max_opacity {
        star.fade_direction = -1.0;
    } else if star.opacity <= 0.0 {
        star.fade_direction = 1.0;

        if rng.gen_bool(opts.respawn_probability) {
            relocate(star, opts, input, rng);
            relocated = true;
        }
    }

    star.opacity = star.opacity.clamp(0.0, star.max_opacity);
    relocated
}

/// Soft respawn: new anchor, ceiling, color, and depth. Fade speed and
/// size carry over, so the star keeps its pacing in its new spot.
fn relocate(star: &mut Star, opts: &FieldOptions, input: &InputState, rng: &mut SmallRng) {
    let (base_x, base_y) = random_anchor(opts, input, rng);
    star.base_x = base_x;
    star.base_y = base_y;
    star.max_opacity = rng.gen_range(0.0..MAX_OPACITY_SPAN);
    star.color = random_color(opts, rng);
    star.parallax_depth = rng.gen_range(PARALLAX_DEPTH.0..PARALLAX_DEPTH.1);
}

/// Random anchor inside the viewport expanded by the spawn margin on
/// every side.
fn random_anchor(opts: &FieldOptions, input: &InputState, rng: &mut SmallRng) -> (f32, f32) {
    let extend_x = input.width * opts.spawn_margin;
    let extend_y = input.height * opts.spawn_margin;

    let x = rng.gen_range(-extend_x..=input.width + extend_x);
    let y = rng.gen_range(-extend_y..=input.height + extend_y);
    (x, y)
}

fn random_color(opts: &FieldOptions, rng: &mut SmallRng) -> Rgb {
    let colors = opts.palette.colors();
    colors[rng.gen_range(0..colors.len())]
}

fn validate(opts: &FieldOptions) -> Result<(), OptionsError> {
    if opts.count == 0 {
        return Err(OptionsError::EmptyField);
    }
    check_factor("spawn_margin", opts.spawn_margin)?;
    check_factor("parallax_damping", opts.parallax_damping)?;
    check_range("fade_speed", opts.fade_speed)?;
    check_range("size", opts.size)?;
    if !(0.0..=1.0).contains(&opts.respawn_probability) {
        return Err(OptionsError::InvalidProbability(opts.respawn_probability));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use byeol_core::Palette;

    fn engine(opts: FieldOptions) -> FieldEngine {
        FieldEngine::with_rng(opts, 800.0, 600.0, SmallRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_empty_field_rejected() {
        let opts = FieldOptions {
            count: 0,
            ..Default::default()
        };
        assert_eq!(
            FieldEngine::new(opts, 80.0, 24.0).err(),
            Some(OptionsError::EmptyField)
        );
    }

    #[test]
    fn test_bad_probability_rejected() {
        let opts = FieldOptions {
            respawn_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            FieldEngine::new(opts, 80.0, 24.0),
            Err(OptionsError::InvalidProbability(_))
        ));
    }

    #[test]
    fn test_initial_state_within_bounds() {
        let engine = engine(FieldOptions::default());
        assert_eq!(engine.stars().len(), 200);
        for star in engine.stars() {
            assert_eq!(star.opacity, 0.0);
            assert_eq!(star.fade_direction, 1.0);
            assert!(star.max_opacity < 0.8);
            assert!((0.02..0.17).contains(&star.parallax_depth));
            assert!((1.0..3.0).contains(&star.size));
            // Anchor inside the viewport extended by the 0.2 margin.
            assert!((-160.0..=960.0).contains(&star.base_x));
            assert!((-120.0..=720.0).contains(&star.base_y));
        }
    }

    #[test]
    fn test_opacity_stays_clamped() {
        let mut engine = engine(FieldOptions {
            count: 50,
            ..Default::default()
        });
        for frame in 0..2000 {
            engine.tick(frame * 16);
            for star in engine.stars() {
                assert!(
                    star.opacity >= 0.0 && star.opacity <= star.max_opacity,
                    "opacity {} outside [0, {}]",
                    star.opacity,
                    star.max_opacity
                );
            }
        }
    }

    #[test]
    fn test_fade_direction_flips_only_at_boundaries() {
        let opts = FieldOptions::default();
        let input = InputState::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(3);

        let mut star = Star::random(&opts, &input, &mut rng);
        star.max_opacity = 0.5;
        star.fade_speed = 0.02;

        let mut previous = (star.opacity, star.fade_direction);
        for _ in 0..500 {
            advance_fade(&mut star, &opts, &input, &mut rng);
            let (prev_opacity, prev_direction) = previous;
            if star.fade_direction != prev_direction {
                // A flip must coincide with a boundary crossing.
                let advanced = prev_opacity + prev_direction * star.fade_speed;
                assert!(
                    advanced >= star.max_opacity || advanced <= 0.0,
                    "direction flipped mid-range at opacity {advanced}"
                );
            }
            previous = (star.opacity, star.fade_direction);
        }
    }

    #[test]
    fn test_respawn_rate_matches_probability() {
        let opts = FieldOptions::default();
        let input = InputState::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut star = Star::random(&opts, &input, &mut rng);

        let crossings = 10_000;
        let mut respawns = 0;
        for _ in 0..crossings {
            // Force a fade-out-to-zero transition.
            star.opacity = 0.0;
            star.fade_direction = -1.0;
            if advance_fade(&mut star, &opts, &input, &mut rng) {
                respawns += 1;
            }
        }

        let rate = respawns as f64 / crossings as f64;
        assert!(
            (rate - 0.7).abs() < 0.02,
            "respawn rate {rate} outside 0.7 +/- 0.02"
        );
    }

    #[test]
    fn test_respawn_only_on_zero_crossing() {
        let opts = FieldOptions::default();
        let input = InputState::new(800.0, 600.0);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut star = Star::random(&opts, &input, &mut rng);

        // Mid-range and at the ceiling: never a respawn.
        star.opacity = 0.2;
        star.max_opacity = 0.6;
        star.fade_direction = 1.0;
        assert!(!advance_fade(&mut star, &opts, &input, &mut rng));

        star.opacity = star.max_opacity;
        assert!(!advance_fade(&mut star, &opts, &input, &mut rng));
    }

    #[test]
    fn test_parallax_disabled_keeps_anchor() {
        let mut engine = engine(FieldOptions::default());
        engine.set_parallax(false);
        engine.set_pointer(700.0, 20.0);
        engine.set_scroll(40.0, 80.0);

        for frame in 0..20 {
            engine.tick(frame * 16);
            for star in engine.stars() {
                assert_eq!((star.x, star.y), (star.base_x, star.base_y));
            }
        }
    }

    #[test]
    fn test_parallax_formula() {
        let mut engine = engine(FieldOptions::default());
        engine.set_parallax(true);
        engine.set_pointer(200.0, 150.0);

        engine.stars[0].base_x = 100.0;
        engine.stars[0].base_y = 100.0;
        engine.stars[0].parallax_depth = 0.1;

        engine.tick(0);

        // Viewport 800x600, center (400, 300): offset = -(pointer-center)*0.1.
        let star = &engine.stars()[0];
        assert!((star.x - 120.0).abs() < 1e-4);
        assert!((star.y - 115.0).abs() < 1e-4);

        // Scroll adds -scroll * depth * damping (0.3).
        engine.set_scroll(100.0, 200.0);
        engine.tick(16);
        let star = &engine.stars()[0];
        assert!((star.x - (120.0 - 100.0 * 0.1 * 0.3)).abs() < 1e-4);
        assert!((star.y - (115.0 - 200.0 * 0.1 * 0.3)).abs() < 1e-4);
    }

    #[test]
    fn test_warmup_enables_parallax_once() {
        let mut engine = engine(FieldOptions {
            parallax_warmup_ms: 2000,
            ..Default::default()
        });
        engine.tick(0);
        assert!(!engine.parallax_active());
        engine.tick(1999);
        assert!(!engine.parallax_active());
        engine.tick(2000);
        assert!(engine.parallax_active());
        engine.tick(5000);
        assert!(engine.parallax_active());
    }

    #[test]
    fn test_resize_does_not_rescale_anchors() {
        let mut engine = engine(FieldOptions::default());
        engine.tick(0);
        let anchors: Vec<(f32, f32)> = engine
            .stars()
            .iter()
            .map(|s| (s.base_x, s.base_y))
            .collect();

        engine.set_viewport(100.0, 30.0);
        let after: Vec<(f32, f32)> = engine
            .stars()
            .iter()
            .map(|s| (s.base_x, s.base_y))
            .collect();
        assert_eq!(anchors, after);
    }

    #[test]
    fn test_render_skips_invisible_stars() {
        #[derive(Default)]
        struct Recorder {
            cleared: Option<Rgb>,
            circles: Vec<(f32, f32, f32, f32)>,
        }

        impl Surface for Recorder {
            fn clear(&mut self, color: Rgb) {
                self.cleared = Some(color);
            }

            fn fill_circle(
                &mut self,
                x: f32,
                y: f32,
                radius: f32,
                _color: Rgb,
                alpha: f32,
                glow: f32,
            ) {
                self.circles.push((x, y, radius, glow));
                assert!(alpha > 0.0);
            }
        }

        let mut engine = engine(FieldOptions {
            count: 3,
            ..Default::default()
        });
        engine.stars[0].opacity = 0.5;
        engine.stars[0].max_opacity = 0.5;
        engine.stars[1].opacity = 0.0;
        engine.stars[2].opacity = 0.0;

        let mut recorder = Recorder::default();
        engine.render(&mut recorder);

        assert_eq!(recorder.cleared, Some(Rgb::BLACK));
        // One visible star: full disc plus half-radius glow disc.
        assert_eq!(recorder.circles.len(), 2);
        let size = engine.stars()[0].size;
        assert_eq!(recorder.circles[0].2, size);
        assert_eq!(recorder.circles[1].2, size * 0.5);
        assert_eq!(recorder.circles[1].3, size * 2.0);
    }

    #[test]
    fn test_palette_swap_applies_on_relocate() {
        let mut engine = engine(FieldOptions {
            count: 20,
            ..Default::default()
        });
        engine.set_palette(Palette::Mono);

        for frame in 0..5000 {
            engine.tick(frame * 16);
        }
        let mono = Palette::Mono.colors();
        let recolored = engine
            .stars()
            .iter()
            .filter(|s| mono.contains(&s.color))
            .count();
        assert!(recolored > 0, "no star picked up the new palette");
    }
}
