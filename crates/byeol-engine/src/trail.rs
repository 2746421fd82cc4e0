//! Cursor trail sparkle engine.
//!
//! Spawns a burst of short-lived sparkles on every pointer-move event,
//! one per tier, and ages them out on the tick pass. Sparkles live in a
//! [`SlotPool`] and are materialized through the host's [`NodeHost`];
//! the engine never owns a render target.
//!
//! Spawn rate is decoupled from removal rate: rapid continuous pointer
//! movement grows the live set faster than ticks reclaim it. That is
//! bounded only by event-loop fairness unless `max_live` is set, in
//! which case the oldest sparkle is evicted on overflow.

use byeol_core::{ColorMode, Rgb, TRAIL_TIERS, TrailOptions, hsl_to_rgb};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::{OptionsError, check_factor, check_range};
use crate::pool::SlotPool;
use crate::sched::Tickable;
use crate::surface::{NodeHost, NodeId, SparkleNode};

/// A single live sparkle.
#[derive(Debug, Clone)]
pub struct Sparkle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub born_at_ms: u64,
    pub dies_at_ms: u64,
    /// Vertical translation reached at end of life, if this sparkle
    /// drifts.
    pub drift: Option<f32>,
    node: NodeId,
}

impl Sparkle {
    /// Node this sparkle is materialized as.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// The trail sparkle engine, generic over the host that materializes its
/// visual tokens.
pub struct TrailEngine<H: NodeHost> {
    opts: TrailOptions,
    pool: SlotPool<Sparkle>,
    host: H,
    rng: SmallRng,
}

impl<H: NodeHost> TrailEngine<H> {
    pub fn new(opts: TrailOptions, host: H) -> Result<Self, OptionsError> {
        Self::with_rng(opts, host, SmallRng::from_entropy())
    }

    /// Same as [`TrailEngine::new`] with a caller-provided RNG, so tests
    /// run deterministically.
    pub fn with_rng(opts: TrailOptions, host: H, rng: SmallRng) -> Result<Self, OptionsError> {
        validate(&opts)?;
        Ok(Self {
            opts,
            pool: SlotPool::new(),
            host,
            rng,
        })
    }

    /// Spawn one sparkle per tier around `(x, y)`.
    pub fn on_pointer_move(&mut self, x: f32, y: f32, now_ms: u64) {
        for &weight in TRAIL_TIERS.iter() {
            if let Some(cap) = self.opts.max_live {
                while self.pool.len() >= cap {
                    self.evict_oldest();
                }
            }

            let jitter = (1.0 - weight) * self.opts.jitter_scale;
            let sparkle_x = x + self.rng.gen_range(-jitter..=jitter);
            let sparkle_y = y + self.rng.gen_range(-jitter..=jitter);
            let size = self.rng.gen_range(self.opts.size.0..self.opts.size.1);

            let (color, alpha) = match self.opts.color_mode {
                ColorMode::Palette => {
                    let colors = self.opts.palette.colors();
                    (colors[self.rng.gen_range(0..colors.len())], 1.0)
                }
                ColorMode::Hue => {
                    let hue = self.rng.gen_range(0.0..360.0);
                    (hsl_to_rgb(hue, 0.9, 0.6), weight)
                }
            };

            let life_ms =
                self.rng.gen_range(0.0..weight as f64 * self.opts.base_life_ms as f64) as u64;
            let drift = (weight >= self.opts.drift_threshold)
                .then(|| self.rng.gen_range(-self.opts.drift_range..=self.opts.drift_range));

            let node = self.host.spawn(SparkleNode {
                x: sparkle_x,
                y: sparkle_y,
                size,
                color,
                alpha,
            });
            self.pool.insert(Sparkle {
                x: sparkle_x,
                y: sparkle_y,
                size,
                color,
                alpha,
                born_at_ms: now_ms,
                dies_at_ms: now_ms + life_ms,
                drift,
                node,
            });
        }
    }

    /// Number of live sparkles.
    pub fn live_count(&self) -> usize {
        self.pool.len()
    }

    /// Live sparkles, oldest first.
    pub fn sparkles(&self) -> impl Iterator<Item = &Sparkle> {
        self.pool.live().iter().filter_map(|&index| self.pool.get(index))
    }

    /// The host this engine materializes through.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Despawn every live sparkle.
    pub fn clear(&mut self) {
        let host = &mut self.host;
        self.pool.retain(|_, _| false, |_, sparkle| host.despawn(sparkle.node));
    }

    fn evict_oldest(&mut self) {
        if let Some(index) = self.pool.oldest()
            && let Some(sparkle) = self.pool.remove(index)
        {
            self.host.despawn(sparkle.node);
        }
    }
}

impl<H: NodeHost> Tickable for TrailEngine<H> {
    fn tick(&mut self, now_ms: u64) {
        // Reclaim everything past its death timestamp, exactly once.
        let host = &mut self.host;
        self.pool.retain(
            |_, sparkle| now_ms < sparkle.dies_at_ms,
            |_, sparkle| host.despawn(sparkle.node),
        );

        // Drift pass over the survivors.
        for &index in self.pool.live() {
            if let Some(sparkle) = self.pool.get(index)
                && let Some(drift) = sparkle.drift
            {
                let life_span = sparkle.dies_at_ms.saturating_sub(sparkle.born_at_ms);
                if life_span > 0 {
                    let elapsed = now_ms.saturating_sub(sparkle.born_at_ms);
                    let translation = drift * (elapsed as f32 / life_span as f32);
                    self.host.translate(sparkle.node, translation);
                }
            }
        }
    }
}

fn validate(opts: &TrailOptions) -> Result<(), OptionsError> {
    if opts.base_life_ms == 0 {
        return Err(OptionsError::ZeroLife);
    }
    if opts.max_live == Some(0) {
        return Err(OptionsError::ZeroCap);
    }
    check_factor("jitter_scale", opts.jitter_scale)?;
    check_factor("drift_range", opts.drift_range)?;
    check_factor("drift_threshold", opts.drift_threshold)?;
    check_range("size", opts.size)?;
    Ok(())
}
